use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use hero_theme::cli::Args;
use hero_theme::pipeline::derive::ThemeValues;
use hero_theme::pipeline::extract::{extract_dominant, ExtractOptions};
use hero_theme::preview::write_preview;
use hero_theme::theme::ThemeBlock;

/// Exit status when the input image does not exist.
const EXIT_MISSING_INPUT: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if !args.image.exists() {
        eprintln!(
            "Please upload {} and re-run hero-theme.",
            args.image.display()
        );
        return ExitCode::from(EXIT_MISSING_INPUT);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let options = ExtractOptions {
        width: args.width,
        colors: args.colors as usize,
        fallback: args.fallback,
    };

    let dominant = extract_dominant(&args.image, &options)?;
    let values = ThemeValues::derive(dominant, args.darken);
    let block = ThemeBlock::from_values(values.clone());

    if args.dry_run {
        print!("{}", block.serialize());
    } else {
        block.write_to(&args.stylesheet)?;
        println!("✓ Wrote theme variables to {}", args.stylesheet.display());
    }

    println!("  Dominant color: {}", values.accent);
    println!("  Accent dark: {}", values.accent_dark);
    println!("  Hero text: {}", values.text.css());
    println!("  Luminance: {:.2}", values.luminance);

    if args.preview {
        write_preview(&mut std::io::stdout(), &values)?;
    }
    Ok(())
}
