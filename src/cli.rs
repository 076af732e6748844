use std::path::PathBuf;

use clap::Parser;

use crate::color::Color;

/// Regenerate a stylesheet's theme variables from the dominant color of a hero image.
#[derive(Parser, Debug)]
#[command(name = "hero-theme", version, about)]
pub struct Args {
    /// Path to the hero image
    #[arg(default_value = "assets/hero-photo.jpg")]
    pub image: PathBuf,

    /// Stylesheet whose theme block is regenerated
    #[arg(short, long, default_value = "css/styles.css")]
    pub stylesheet: PathBuf,

    /// Maximum number of palette colors
    #[arg(short = 'k', long = "colors", default_value_t = 8,
          value_parser = clap::value_parser!(u8).range(1..))]
    pub colors: u8,

    /// Width the image is resampled to before quantization
    #[arg(long, default_value_t = 120,
          value_parser = clap::value_parser!(u32).range(1..=4096))]
    pub width: u32,

    /// Fraction by which the accent is darkened for --accent-dark
    #[arg(long, default_value_t = 0.18, value_parser = parse_fraction)]
    pub darken: f64,

    /// Accent used when the image has no usable pixels
    #[arg(long, default_value = "#0a6b53")]
    pub fallback: Color,

    /// Print the generated block instead of writing the stylesheet
    #[arg(long)]
    pub dry_run: bool,

    /// Print a colored terminal preview of the derived colors
    #[arg(long)]
    pub preview: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not between 0 and 1"))
    }
}
