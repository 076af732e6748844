use std::io::Write;

use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use crate::color::Color;
use crate::pipeline::derive::{HeroText, ThemeValues};

const SWATCH_WIDTH: usize = 14;

fn to_term(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn text_color(text: HeroText) -> TermColor {
    match text {
        HeroText::Dark => TermColor::Rgb {
            r: 0x11,
            g: 0x11,
            b: 0x11,
        },
        HeroText::Light => TermColor::White,
    }
}

/// Write a row of truecolor swatches for the accent colors, each labelled in
/// the chosen hero text color.
pub fn write_preview<W: Write>(out: &mut W, values: &ThemeValues) -> Result<()> {
    let fg = text_color(values.text);
    for (label, color) in [("accent", values.accent), ("accent-dark", values.accent_dark)] {
        queue!(
            out,
            SetBackgroundColor(to_term(color)),
            SetForegroundColor(fg),
            Print(format!(" {label:<w$}", w = SWATCH_WIDTH - 1)),
            ResetColor,
            Print(format!(" {color}\n")),
        )?;
    }
    out.flush()?;
    Ok(())
}
