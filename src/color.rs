use anyhow::{bail, Result};
use palette::{IntoColor, Lab, Srgb};

/// Core color type used throughout the pipeline.
/// Wraps sRGB u8 components, so every channel stays within [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Fallback accent used when an image has no quantizable pixels.
pub const DEFAULT_ACCENT: Color = Color::new(10, 107, 83);

/// Default percentage by which the accent is darkened.
pub const DEFAULT_DARKEN: f64 = 0.18;

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            bail!(
                "invalid hex color: expected 6 hex digits, got {}",
                hex.len()
            );
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Create from `palette::Srgb<u8>`.
    pub fn from_srgb_u8(srgb: Srgb<u8>) -> Self {
        Self {
            r: srgb.red,
            g: srgb.green,
            b: srgb.blue,
        }
    }

    /// Convert to CIELAB (the space the quantizer clusters in).
    pub fn to_lab(self) -> Lab {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    /// Scale every channel by `1 - pct`, truncating toward zero.
    ///
    /// `pct` is clamped to [0, 1] first, so `0.0` returns the color unchanged
    /// and `1.0` returns black.
    pub fn darker(self, pct: f64) -> Color {
        let factor = 1.0 - pct.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
        Color {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// WCAG relative luminance.
    ///
    /// Linearizes each sRGB channel (knee at 0.03928), then computes the
    /// weighted sum. Returns a value in [0, 1].
    pub fn relative_luminance(self) -> f64 {
        fn linearize(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// CSS `rgba()` function with this color and the given alpha.
    pub fn rgba(self, alpha: f32) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
