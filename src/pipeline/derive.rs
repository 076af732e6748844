use crate::color::Color;

/// Luminance above which the hero text switches to the dark color.
pub const TEXT_LUMINANCE_THRESHOLD: f64 = 0.5;

const OVERLAY_ACCENT_ALPHA: f32 = 0.18;
const OVERLAY_SHADE_ALPHA: f32 = 0.12;

/// Text color laid over the hero image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroText {
    Dark,
    Light,
}

impl HeroText {
    /// Pick readable text for a background of luminance `l`.
    pub fn for_luminance(l: f64) -> Self {
        if l > TEXT_LUMINANCE_THRESHOLD {
            HeroText::Dark
        } else {
            HeroText::Light
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            HeroText::Dark => "#111",
            HeroText::Light => "#fff",
        }
    }
}

/// Everything the theme block is generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeValues {
    pub accent: Color,
    pub accent_dark: Color,
    pub overlay: String,
    pub text: HeroText,
    pub luminance: f64,
}

impl ThemeValues {
    pub fn derive(accent: Color, darken_pct: f64) -> Self {
        let luminance = accent.relative_luminance();
        Self {
            accent,
            accent_dark: accent.darker(darken_pct),
            overlay: overlay_gradient(accent),
            text: HeroText::for_luminance(luminance),
            luminance,
        }
    }
}

/// The accent at low alpha fading into a faint black shade.
pub fn overlay_gradient(accent: Color) -> String {
    format!(
        "linear-gradient({}, {})",
        accent.rgba(OVERLAY_ACCENT_ALPHA),
        Color::new(0, 0, 0).rgba(OVERLAY_SHADE_ALPHA)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_DARKEN;

    #[test]
    fn solid_red() {
        let values = ThemeValues::derive(Color::new(255, 0, 0), DEFAULT_DARKEN);
        assert_eq!(values.accent.to_hex(), "#ff0000");
        assert_eq!(values.accent_dark.to_hex(), "#d10000");
        assert!((values.luminance - 0.2126).abs() < 1e-6);
        assert_eq!(values.text, HeroText::Light);
        assert_eq!(values.text.css(), "#fff");
        assert_eq!(
            values.overlay,
            "linear-gradient(rgba(255,0,0,0.18), rgba(0,0,0,0.12))"
        );
    }

    #[test]
    fn white_gets_dark_text() {
        let values = ThemeValues::derive(Color::new(255, 255, 255), DEFAULT_DARKEN);
        assert!((values.luminance - 1.0).abs() < 1e-6);
        assert_eq!(values.text.css(), "#111");
    }

    #[test]
    fn black_gets_light_text() {
        let values = ThemeValues::derive(Color::new(0, 0, 0), DEFAULT_DARKEN);
        assert!(values.luminance.abs() < 1e-6);
        assert_eq!(values.text, HeroText::Light);
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(HeroText::for_luminance(0.5), HeroText::Light);
        assert_eq!(HeroText::for_luminance(0.500_001), HeroText::Dark);
        assert_eq!(HeroText::for_luminance(0.499_999), HeroText::Light);
    }

    #[test]
    fn threshold_straddled_by_neighbouring_grays() {
        // Grays 187 and 188 sit on either side of L = 0.5.
        let below = ThemeValues::derive(Color::new(187, 187, 187), DEFAULT_DARKEN);
        let above = ThemeValues::derive(Color::new(188, 188, 188), DEFAULT_DARKEN);
        assert!(below.luminance < 0.5 && above.luminance > 0.5);
        assert_eq!(below.text, HeroText::Light);
        assert_eq!(above.text, HeroText::Dark);
    }
}
