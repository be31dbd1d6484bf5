use serde::{Deserialize, Serialize};

/// An RGBA color with components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse "#RRGGBB" or "#RRGGBBAA".
    pub fn from_hex_string(hex_str: &str) -> Result<Color, String> {
        let hex = hex_str.trim_start_matches('#');
        // Length and pair slicing below count bytes; multibyte input must
        // not reach them.
        if !hex.is_ascii() {
            return Err("Hex color must be ASCII".to_string());
        }

        match hex.len() {
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid hex color")?;
                let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid hex color")?;
                let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid hex color")?;
                let a = if hex.len() == 8 {
                    u8::from_str_radix(&hex[6..8], 16).map_err(|_| "Invalid hex color")?
                } else {
                    255
                };

                Ok(Color::new(
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                    a as f32 / 255.0,
                ))
            }
            _ => Err("Hex color must be 6 or 8 characters".to_string()),
        }
    }

    /// Parse a configured color spec, falling back to black on anything
    /// malformed. Widget palettes must never fail a tick over a bad string.
    pub fn parse_or_default(spec: &str) -> Color {
        if spec.starts_with('#') {
            Color::from_hex_string(spec).unwrap_or(Color::BLACK)
        } else {
            Color::BLACK
        }
    }

    /// Interpolate between colors.
    pub fn interpolate(&self, target: &Color, progress: f32) -> Color {
        Color {
            r: self.r + (target.r - self.r) * progress,
            g: self.g + (target.g - self.g) * progress,
            b: self.b + (target.b - self.b) * progress,
            a: self.a + (target.a - self.a) * progress,
        }
    }

    /// Convert to hex string.
    pub fn to_hex_string(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
            (self.a * 255.0) as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        let color = Color::from_hex_string("#FF8000").unwrap();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 128.0 / 255.0);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_hex_color_with_alpha() {
        let color = Color::from_hex_string("#FF800080").unwrap();
        assert_eq!(color.a, 128.0 / 255.0);
    }

    #[test]
    fn test_malformed_spec_falls_back_to_black() {
        assert_eq!(Color::parse_or_default("#GGHHII"), Color::BLACK);
        assert_eq!(Color::parse_or_default("#FF00"), Color::BLACK);
        assert_eq!(Color::parse_or_default("red"), Color::BLACK);
        assert_eq!(Color::parse_or_default(""), Color::BLACK);
    }

    #[test]
    fn test_multibyte_spec_falls_back_to_black() {
        // Six bytes but not six hex digits; must not panic on a byte slice.
        assert_eq!(Color::parse_or_default("#a\u{0100}bcd"), Color::BLACK);
        assert_eq!(Color::parse_or_default("#ÿÿÿ"), Color::BLACK);
    }

    #[test]
    fn test_valid_spec_parses() {
        assert_eq!(Color::parse_or_default("#FF0000"), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_color_interpolation() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let blue = Color::new(0.0, 0.0, 1.0, 1.0);

        let purple = red.interpolate(&blue, 0.5);
        assert_eq!(purple.r, 0.5);
        assert_eq!(purple.g, 0.0);
        assert_eq!(purple.b, 0.5);
        assert_eq!(purple.a, 1.0);
    }
}
