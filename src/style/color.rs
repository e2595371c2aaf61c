use serde::{Deserialize, Serialize};

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha (0 = fully transparent).
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from RGBA components.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_rgb_u32(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// Whether the color contributes nothing when drawn.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// `[r, g, b, a]` for GPU upload.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// 8-bit RGBA.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// `#RRGGBB` notation (alpha dropped).
    #[must_use]
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Parse a CSS color: `transparent`, `#rgb`, `#rrggbb`, `#rrggbbaa`,
    /// `rgb(r, g, b)` or `rgba(r, g, b, a)`, plus `white`/`black`.
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse_css(input: &str) -> Option<Self> {
        let s: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match s.as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            "white" => return Some(Self::WHITE),
            "black" => return Some(Self::BLACK),
            _ => {}
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(body) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body);
        }
        None
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |i: usize| {
        u8::from_str_radix(hex.get(i..=i)?, 16)
            .ok()
            .map(|v| f32::from(v * 17) / 255.0)
    };
    let byte = |i: usize| {
        u8::from_str_radix(hex.get(i..i + 2)?, 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    match hex.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').collect();
    let channel = |s: &str| s.parse::<f32>().ok().map(|v| v / 255.0);
    match parts.as_slice() {
        [r, g, b] => {
            Some(Color::rgb(channel(*r)?, channel(*g)?, channel(*b)?))
        }
        [r, g, b, a] => Some(Color::rgba(
            channel(*r)?,
            channel(*g)?,
            channel(*b)?,
            a.parse::<f32>().ok()?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse_css("#FFFFFF"), Some(Color::WHITE));
        assert_eq!(Color::parse_css("#000"), Some(Color::BLACK));
        let c = Color::parse_css("#3050F8").unwrap();
        assert_eq!(c.to_rgba8(), [0x30, 0x50, 0xF8, 0xFF]);
        assert!(Color::parse_css("#00000000").unwrap().is_transparent());
    }

    #[test]
    fn parses_transparent_spellings() {
        assert!(Color::parse_css("transparent").unwrap().is_transparent());
        assert!(Color::parse_css("rgba(0,0,0,0)").unwrap().is_transparent());
        assert!(Color::parse_css("rgba(0, 0, 0, 0)").unwrap().is_transparent());
        assert!(!Color::parse_css("rgb(10, 20, 30)").unwrap().is_transparent());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::parse_css("not-a-color"), None);
        assert_eq!(Color::parse_css("#12345"), None);
        assert_eq!(Color::parse_css("rgb(1,2)"), None);
    }

    #[test]
    fn hex_round_trip_of_packed_value() {
        assert_eq!(Color::from_rgb_u32(0xEF_44_44).to_hex(), "#EF4444");
    }
}
