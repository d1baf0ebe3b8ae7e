// Small value types shared by the surface, the tools and the window.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color packed as 0x00RRGGBB, the layout minifb presents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x00_00_00_00);
    pub const WHITE: Color = Color(0x00_FF_FF_FF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Parses `#rrggbb` (the leading `#` is optional).
impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

/// Swatches offered next to the free color picker.
pub const PALETTE: [Color; 8] = [
    Color::rgb(0x00, 0x00, 0x00), // black
    Color::rgb(0xFF, 0x00, 0x00), // red
    Color::rgb(0xFF, 0xA5, 0x00), // orange
    Color::rgb(0xFF, 0xFF, 0x00), // yellow
    Color::rgb(0x00, 0x80, 0x00), // green
    Color::rgb(0x00, 0x00, 0xFF), // blue
    Color::rgb(0x80, 0x00, 0x80), // purple
    Color::rgb(0xFF, 0xFF, 0xFF), // white
];

/// A position in either viewport or surface space, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self - other).length()
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn scale(self, k: f32) -> Point {
        Point::new(self.x * k, self.y * k)
    }

    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 2D cross product.
    pub fn cross(self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Left-hand normal of a direction vector.
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgb(0xFF, 0x80, 0x00));
        assert_eq!("00ff00".parse::<Color>().unwrap(), Color::rgb(0, 0xFF, 0));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!("#fff".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn rejects_sign_characters_inside_channels() {
        assert!("#+1+2+3".parse::<Color>().is_err());
        assert!("-10000".parse::<Color>().is_err());
    }

    #[test]
    fn displays_as_lowercase_hex() {
        assert_eq!(Color::rgb(0xAB, 0x01, 0xFF).to_string(), "#ab01ff");
    }
}
