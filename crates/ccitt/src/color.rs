//! Common structs and enums

/// Black or White Color
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    /// No-Ink
    White,
    /// Ink
    Black,
}

impl From<bool> for Color {
    fn from(b: bool) -> Color {
        if b {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Color {
    /// Invert a color
    pub fn invert(&mut self) {
        *self = !*self;
    }
}

/// The byte values that stand for white and black pixels in a row
///
/// This is derived from `BlackIs1` once per call and handed to everything
/// that converts between bytes and [`Color`]s.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelValues {
    /// The value of a white pixel
    pub white: u8,
    /// The value of a black pixel
    pub black: u8,
}

impl PixelValues {
    /// `0` is black, `1` is white
    pub const BLACK_IS_0: Self = Self { white: 1, black: 0 };
    /// `1` is black, `0` is white
    pub const BLACK_IS_1: Self = Self { white: 0, black: 1 };

    /// Select the mapping for the `BlackIs1` flag
    pub const fn new(black_is_1: bool) -> Self {
        if black_is_1 {
            Self::BLACK_IS_1
        } else {
            Self::BLACK_IS_0
        }
    }

    /// Interpret a byte; anything that is not the black value is white
    pub fn color(&self, value: u8) -> Color {
        if value == self.black {
            Color::Black
        } else {
            Color::White
        }
    }

    /// The byte for a color
    pub fn value(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Convert a row of bytes into colors
    pub fn to_colors(&self, row: &[u8], out: &mut Vec<Color>) {
        out.clear();
        out.extend(row.iter().map(|v| self.color(*v)));
    }

    /// Convert a row of colors into bytes
    pub fn to_bytes(&self, row: &[Color]) -> Vec<u8> {
        row.iter().map(|c| self.value(*c)).collect()
    }
}

impl Default for PixelValues {
    fn default() -> Self {
        Self::BLACK_IS_0
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, PixelValues};

    #[test]
    fn test_invert() {
        let mut color = Color::White;
        color.invert();
        assert_eq!(color, Color::Black);
        assert_eq!(!color, Color::White);
    }

    #[test]
    fn test_pixel_values() {
        let p = PixelValues::new(false);
        assert_eq!(p.color(0), Color::Black);
        assert_eq!(p.color(1), Color::White);
        assert_eq!(p.value(Color::White), 1);

        let p = PixelValues::new(true);
        assert_eq!(p.color(1), Color::Black);
        assert_eq!(p.color(0), Color::White);
        assert_eq!(p.to_bytes(&[Color::White, Color::Black]), vec![0, 1]);
    }
}
