//! # Changing elements
//!
//! Positions on a scanline are pixel indices `0..columns`. The position of
//! `a0` before the first pixel of a line (conventionally `-1`) is `None`;
//! the imaginary pixel there is white. A changing element that does not
//! exist is reported as `columns`.

use crate::Color;

/// This struct can represent a scanline
pub trait ColorLine {
    /// Number of pixels
    fn width(&self) -> usize;

    /// The color at index i, where `None` is the imaginary white pixel in
    /// front of the line
    fn color_at(&self, i: Option<usize>) -> Color;

    /// The first index `>= start` with a color other than `color`
    fn find_change(&self, start: usize, color: Color) -> usize;
}

impl ColorLine for [Color] {
    fn width(&self) -> usize {
        self.len()
    }

    fn color_at(&self, i: Option<usize>) -> Color {
        match i {
            None => Color::White,
            Some(i) => self[i],
        }
    }

    fn find_change(&self, start: usize, color: Color) -> usize {
        self.get(start..)
            .and_then(|rest| rest.iter().position(|c| *c != color))
            .map_or(self.len(), |offset| start + offset)
    }
}

/// Find `b1` and `b2` on the reference line
///
/// `b1` is the first changing element right of `a0` with a color opposite
/// to `color` (the color of `a0`), `b2` is the next changing element after it.
pub fn find_b1_b2(reference: &[Color], a0: Option<usize>, color: Color) -> (usize, usize) {
    let width = reference.width();
    let start = a0.map_or(0, |a0| a0 + 1);
    if start >= width {
        return (width, width);
    }
    let mut last = reference.color_at(a0);
    let mut b1 = width;
    for (i, &c) in reference.iter().enumerate().skip(start) {
        if c != last && c != color {
            b1 = i;
            break;
        }
        last = c;
    }
    if b1 >= width {
        return (width, width);
    }
    let b2 = reference.find_change(b1 + 1, reference[b1]);
    (b1, b2)
}

#[cfg(test)]
mod tests {
    use super::{find_b1_b2, ColorLine};
    use crate::Color::{self, Black as B, White as W};

    fn line(s: &str) -> Vec<Color> {
        s.chars().map(|c| if c == '#' { B } else { W }).collect()
    }

    #[test]
    fn test_find_change() {
        let l = line("__##_");
        assert_eq!(l.find_change(0, W), 2);
        assert_eq!(l.find_change(2, B), 4);
        assert_eq!(l.find_change(4, W), 5);
        assert_eq!(l.find_change(7, W), 5);
        assert_eq!(l.color_at(None), W);
        assert_eq!(l.color_at(Some(3)), B);
    }

    #[test]
    fn test_b1_b2_start_of_line() {
        let r = line("__###__#");
        assert_eq!(find_b1_b2(&r, None, W), (2, 5));
        // a black pixel at 0 is a changing element
        let r = line("##__");
        assert_eq!(find_b1_b2(&r, None, W), (0, 2));
        let r = line("________");
        assert_eq!(find_b1_b2(&r, None, W), (8, 8));
    }

    #[test]
    fn test_b1_must_have_opposite_color() {
        let r = line("__###__#");
        // after a0 = 2 with black as the current color, the next changing
        // element to white is 5
        assert_eq!(find_b1_b2(&r, Some(2), B), (5, 7));
        // with white as the current color, 5 is skipped
        assert_eq!(find_b1_b2(&r, Some(2), W), (7, 8));
    }

    #[test]
    fn test_b1_strictly_right_of_a0() {
        let r = line("__###__#");
        assert_eq!(find_b1_b2(&r, Some(1), W), (2, 5));
        assert_eq!(find_b1_b2(&r, Some(7), W), (8, 8));
    }
}
