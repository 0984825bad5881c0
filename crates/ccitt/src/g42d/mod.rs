//! # CCITT Group 4 2D-encoding
//!
//! Spec: ITU-T Recommendation T.6 (11/88) <https://www.itu.int/rec/T-REC-T.6-198811-I/en>
//!
//! The same row coder is used for the 2D rows of a T.4 two-dimensional
//! stream (`K > 0`).

use crate::tables::Mode;

mod decode;
mod encode;

pub use decode::decode_row;
pub use encode::encode_row;

/// Choose the coding mode for the changing elements `a1`, `b1` and `b2`
///
/// Pass mode applies when `b2` lies strictly left of `a1`. Otherwise a
/// vertical mode is used when `a1` is at most 3 pixels away from `b1`, and
/// horizontal mode when it is further away.
pub fn select_mode(a1: usize, b1: usize, b2: usize) -> Mode {
    if b2 < a1 {
        Mode::Pass
    } else {
        let offset = a1 as isize - b1 as isize;
        if offset.abs() <= 3 {
            Mode::Vertical(offset as i8)
        } else {
            Mode::Horizontal
        }
    }
}
