//! Encoder implementation

use log::trace;

use super::select_mode;
use crate::{
    bits::BitWriter,
    g3::write_run,
    line::{find_b1_b2, ColorLine},
    tables::{Mode, HORIZONTAL, PASS},
    Color,
};

/// Encode `coding` relative to `reference`
///
/// Both lines must have the same width.
pub fn encode_row(writer: &mut BitWriter, reference: &[Color], coding: &[Color]) {
    debug_assert_eq!(reference.len(), coding.len());
    let width = coding.len();

    let mut a0: Option<usize> = None;
    let mut color = Color::White;

    while a0.map_or(true, |a0| a0 < width) {
        let start = a0.map_or(0, |a0| a0 + 1);
        let a1 = coding.find_change(start, color);
        let (b1, b2) = find_b1_b2(reference, a0, color);

        let mode = select_mode(a1, b1, b2);
        trace!("a0={:?} a1={} b1={} b2={} {:?}", a0, a1, b1, b2, mode);
        match mode {
            Mode::Pass => {
                writer.write_code(PASS);
                a0 = Some(b2);
            }
            Mode::Vertical(offset) => {
                match mode.code() {
                    Some(code) => writer.write_code(code),
                    None => unreachable!("select_mode chose vertical offset {}", offset),
                }
                a0 = Some(a1);
                color.invert();
            }
            Mode::Extension => unreachable!("select_mode never chooses an extension"),
            Mode::Horizontal => {
                let a2 = coding.find_change(a1 + 1, !color);
                writer.write_code(HORIZONTAL);
                write_run(writer, color, a1 - a0.unwrap_or(0));
                write_run(writer, !color, a2 - a1);
                a0 = Some(a2);
            }
        }
    }
}
