//! Decoder implementation

use log::trace;

use crate::{
    bits::BitReader,
    g3::read_run,
    line::find_b1_b2,
    tables::{Mode, EXTENSION},
    tree::mode_tree,
    Color, FaxError, FaxResult,
};

fn read_mode(reader: &mut BitReader) -> FaxResult<Mode> {
    let bit_pos = reader.bit_pos();
    let window = reader.peek();
    match mode_tree().lookup(window.bits, 0) {
        Some(entry) if entry.code.length <= window.available => {
            reader.consume(entry.code.length);
            Ok(entry.value)
        }
        Some(_) => Err(FaxError::BufferExhausted { bit_pos }),
        None if window.available < EXTENSION.length => Err(FaxError::BufferExhausted { bit_pos }),
        None => Err(FaxError::InvalidControlCode { bit_pos }),
    }
}

/// Decode one row relative to `reference` into `row`
///
/// The width of the row is the width of the reference line.
pub fn decode_row(reader: &mut BitReader, reference: &[Color], row: &mut Vec<Color>) -> FaxResult<()> {
    let columns = reference.len();
    let out_of_bounds = |pos| FaxError::OutOfBounds {
        row: 0,
        pos,
        columns,
    };

    row.clear();
    let mut a0: Option<usize> = None;
    let mut color = Color::White;

    // `row` holds all pixels left of `a0`
    while a0.map_or(true, |a0| a0 < columns) {
        let (b1, b2) = find_b1_b2(reference, a0, color);
        let bit_pos = reader.bit_pos();
        let mode = read_mode(reader)?;
        trace!("a0={:?} b1={} b2={} {:?}", a0, b1, b2, mode);
        match mode {
            Mode::Pass => {
                row.resize(b2, color);
                a0 = Some(b2);
            }
            Mode::Vertical(offset) => {
                let a1 = b1 as isize + offset as isize;
                let min = a0.map_or(0, |a0| a0 + 1) as isize;
                if a1 < min || a1 > columns as isize {
                    return Err(out_of_bounds(a1.max(0) as usize));
                }
                let a1 = a1 as usize;
                row.resize(a1, color);
                a0 = Some(a1);
                color.invert();
            }
            Mode::Horizontal => {
                let a1 = row.len() + read_run(reader, color)?;
                let a2 = a1 + read_run(reader, !color)?;
                if a2 > columns {
                    return Err(out_of_bounds(a2));
                }
                row.resize(a1, color);
                row.resize(a2, !color);
                a0 = Some(a2);
            }
            Mode::Extension => return Err(FaxError::ExtensionNotSupported { bit_pos }),
        }
    }
    Ok(())
}
