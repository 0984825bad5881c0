//! # CCITT Group 3 1D-encoding (Modified Huffman)
//!
//! Spec: ITU-T Recommendation T.4 (07/2003), 4.1 One-dimensional coding scheme
//!
//! A row is an alternating sequence of white and black runs starting with
//! white. A row that starts with a black pixel starts with a white run of
//! length zero.

use log::trace;

use crate::{
    bits::{BitReader, BitWriter},
    line::ColorLine,
    tables::{codes_for_run, MAKEUP_STEP, MAX_RUN_CODE_LEN},
    tree::run_tree,
    Color, FaxError, FaxResult,
};

/// Write the codes for a single run
pub(crate) fn write_run(writer: &mut BitWriter, color: Color, len: usize) {
    for code in codes_for_run(color, len) {
        writer.write_code(code);
    }
}

/// Read one run length: any number of make-up codes and a terminating code
pub(crate) fn read_run(reader: &mut BitReader, color: Color) -> FaxResult<usize> {
    let tree = run_tree(color);
    let mut total = 0;
    loop {
        let bit_pos = reader.bit_pos();
        let window = reader.peek();
        match tree.lookup(window.bits, 0) {
            Some(entry) if entry.code.length <= window.available => {
                reader.consume(entry.code.length);
                total += entry.value as usize;
                if (entry.value as usize) < MAKEUP_STEP {
                    return Ok(total);
                }
            }
            Some(_) => return Err(FaxError::BufferExhausted { bit_pos }),
            None if window.available < MAX_RUN_CODE_LEN => {
                return Err(FaxError::BufferExhausted { bit_pos })
            }
            None => return Err(FaxError::InvalidRunCode { color, bit_pos }),
        }
    }
}

/// Encode a row of `columns` pixels
pub fn encode_row(writer: &mut BitWriter, row: &[Color]) {
    let mut pos = 0;
    let mut color = Color::White;
    while pos < row.len() {
        let end = row.find_change(pos, color);
        write_run(writer, color, end - pos);
        pos = end;
        color.invert();
    }
}

/// Decode a row of `columns` pixels into `row`
pub fn decode_row(reader: &mut BitReader, columns: usize, row: &mut Vec<Color>) -> FaxResult<()> {
    row.clear();
    let mut color = Color::White;
    while row.len() < columns {
        let run = read_run(reader, color)?;
        let end = row.len() + run;
        if end > columns {
            return Err(FaxError::OutOfBounds {
                row: 0,
                pos: end,
                columns,
            });
        }
        trace!("{:?} run of {}", color, run);
        row.resize(end, color);
        color.invert();
    }
    Ok(())
}
