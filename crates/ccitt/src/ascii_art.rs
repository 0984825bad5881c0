//! # Draw bitmap as ascii-art
use std::{fmt, io};

use crate::{Color, PixelValues};

/// Characters for the top or bottom border
#[derive(Debug)]
pub struct BorderDrawing {
    /// The left corner
    pub left: char,
    /// The edge
    pub middle: char,
    /// The right corner
    pub right: char,
}

/// Characters for the frame and the pixels
#[derive(Debug)]
pub struct BoxDrawing {
    /// Top border
    pub top: BorderDrawing,
    /// Left edge
    pub left: char,
    /// Right edge
    pub right: char,
    /// Bottom border
    pub bottom: BorderDrawing,
    /// A black pixel
    pub ink: char,
    /// A white pixel
    pub no_ink: char,
}

const ASCII_BORDER: BorderDrawing = BorderDrawing {
    left: '+',
    middle: '-',
    right: '+',
};

/// Plain ASCII
pub const ASCII: &BoxDrawing = &BoxDrawing {
    top: ASCII_BORDER,
    left: '|',
    right: '|',
    bottom: ASCII_BORDER,
    ink: '#',
    no_ink: ' ',
};

/// Unicode box drawing characters
pub const UNICODE: &BoxDrawing = &BoxDrawing {
    top: BorderDrawing {
        left: '╔',
        middle: '═',
        right: '╗',
    },
    left: '║',
    right: '║',
    bottom: BorderDrawing {
        left: '╚',
        middle: '═',
        right: '╝',
    },
    ink: '█',
    no_ink: ' ',
};

fn border<W: fmt::Write>(w: &mut W, b: &BorderDrawing, width: usize) -> fmt::Result {
    w.write_char(b.left)?;
    for _ in 0..width {
        w.write_char(b.middle)?;
    }
    w.write_char(b.right)?;
    w.write_char('\n')
}

/// Draw decoded rows using characters
pub fn ascii_art<W: fmt::Write, R: AsRef<[u8]>>(
    w: &mut W,
    rows: &[R],
    pixels: PixelValues,
    b: &BoxDrawing,
) -> fmt::Result {
    let width = rows.first().map_or(0, |row| row.as_ref().len());
    border(w, &b.top, width)?;
    for row in rows {
        w.write_char(b.left)?;
        for value in row.as_ref() {
            w.write_char(match pixels.color(*value) {
                Color::Black => b.ink,
                Color::White => b.no_ink,
            })?;
        }
        w.write_char(b.right)?;
        w.write_char('\n')?;
    }
    border(w, &b.bottom, width)
}

/// Write decoded rows as a plain PBM (`P1`) file
pub fn write_pbm<W: io::Write, R: AsRef<[u8]>>(
    writer: &mut W,
    rows: &[R],
    pixels: PixelValues,
) -> io::Result<()> {
    let width = rows.first().map_or(0, |row| row.as_ref().len());
    writeln!(writer, "P1 {} {}", width, rows.len())?;
    for row in rows {
        for value in row.as_ref() {
            // PBM: 1 is black, 0 is white
            let v = match pixels.color(*value) {
                Color::Black => 1,
                Color::White => 0,
            };
            write!(writer, "{:b}", v)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
