use thiserror::Error;

use crate::Color;

/// An error when encoding or decoding a CCITT bi-level image
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FaxError {
    /// No 2D mode code matches the bits at the cursor
    #[error("Invalid 2D control code at bit {bit_pos}")]
    InvalidControlCode {
        /// Absolute bit position of the failed lookup
        bit_pos: usize,
    },

    /// No run-length code matches the bits at the cursor (1D row or horizontal mode)
    #[error("Invalid {color:?} run code at bit {bit_pos}")]
    InvalidRunCode {
        /// The color of the run being decoded
        color: Color,
        /// Absolute bit position of the failed lookup
        bit_pos: usize,
    },

    /// `EndOfLine` is set, but a row did not start with an EOL
    #[error("No EOL found before row {row}")]
    MissingEol {
        /// Index of the row that was about to be decoded
        row: usize,
    },

    /// A return-to-control sequence was cut short by other data
    #[error("Corrupt RTC: found {eols} EOL codes, expected 6")]
    RtcCorrupt {
        /// The number of consecutive EOLs found
        eols: usize,
    },

    /// An EOL at the start of a G4 row was not followed by a second one
    #[error("Corrupt EOFB at bit {bit_pos}")]
    EofbCorrupt {
        /// Absolute bit position after the first EOL
        bit_pos: usize,
    },

    /// The input ended in the middle of a code
    #[error("Unexpected end of data at bit {bit_pos}")]
    BufferExhausted {
        /// Absolute bit position of the fetch
        bit_pos: usize,
    },

    /// A changing element was decoded past the end of the row
    #[error("Out of bounds ({pos} > {columns}) in row {row}")]
    OutOfBounds {
        /// Index of the row
        row: usize,
        /// The decoded position
        pos: usize,
        /// The configured width
        columns: usize,
    },

    /// Uncompressed mode and other extensions are not supported
    #[error("Extensions are not supported (bit {bit_pos})")]
    ExtensionNotSupported {
        /// Absolute bit position of the extension code
        bit_pos: usize,
    },

    /// An input row given to the encoder is narrower than `Columns`
    #[error("Row {row} has {len} pixels, expected {columns}")]
    RowLength {
        /// Index of the row
        row: usize,
        /// Number of pixels in the row
        len: usize,
        /// The configured width
        columns: usize,
    },

    /// `Columns` must be at least 1
    #[error("Columns must be positive")]
    InvalidColumns,
}

impl FaxError {
    /// Attach a row index to errors that carry one
    pub(crate) fn in_row(self, row: usize) -> Self {
        match self {
            FaxError::OutOfBounds { pos, columns, .. } => FaxError::OutOfBounds { row, pos, columns },
            other => other,
        }
    }
}

/// Type alias for convenience
pub type FaxResult<T> = Result<T, FaxError>;
