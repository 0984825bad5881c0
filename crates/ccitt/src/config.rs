//! # Codec parameters
//!
//! The fields and defaults follow the parameter dictionary of the PDF
//! `CCITTFaxDecode` filter.

use crate::{bits::FillOrder, PixelValues};

/// The coding scheme selected by `K`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scheme {
    /// Pure one-dimensional coding (T.4 MH), `K = 0`
    G3OneD,
    /// Mixed coding (T.4 MR), `K > 0`: each 1D row is followed by up to `k - 1` 2D rows
    G3TwoD {
        /// The period of 1D rows
        k: usize,
    },
    /// Pure two-dimensional coding (T.6 MMR), `K < 0`
    G4,
}

/// Parameters for one encode or decode call
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct CodecConfig {
    /// The coding scheme, see [`Scheme`]
    #[cfg_attr(feature = "serde", serde(rename = "K"))]
    pub k: i32,
    /// Whether every row is preceded by an EOL code
    pub end_of_line: bool,
    /// Whether every encoded row starts on a byte boundary
    pub encoded_byte_align: bool,
    /// The width of the image in pixels
    pub columns: usize,
    /// The height of the image in pixels, or 0 if unknown
    ///
    /// When decoding, this is also the upper bound for the number of rows.
    pub rows: usize,
    /// Whether the data ends with RTC (G3) or EOFB (G4)
    pub end_of_block: bool,
    /// Whether `1` is black and `0` is white
    pub black_is_1: bool,
    /// How many damaged rows to replace with white rows before failing
    pub damaged_rows_before_error: usize,
    /// The order of bits in a byte
    pub fill_order: FillOrder,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            k: 0,
            end_of_line: false,
            encoded_byte_align: false,
            columns: 1728,
            rows: 0,
            end_of_block: true,
            black_is_1: false,
            damaged_rows_before_error: 0,
            fill_order: FillOrder::MsbToLsb,
        }
    }
}

impl CodecConfig {
    /// Create a configuration for an image of the given width
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Set `K`
    pub fn with_k(mut self, k: i32) -> Self {
        self.k = k;
        self
    }

    /// The coding scheme selected by `K`
    pub fn scheme(&self) -> Scheme {
        match self.k {
            0 => Scheme::G3OneD,
            k if k > 0 => Scheme::G3TwoD { k: k as usize },
            _ => Scheme::G4,
        }
    }

    /// The pixel values selected by `BlackIs1`
    pub fn pixels(&self) -> PixelValues {
        PixelValues::new(self.black_is_1)
    }

    /// Whether a damaged row can be skipped by resynchronizing at the next EOL
    pub(crate) fn can_recover(&self) -> bool {
        self.damaged_rows_before_error > 0 && self.k >= 0 && self.end_of_line
    }
}
