#![warn(missing_docs)]
//! CCITT fax encodings
//!
//! Implements ITU-T T.4 (Group 3, one- and two-dimensional) and T.6
//! (Group 4) coding of bi-level images, as used by the `CCITTFaxDecode`
//! filter in PDF and by TIFF.
//!
//! ```
//! use ccitt_t4_t6::{decode, encode, CodecConfig};
//!
//! let config = CodecConfig::new(8).with_k(-1);
//! let rows = vec![vec![1u8, 1, 1, 1, 1, 1, 1, 0]];
//! let data = encode(&rows, &config).unwrap();
//! assert_eq!(decode(&data, &config).unwrap(), rows);
//! ```

mod ascii_art;
pub mod bits;
mod color;
mod config;
mod error;
pub mod frame;
pub mod g3;
pub mod g42d;
pub mod line;
pub mod tables;
pub mod tree;

pub use ascii_art::{ascii_art, write_pbm, BorderDrawing, BoxDrawing, ASCII, UNICODE};
pub use bits::FillOrder;
pub use color::{Color, PixelValues};
pub use config::{CodecConfig, Scheme};
pub use error::{FaxError, FaxResult};

/// Encode rows of pixels
///
/// Every row must have at least `columns` pixels. A pixel is black if it is
/// equal to the black value selected by `BlackIs1`, and white otherwise.
pub fn encode<R: AsRef<[u8]>>(rows: &[R], config: &CodecConfig) -> FaxResult<Vec<u8>> {
    frame::Encoder::new(config)?.encode(rows)
}

/// Decode rows of pixels
///
/// Every returned row has `columns` pixels, each one of the two values
/// selected by `BlackIs1`.
///
/// With `Rows = 0` the number of rows is only bounded by the input. A 2D row
/// can be as short as a single bit, so every input byte may expand to eight
/// rows of `columns` bytes each. Set `Rows` to limit the output of untrusted
/// data.
pub fn decode(data: &[u8], config: &CodecConfig) -> FaxResult<Vec<Vec<u8>>> {
    let data = config.fill_order.normalize(data);
    frame::Decoder::new(config)?.decode(&data)
}
