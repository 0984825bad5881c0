//! Shared options
use std::{fmt, io, path::PathBuf, str::FromStr};

use ccitt_t4_t6::{CodecConfig, FillOrder};
use clap::Parser;
use thiserror::*;

/// The image format to write decoded rows into
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphic
    Png,
    /// Portable Bitmap Format (plain)
    Pbm,
}

#[derive(Debug)]
/// Failed to parse a format name
pub struct FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `png` or `pbm`")?;
        Ok(())
    }
}

impl std::error::Error for FormatError {}

impl Default for Format {
    fn default() -> Self {
        Format::Png
    }
}

impl FromStr for Format {
    type Err = FormatError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "png" => Ok(Self::Png),
            "pbm" => Ok(Self::Pbm),
            _ => Err(FormatError {}),
        }
    }
}

impl Format {
    fn to_static_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pbm => "pbm",
        }
    }

    /// The file extension for this format
    pub fn extension(self) -> &'static str {
        self.to_static_str()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_static_str())
    }
}

/// Failed to load a parameter file
#[derive(Debug, Error)]
pub enum ParamsError {
    /// Reading the file failed
    #[error("IO Error")]
    Io(#[from] io::Error),
    /// The file is not a valid parameter set
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
}

/// Codec parameters passed as command line args
#[derive(Debug, Default, Clone, Parser)]
pub struct CodecOpts {
    /// 0 for Group 3 1D, > 0 for Group 3 2D, < 0 for Group 4
    #[clap(long, short, allow_hyphen_values = true)]
    pub k: Option<i32>,
    /// The width of the image
    #[clap(long)]
    pub columns: Option<usize>,
    /// The height of the image, if known
    #[clap(long)]
    pub rows: Option<usize>,
    /// Expect an EOL code before every row
    #[clap(long)]
    pub end_of_line: bool,
    /// Start every row on a byte boundary
    #[clap(long)]
    pub byte_align: bool,
    /// Do not write / expect RTC or EOFB at the end
    #[clap(long)]
    pub no_end_of_block: bool,
    /// Treat 1 as black and 0 as white
    #[clap(long)]
    pub black_is_1: bool,
    /// Replace up to this many damaged rows with white rows
    #[clap(long)]
    pub damaged_rows: Option<usize>,
    /// Bits are packed LSB first
    #[clap(long)]
    pub lsb_first: bool,

    /// Codec parameters as a RON file, e.g. `(K: -1, Columns: 2560)`
    #[clap(long)]
    pub params: Option<PathBuf>,
}

impl CodecOpts {
    /// Load the parameter file (if any) and apply the command line args
    pub fn config(&self) -> Result<CodecConfig, ParamsError> {
        let mut config = if let Some(params_path) = &self.params {
            let text = std::fs::read_to_string(params_path)?;
            ron::from_str(&text)?
        } else {
            CodecConfig::default()
        };
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(damaged_rows) = self.damaged_rows {
            config.damaged_rows_before_error = damaged_rows;
        }
        config.end_of_line |= self.end_of_line;
        config.encoded_byte_align |= self.byte_align;
        config.end_of_block &= !self.no_end_of_block;
        config.black_is_1 |= self.black_is_1;
        if self.lsb_first {
            config.fill_order = FillOrder::LsbToMsb;
        }
        Ok(config)
    }
}
