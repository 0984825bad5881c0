//! `fax-tool encode`
use std::path::PathBuf;

use ccitt_t4_t6::Color;
use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use log::info;

use super::opt::CodecOpts;

#[derive(Parser, Debug)]
/// Encode an image as a CCITT fax stream
pub struct EncodeOpts {
    /// The image to encode (PNG or PBM)
    pub file: PathBuf,
    /// Where to store the output (default: `<file>.fax`)
    #[clap(long, short)]
    pub out: Option<PathBuf>,

    /// Codec parameters
    #[clap(flatten)]
    pub codec: CodecOpts,
}

/// Luma values below this are black
const THRESHOLD: u8 = 128;

/// Run the `encode` subcommand
pub fn run(opt: EncodeOpts) -> eyre::Result<()> {
    let image = image::open(&opt.file)
        .wrap_err_with(|| format!("Failed to open image `{}`", opt.file.display()))?
        .into_luma8();

    let mut config = opt.codec.config()?;
    if opt.codec.columns.is_none() {
        config.columns = image.width() as usize;
    }
    let pixels = config.pixels();
    let rows: Vec<Vec<u8>> = image
        .rows()
        .map(|row| {
            row.map(|p| pixels.value(Color::from(p.0[0] < THRESHOLD)))
                .collect()
        })
        .collect();

    let data = ccitt_t4_t6::encode(&rows, &config)?;

    let out_path = opt.out.unwrap_or_else(|| opt.file.with_extension("fax"));
    std::fs::write(&out_path, &data)?;
    info!(
        "Encoded {}x{} pixels into {} bytes (K={})",
        config.columns,
        rows.len(),
        data.len(),
        config.k
    );
    info!("Saved stream as '{}'", out_path.display());
    Ok(())
}
