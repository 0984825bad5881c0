//! `fax-tool decode`
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use ccitt_t4_t6::{Color, PixelValues, UNICODE};
use clap::Parser;
use color_eyre::eyre::{self, eyre, WrapErr};
use image::{GrayImage, ImageFormat};
use log::{info, warn};

use super::opt::{CodecOpts, Format};

#[derive(Parser, Debug)]
/// Decode a CCITT fax stream into an image
pub struct DecodeOpts {
    /// The raw CCITT stream
    pub file: PathBuf,
    /// Where to store the output (default: `<file>.<format>`)
    #[clap(long, short)]
    pub out: Option<PathBuf>,
    /// Format of the output, "png" or "pbm" (default: from the extension of `out`)
    #[clap(long, short = 'F')]
    pub format: Option<Format>,
    /// Print the image to the console
    #[clap(long)]
    pub print: bool,

    /// Codec parameters
    #[clap(flatten)]
    pub codec: CodecOpts,
}

impl DecodeOpts {
    fn format(&self) -> Format {
        if let Some(format) = self.format {
            return format;
        }
        let ext = self.out.as_ref().and_then(|p| p.extension());
        match ext.and_then(|e| e.to_str()) {
            Some(e) => e.parse().unwrap_or_default(),
            None => Format::default(),
        }
    }
}

fn to_image(rows: &[Vec<u8>], columns: usize, pixels: PixelValues) -> Option<GrayImage> {
    let buffer = rows
        .iter()
        .flatten()
        .map(|v| match pixels.color(*v) {
            Color::White => 0xFF,
            Color::Black => 0x00,
        })
        .collect();
    GrayImage::from_vec(columns as u32, rows.len() as u32, buffer)
}

/// Run the `decode` subcommand
pub fn run(opt: DecodeOpts) -> eyre::Result<()> {
    let data = std::fs::read(&opt.file)
        .wrap_err_with(|| format!("Failed to open file: `{}`", opt.file.display()))?;
    let config = opt.codec.config()?;
    let rows = ccitt_t4_t6::decode(&data, &config)?;
    info!("Decoded {} rows of {} pixels", rows.len(), config.columns);

    if opt.print {
        let mut out = String::new();
        ccitt_t4_t6::ascii_art(&mut out, &rows, config.pixels(), UNICODE)?;
        print!("{}", out);
    }

    if rows.is_empty() {
        warn!("No rows, nothing to save");
        return Ok(());
    }

    let format = opt.format();
    let out_path = opt
        .out
        .clone()
        .unwrap_or_else(|| opt.file.with_extension(format.extension()));
    match format {
        Format::Png => {
            let image = to_image(&rows, config.columns, config.pixels())
                .ok_or_else(|| eyre!("Failed to create image"))?;
            image.save_with_format(&out_path, ImageFormat::Png)?;
        }
        Format::Pbm => {
            let file = File::create(&out_path)?;
            let mut writer = BufWriter::new(file);
            ccitt_t4_t6::write_pbm(&mut writer, &rows, config.pixels())?;
            writer.flush()?;
        }
    }
    info!("Saved image as '{}'", out_path.display());
    Ok(())
}
