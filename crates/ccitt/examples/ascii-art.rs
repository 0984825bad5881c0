use std::path::PathBuf;

use ccitt_t4_t6::{ascii_art, decode, CodecConfig, ASCII, UNICODE};
use clap::Parser;
use color_eyre::eyre;

#[derive(Parser)]
/// load a CCITT encoded file and write it to console
struct Options {
    /// path to input file
    file: PathBuf,
    /// assume width of the image
    #[clap(long)]
    width: usize,
    /// 0 for Group 3 1D, > 0 for Group 3 2D, < 0 for Group 4
    #[clap(short, long, default_value = "-1", allow_hyphen_values = true)]
    k: i32,
    /// treat 1 bits as black
    #[clap(long)]
    black_is_1: bool,
    /// only use ASCII characters
    #[clap(long)]
    ascii: bool,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Options::parse();
    let file = std::fs::read(&opt.file)?;

    let mut config = CodecConfig::new(opt.width).with_k(opt.k);
    config.black_is_1 = opt.black_is_1;
    let rows = decode(&file, &config)?;

    let drawing = if opt.ascii { ASCII } else { UNICODE };
    let mut string = String::new();
    ascii_art(&mut string, &rows, config.pixels(), drawing)?;
    print!("{}", string);

    Ok(())
}
