use clap::Parser;
use color_eyre::eyre;

use fax_tool::cli::{self, decode::DecodeOpts, encode::EncodeOpts};

#[derive(Parser)]
/// Encode and decode CCITT Group 3 / Group 4 fax images
enum Command {
    /// Encode a PNG or PBM image
    Encode(EncodeOpts),
    /// Decode a raw CCITT stream to a PNG or PBM image
    Decode(DecodeOpts),
}

fn main() -> eyre::Result<()> {
    let command: Command = cli::init()?;
    match command {
        Command::Encode(opt) => cli::encode::run(opt),
        Command::Decode(opt) => cli::decode::run(opt),
    }
}
