use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use crate::query::DEFAULT_QUERY;

/// Print the internal header of SNES cartridge images
#[derive(Parser, Debug)]
#[command(name = "snes-info", author, version, about, long_about = None)]
pub struct Args {
    /// Image files to inspect; `-` reads standard input
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output template, e.g. '%{checksum}  %{filename}'
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    pub log_level: Level,
}
