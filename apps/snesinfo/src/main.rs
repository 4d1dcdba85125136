mod args;
mod query;

use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use snesinfo_core::{RomHeader, decode_header};
use tracing::{debug, error};
use tracing_subscriber::FmtSubscriber;

use crate::{args::Args, query::Query};

const STDIN_PATH: &str = "-";

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let query = Query::new(args.query);
    let mut failed = false;
    for path in &args.paths {
        match inspect(path) {
            Ok(header) => println!("{}", query.render(&header)),
            Err(err) => {
                error!("{}: {err:#}", path.display());
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn inspect(path: &Path) -> Result<RomHeader> {
    let (filename, bytes) = if path.as_os_str() == STDIN_PATH {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("reading standard input")?;
        (STDIN_PATH.to_owned(), bytes)
    } else {
        let bytes = fs::read(path).context("reading image")?;
        (path.display().to_string(), bytes)
    };

    debug!(%filename, size = bytes.len(), "read image");
    let header = decode_header(&filename, &bytes, bytes.len() as u64)?;
    Ok(header)
}
