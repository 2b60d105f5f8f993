//! Export the events OpenAPI document as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use events_backend::doc::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Write the events API OpenAPI document as JSON",
    version
)]
struct CliArgs {
    /// Destination file. Writes to stdout when omitted.
    #[arg(long, short, value_name = "path")]
    output: Option<PathBuf>,
    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

fn render(compact: bool) -> io::Result<String> {
    let doc = ApiDoc::openapi();
    let json = if compact {
        doc.to_json()
    } else {
        doc.to_pretty_json()
    };
    json.map_err(io::Error::other)
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let json = render(args.compact)?;
    match args.output {
        Some(path) => fs::write(path, json),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")
        }
    }
}
