//! Command-line interface for runflags.
//!
//! Reads a JSON options document (file or stdin), builds the flag string,
//! and prints it. Unit-file generators shell out to this when they cannot
//! link the library directly.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use runflags::{build, OptionSet};

/// Build a shell-safe container runtime flag string from a JSON options
/// document.
#[derive(Parser, Debug)]
#[command(name = "runflags", version, about)]
pub struct Cli {
    /// Path to the JSON options document; reads stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Suppress the trailing newline (for byte-exact embedding).
    #[arg(long)]
    pub no_newline: bool,
}

/// Run the CLI to completion.
pub fn run(cli: Cli) -> Result<()> {
    let document = read_document(cli.input.as_deref())?;

    let options: OptionSet =
        serde_json::from_str(&document).context("parsing options document")?;

    let flags = build(&options)?;

    if cli.no_newline {
        print!("{flags}");
    } else {
        println!("{flags}");
    }
    Ok(())
}

/// Read the options document from `path`, or stdin when `path` is `None`.
fn read_document(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading options document from stdin")?;
            Ok(buf)
        }
    }
}
