//! Command-line interface for the `stowzip` packer binary.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{Archive, FinalizeOptions, Output, OutputFormat, Result};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Pack files and directories into a stored-only ZIP container.
    #[command(alias = "p")]
    Pack {
        /// One or more input files or directories. Directory inputs are
        /// packed relative to the directory itself.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// The path for the output container file (e.g., book.epub).
        #[arg(short, long)]
        output: PathBuf,

        /// Container media type, written as the leading "mimetype" entry
        /// (e.g., application/epub+zip).
        #[arg(long)]
        mimetype: Option<String>,

        /// Write the output as base64 text instead of raw bytes.
        #[arg(long)]
        base64: bool,
    },
}

/// Parses the process arguments.
pub fn run() -> Commands {
    Args::parse().command
}

/// Executes the `pack` subcommand.
pub fn run_pack(
    inputs: &[PathBuf],
    output: &Path,
    mimetype: Option<&str>,
    base64: bool,
) -> Result<()> {
    let mut archive = Archive::new();

    if let Some(media_type) = mimetype {
        archive.add(crate::MIMETYPE_PATH, media_type)?;
    }

    for input in inputs {
        if input.is_dir() {
            add_dir(&mut archive, input)?;
        } else {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.display().to_string());
            archive.add(&name, fs::read(input)?)?;
            debug!(path = %name, "added file");
        }
    }

    info!(entries = archive.len(), output = %output.display(), "packing");

    let format = if base64 { OutputFormat::Base64 } else { OutputFormat::Bytes };
    match archive.finalize(FinalizeOptions { format, content_type: None })? {
        Output::Bytes(bytes) => fs::write(output, bytes)?,
        Output::Base64(text) => fs::write(output, text)?,
        Output::Resource(res) => fs::write(output, res.data)?,
    }
    Ok(())
}

/// Walks `dir` and adds every file and subdirectory, entry paths relative
/// to `dir` with '/' separators.
fn add_dir(archive: &mut Archive, dir: &Path) -> Result<()> {
    for item in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let item = item.map_err(std::io::Error::from)?;
        let rel = item
            .path()
            .strip_prefix(dir)
            .expect("walkdir yields paths under its root");
        let mut name = zip_path(rel);
        if item.file_type().is_dir() {
            name.push('/');
            archive.add(&name, Vec::<u8>::new())?;
        } else {
            archive.add(&name, fs::read(item.path())?)?;
        }
        debug!(path = %name, "added entry");
    }
    Ok(())
}

/// Joins path components with '/' regardless of the host separator.
fn zip_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_path_uses_forward_slashes() {
        let p: PathBuf = ["meta", "info.xml"].iter().collect();
        assert_eq!(zip_path(&p), "meta/info.xml");
    }
}
