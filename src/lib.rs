//! # stowzip
//!
//! A minimal, byte-exact ZIP assembler for document container formats.
//!
//! `stowzip` serializes an ordered collection of named byte buffers into a
//! conformant ZIP file using only the stored (uncompressed) method. It
//! is the packaging substrate for container formats like EPUB and ODF, where
//! the reader expects a `mimetype` entry as the very first stored record.
//!
//! ## Key Modules
//!
//! - [`archive`]: entry collection, ordering policy and the layout serializer.
//! - [`record`]: the three binary record encoders (local header, central
//!   directory header, end-of-central-directory trailer).
//! - [`checksum`]: per-entry CRC-32 computation.
//! - [`output`]: the finished archive as bytes, base64 text, or a typed resource.
//!
//! ## Example
//!
//! ```
//! use stowzip::{Archive, FinalizeOptions};
//!
//! let mut archive = Archive::new();
//! archive.add("mimetype", "application/epub+zip")?;
//! archive.add("META-INF/container.xml", "<container/>")?;
//! let output = archive.finalize(FinalizeOptions::default())?;
//! assert!(!output.into_bytes().is_empty());
//! # Ok::<(), stowzip::ZipError>(())
//! ```

pub mod archive;
pub mod checksum;
pub mod cli;
pub mod entry;
pub mod error;
pub mod output;
pub mod record;

pub use archive::{AddOptions, Archive, MIMETYPE_PATH};
pub use entry::{Entry, EntryData};
pub use error::{Result, ZipError};
pub use output::{FinalizeOptions, Output, OutputFormat, Resource};
