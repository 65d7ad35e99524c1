use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ZipError>;

/// The primary error type for all operations in the `stowzip` crate.
#[derive(Debug, Error)]
pub enum ZipError {
    /// Base64 content handed to `add` could not be decoded.
    #[error("malformed base64 content for '{path}': {source}")]
    Base64 {
        path: String,
        #[source]
        source: base64::DecodeError,
    },

    /// An entry with the same path was already added and no overwrite was requested.
    #[error("duplicate entry path '{0}' (pass AddOptions::overwrite to replace)")]
    DuplicatePath(String),

    /// A directory entry (path ending in '/') was given non-empty data.
    #[error("directory entry '{0}' must have empty data")]
    DirectoryWithData(String),

    /// A size, offset or count does not fit its fixed-width field in the
    /// ZIP records. The archive is not ZIP64-capable.
    #[error("{field} ({value}) exceeds the ZIP format limit")]
    FieldOverflow { field: &'static str, value: u64 },

    /// An I/O error occurred, typically while reading an input file or
    /// writing the finished archive in the CLI.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
