//! Entry model: one named byte buffer destined for the archive.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::{Result, ZipError};

/// Content accepted by [`crate::Archive::add`].
///
/// The set of accepted kinds is closed: anything a caller can construct is
/// either raw bytes, UTF-8 text, or base64 text. There is no fallback path
/// that quietly substitutes an empty buffer.
#[derive(Debug, Clone)]
pub enum EntryData {
    /// Raw bytes, stored as-is.
    Bytes(Vec<u8>),
    /// UTF-8 text, stored as its byte encoding.
    Text(String),
    /// Base64 text, decoded to bytes at add time (standard alphabet).
    Base64(String),
}

impl From<Vec<u8>> for EntryData {
    fn from(bytes: Vec<u8>) -> Self {
        EntryData::Bytes(bytes)
    }
}

impl From<&[u8]> for EntryData {
    fn from(bytes: &[u8]) -> Self {
        EntryData::Bytes(bytes.to_vec())
    }
}

impl From<String> for EntryData {
    fn from(text: String) -> Self {
        EntryData::Text(text)
    }
}

impl From<&str> for EntryData {
    fn from(text: &str) -> Self {
        EntryData::Text(text.to_string())
    }
}

/// A single named byte buffer within an [`crate::Archive`].
///
/// Entries own their data; the archive copies content in on `add`, so bytes
/// can never change between checksum computation and serialization.
#[derive(Debug, Clone)]
pub struct Entry {
    path: String,
    data: Vec<u8>,
    is_dir: bool,
}

impl Entry {
    /// Builds an entry, decoding base64 content and validating the
    /// directory convention (trailing '/' means zero-length data).
    pub(crate) fn new(path: String, content: EntryData) -> Result<Self> {
        let data = match content {
            EntryData::Bytes(bytes) => bytes,
            EntryData::Text(text) => text.into_bytes(),
            EntryData::Base64(text) => BASE64_STANDARD
                .decode(text.trim())
                .map_err(|source| ZipError::Base64 { path: path.clone(), source })?,
        };
        let is_dir = path.ends_with('/');
        if is_dir && !data.is_empty() {
            return Err(ZipError::DirectoryWithData(path));
        }
        Ok(Self { path, data, is_dir })
    }

    /// The entry's path inside the archive.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The stored bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// True if the path ends in '/'. Directory entries always have empty data.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}
