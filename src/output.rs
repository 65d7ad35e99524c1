//! Output adapter: the finished byte sequence in the form a caller needs.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::{Archive, Result};

/// Default content-type hint attached to [`Output::Resource`].
pub const DEFAULT_CONTENT_TYPE: &str = "application/zip";

/// Requested shape of the finalized archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The raw archive bytes.
    #[default]
    Bytes,
    /// Base64 text encoding of the archive bytes (standard alphabet).
    Base64,
    /// The bytes paired with a content-type hint, for callers that hand the
    /// result to a persistence or download facility.
    Resource,
}

/// Options accepted by [`Archive::finalize`].
#[derive(Debug, Clone, Default)]
pub struct FinalizeOptions {
    pub format: OutputFormat,
    /// Content-type hint for [`OutputFormat::Resource`]. Defaults to
    /// `application/zip`; EPUB exporters pass `application/epub+zip`.
    pub content_type: Option<String>,
}

/// Archive bytes with the content-type hint a delivery layer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// A finalized archive in one of the supported output forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Bytes(Vec<u8>),
    Base64(String),
    Resource(Resource),
}

impl Output {
    /// The raw bytes, decoding the base64 form if necessary. Infallible
    /// because the base64 form is produced by this crate.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Output::Bytes(bytes) => bytes,
            Output::Base64(text) => BASE64_STANDARD
                .decode(text)
                .unwrap_or_default(),
            Output::Resource(res) => res.data,
        }
    }
}

impl Archive {
    /// Serializes the archive and wraps the result in the requested form.
    ///
    /// Does not mutate the archive; each call produces a complete,
    /// independently valid output, and on failure no partial output is
    /// returned. The computation is pure and CPU-bound, so the call is
    /// synchronous; callers with a deferred-result interface can wrap it.
    pub fn finalize(&self, options: FinalizeOptions) -> Result<Output> {
        let bytes = self.serialize()?;
        Ok(match options.format {
            OutputFormat::Bytes => Output::Bytes(bytes),
            OutputFormat::Base64 => Output::Base64(BASE64_STANDARD.encode(&bytes)),
            OutputFormat::Resource => Output::Resource(Resource {
                data: bytes,
                content_type: options
                    .content_type
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            }),
        })
    }
}
