//! In-memory archive assembly and the two-sweep layout serializer.
//!
//! An [`Archive`] owns an ordered list of entries and turns them into the
//! final byte sequence: local header + data pairs in order, then the central
//! directory, then exactly one trailer. Offsets are computed forward-only
//! during the placement sweep and never backpatched.

use tracing::debug;

use crate::checksum::crc32;
use crate::entry::{Entry, EntryData};
use crate::record::{EntryRecord, Trailer};
use crate::{Result, ZipError};

/// Reserved path of the container type-declaration entry.
///
/// EPUB and ODF readers identify the container by inspecting the first stored
/// record, so an entry with this exact path is always placed first in the
/// output regardless of when it was added.
pub const MIMETYPE_PATH: &str = "mimetype";

/// Options accepted by [`Archive::add_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// Replace an existing entry with the same path in place. Without this,
    /// adding a duplicate path is an error.
    pub overwrite: bool,
}

/// An ordered collection of named byte buffers, serializable to a
/// stored-only ZIP container.
///
/// Entries are append-only and immutable once added. Serialization does not
/// mutate the archive, so an unmodified archive yields byte-identical output
/// on every call.
#[derive(Debug, Default)]
pub struct Archive {
    entries: Vec<Entry>,
}

impl Archive {
    /// Creates an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry. Returns `&mut Self` so calls can be chained.
    ///
    /// `content` may be raw bytes or UTF-8 text; use [`Archive::add_base64`]
    /// or an explicit [`EntryData::Base64`] for base64 payloads. Duplicate
    /// paths are rejected (see [`Archive::add_with`]).
    pub fn add(&mut self, path: &str, content: impl Into<EntryData>) -> Result<&mut Self> {
        self.add_with(path, content.into(), AddOptions::default())
    }

    /// Appends one entry whose content is base64 text, decoded immediately.
    pub fn add_base64(&mut self, path: &str, content: &str) -> Result<&mut Self> {
        self.add_with(path, EntryData::Base64(content.to_string()), AddOptions::default())
    }

    /// Appends one entry with explicit options.
    pub fn add_with(
        &mut self,
        path: &str,
        content: EntryData,
        options: AddOptions,
    ) -> Result<&mut Self> {
        if path.len() > u16::MAX as usize {
            return Err(ZipError::FieldOverflow {
                field: "entry path length",
                value: path.len() as u64,
            });
        }
        let entry = Entry::new(path.to_string(), content)?;
        match self.entries.iter().position(|e| e.path() == path) {
            Some(i) if options.overwrite => {
                // Replacement keeps the original position.
                self.entries[i] = entry;
            }
            Some(_) => return Err(ZipError::DuplicatePath(path.to_string())),
            None => self.entries.push(entry),
        }
        Ok(self)
    }

    /// Number of entries currently in the archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries have been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::path)
    }

    /// Entries in output order: the `mimetype` entry (if any) first, every
    /// other entry in its original insertion order.
    ///
    /// A single-pass partition rather than a sort, so correctness does not
    /// rest on sort stability. No-op when the marker is absent or the
    /// archive holds fewer than two entries.
    fn ordered(&self) -> Vec<&Entry> {
        let mut marker = None;
        let mut rest = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if marker.is_none() && entry.path() == MIMETYPE_PATH {
                marker = Some(entry);
            } else {
                rest.push(entry);
            }
        }
        let mut ordered = Vec::with_capacity(self.entries.len());
        ordered.extend(marker);
        ordered.append(&mut rest);
        ordered
    }

    /// Serializes the archive to its complete byte sequence.
    ///
    /// Two sweeps over the ordered entries: the placement sweep emits each
    /// local header immediately followed by the entry's data and records the
    /// header's offset; the directory sweep emits one central directory
    /// header per recorded offset. One trailer closes the output. On any
    /// error no partial output is returned.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let ordered = self.ordered();

        let entry_count = u16::try_from(ordered.len()).map_err(|_| ZipError::FieldOverflow {
            field: "entry count",
            value: ordered.len() as u64,
        })?;

        let mut out = Vec::new();
        let mut placed: Vec<(EntryRecord<'_>, u32)> = Vec::with_capacity(ordered.len());

        // Placement sweep: header + data pairs, forward-only offsets.
        for entry in ordered {
            let offset = field_u32("local header offset", out.len() as u64)?;
            let size = field_u32("entry data size", entry.data().len() as u64)?;
            let record = EntryRecord {
                path: entry.path(),
                crc32: crc32(entry.data()),
                size,
            };
            record.encode_local(&mut out);
            out.extend_from_slice(entry.data());
            placed.push((record, offset));
        }

        // Directory sweep: one central header per placed entry, same order.
        let directory_offset = field_u32("central directory offset", out.len() as u64)?;
        for (record, local_offset) in &placed {
            record.encode_central(&mut out, *local_offset);
        }
        let directory_size = field_u32(
            "central directory size",
            out.len() as u64 - directory_offset as u64,
        )?;

        Trailer {
            entry_count,
            directory_size,
            directory_offset,
        }
        .encode(&mut out);

        debug!(
            entries = entry_count,
            directory_offset, directory_size, total = out.len(),
            "archive serialized"
        );
        Ok(out)
    }
}

fn field_u32(field: &'static str, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| ZipError::FieldOverflow { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CENTRAL_HEADER_SIZE, LOCAL_HEADER_SIZE, TRAILER_SIZE};

    fn trailer_fields(out: &[u8]) -> (u16, u32, u32) {
        let t = &out[out.len() - TRAILER_SIZE..];
        (
            u16::from_le_bytes([t[8], t[9]]),
            u32::from_le_bytes([t[12], t[13], t[14], t[15]]),
            u32::from_le_bytes([t[16], t[17], t[18], t[19]]),
        )
    }

    #[test]
    fn empty_archive_is_just_a_trailer() {
        let out = Archive::new().serialize().unwrap();
        assert_eq!(out.len(), TRAILER_SIZE);
        let (count, dir_size, dir_offset) = trailer_fields(&out);
        assert_eq!(count, 0);
        assert_eq!(dir_size, 0);
        assert_eq!(dir_offset, 0);
    }

    #[test]
    fn mimetype_entry_is_moved_first() {
        let mut archive = Archive::new();
        archive
            .add("meta/info.xml", "<xml/>")
            .unwrap()
            .add("mimetype", "application/epub+zip")
            .unwrap()
            .add("content/body.xml", "<html/>")
            .unwrap();
        let out = archive.serialize().unwrap();

        // First local header names "mimetype".
        let name_len = u16::from_le_bytes([out[26], out[27]]) as usize;
        assert_eq!(&out[30..30 + name_len], b"mimetype");

        // Remaining entries keep their relative insertion order.
        let info = out.windows(13).position(|w| w == b"meta/info.xml").unwrap();
        let body = out
            .windows(16)
            .position(|w| w == b"content/body.xml")
            .unwrap();
        assert!(info < body);
    }

    #[test]
    fn ordering_is_a_noop_without_marker() {
        let mut archive = Archive::new();
        archive.add("b", "1").unwrap().add("a", "2").unwrap();
        let ordered: Vec<_> = archive.ordered().iter().map(|e| e.path()).collect();
        assert_eq!(ordered, ["b", "a"]);
    }

    #[test]
    fn trailer_offset_covers_all_header_data_pairs() {
        let mut archive = Archive::new();
        archive.add("a.txt", "hello").unwrap().add("dir/", "").unwrap();
        let out = archive.serialize().unwrap();

        let expected_dir_offset =
            (LOCAL_HEADER_SIZE + 5 + 5) + (LOCAL_HEADER_SIZE + 4);
        let (count, dir_size, dir_offset) = trailer_fields(&out);
        assert_eq!(count, 2);
        assert_eq!(dir_offset as usize, expected_dir_offset);
        assert_eq!(
            dir_size as usize,
            (CENTRAL_HEADER_SIZE + 5) + (CENTRAL_HEADER_SIZE + 4)
        );
        assert_eq!(
            out.len(),
            expected_dir_offset + dir_size as usize + TRAILER_SIZE
        );
    }

    #[test]
    fn serialize_is_idempotent() {
        let mut archive = Archive::new();
        archive
            .add("mimetype", "text/x-example")
            .unwrap()
            .add("data.bin", vec![0u8, 1, 2, 3])
            .unwrap();
        assert_eq!(archive.serialize().unwrap(), archive.serialize().unwrap());
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let mut archive = Archive::new();
        archive.add("a.txt", "one").unwrap();
        let err = archive.add("a.txt", "two").unwrap_err();
        assert!(matches!(err, ZipError::DuplicatePath(_)));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn overwrite_replaces_in_place() {
        let mut archive = Archive::new();
        archive.add("a.txt", "one").unwrap().add("b.txt", "x").unwrap();
        archive
            .add_with("a.txt", EntryData::from("two"), AddOptions { overwrite: true })
            .unwrap();

        assert_eq!(archive.len(), 2);
        let paths: Vec<_> = archive.paths().collect();
        assert_eq!(paths, ["a.txt", "b.txt"]);
        assert_eq!(archive.entries[0].data(), b"two");
    }

    #[test]
    fn entry_count_overflow_is_detected() {
        let mut archive = Archive::new();
        for i in 0..=u16::MAX as u32 {
            archive
                .entries
                .push(Entry::new(format!("e{i}"), EntryData::Bytes(Vec::new())).unwrap());
        }
        let err = archive.serialize().unwrap_err();
        assert!(matches!(
            err,
            ZipError::FieldOverflow { field: "entry count", .. }
        ));
    }

    #[test]
    fn oversized_path_overflows() {
        let mut archive = Archive::new();
        let long_path = "x".repeat(u16::MAX as usize + 1);
        let err = archive.add(&long_path, "").unwrap_err();
        assert!(matches!(
            err,
            ZipError::FieldOverflow { field: "entry path length", .. }
        ));
    }
}
