//! Binary record encoders for the three ZIP record kinds.
//!
//! Every multi-byte integer in the ZIP format is little-endian. Only the
//! subset needed by a stored-only, single-volume writer is emitted: version
//! 20, UTF-8 name flag set, method 0, no timestamps, no extra fields, no
//! comments, no ZIP64.

/// Signature of the per-entry local file header ("PK\x03\x04").
pub const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
/// Signature of a central directory file header ("PK\x01\x02").
pub const CENTRAL_HEADER_SIG: u32 = 0x0201_4b50;
/// Signature of the end-of-central-directory trailer ("PK\x05\x06").
pub const TRAILER_SIG: u32 = 0x0605_4b50;

/// Minimum ZIP version required to extract a stored entry.
pub const VERSION_NEEDED: u16 = 20;
/// Version-made-by advertised in the central directory.
pub const VERSION_MADE_BY: u16 = 20;
/// General purpose bit 11: file name is UTF-8.
pub const FLAG_UTF8_NAME: u16 = 0x0800;
/// Compression method 0: stored, no transformation of the data bytes.
pub const METHOD_STORED: u16 = 0;

/// Fixed size of a local file header, excluding the name bytes.
pub const LOCAL_HEADER_SIZE: usize = 30;
/// Fixed size of a central directory header, excluding the name bytes.
pub const CENTRAL_HEADER_SIZE: usize = 46;
/// Fixed size of the end-of-central-directory record.
pub const TRAILER_SIZE: usize = 22;

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Fields shared by the local and central records of one entry.
#[derive(Debug, Clone, Copy)]
pub struct EntryRecord<'a> {
    /// Entry path, already validated UTF-8 (it is a Rust `str`).
    pub path: &'a str,
    /// CRC-32 of the stored bytes.
    pub crc32: u32,
    /// Stored size. Compressed and uncompressed sizes are identical for
    /// method 0, so a single field serves both wire slots.
    pub size: u32,
}

impl<'a> EntryRecord<'a> {
    fn path_len(&self) -> u16 {
        // Length was range-checked by the archive before encoding.
        self.path.len() as u16
    }

    /// Appends the 30-byte local file header plus the path bytes to `out`.
    pub fn encode_local(&self, out: &mut Vec<u8>) {
        out.reserve(LOCAL_HEADER_SIZE + self.path.len());
        put_u32(out, LOCAL_HEADER_SIG);
        put_u16(out, VERSION_NEEDED);
        put_u16(out, FLAG_UTF8_NAME);
        put_u16(out, METHOD_STORED);
        put_u16(out, 0); // mod time: not tracked
        put_u16(out, 0); // mod date: not tracked
        put_u32(out, self.crc32);
        put_u32(out, self.size); // compressed size
        put_u32(out, self.size); // uncompressed size
        put_u16(out, self.path_len());
        put_u16(out, 0); // extra field length
        out.extend_from_slice(self.path.as_bytes());
    }

    /// Appends the 46-byte central directory header plus the path bytes.
    /// `local_offset` is the byte offset of this entry's local header from
    /// the start of the archive.
    pub fn encode_central(&self, out: &mut Vec<u8>, local_offset: u32) {
        out.reserve(CENTRAL_HEADER_SIZE + self.path.len());
        put_u32(out, CENTRAL_HEADER_SIG);
        put_u16(out, VERSION_MADE_BY);
        put_u16(out, VERSION_NEEDED);
        put_u16(out, FLAG_UTF8_NAME);
        put_u16(out, METHOD_STORED);
        put_u16(out, 0); // mod time
        put_u16(out, 0); // mod date
        put_u32(out, self.crc32);
        put_u32(out, self.size);
        put_u32(out, self.size);
        put_u16(out, self.path_len());
        put_u16(out, 0); // extra field length
        put_u16(out, 0); // comment length
        put_u16(out, 0); // disk number start
        put_u16(out, 0); // internal attributes
        put_u32(out, 0); // external attributes
        put_u32(out, local_offset);
        out.extend_from_slice(self.path.as_bytes());
    }
}

/// End-of-central-directory record, one per archive.
#[derive(Debug, Clone, Copy)]
pub struct Trailer {
    /// Number of entries in the archive (single volume, so the per-disk and
    /// total counts are the same).
    pub entry_count: u16,
    /// Byte size of the central directory block.
    pub directory_size: u32,
    /// Offset of the first central directory header from the archive start.
    pub directory_offset: u32,
}

impl Trailer {
    /// Appends the fixed 22-byte trailer to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.reserve(TRAILER_SIZE);
        put_u32(out, TRAILER_SIG);
        put_u16(out, 0); // this disk number
        put_u16(out, 0); // disk where the directory starts
        put_u16(out, self.entry_count);
        put_u16(out, self.entry_count);
        put_u32(out, self.directory_size);
        put_u32(out, self.directory_offset);
        put_u16(out, 0); // archive comment length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_header_layout() {
        let rec = EntryRecord { path: "mimetype", crc32: 0x1122_3344, size: 20 };
        let mut buf = Vec::new();
        rec.encode_local(&mut buf);

        assert_eq!(buf.len(), LOCAL_HEADER_SIZE + 8);
        assert_eq!(&buf[0..4], b"PK\x03\x04");
        assert_eq!(u16::from_le_bytes([buf[4], buf[5]]), 20); // version
        assert_eq!(u16::from_le_bytes([buf[6], buf[7]]), FLAG_UTF8_NAME);
        assert_eq!(u16::from_le_bytes([buf[8], buf[9]]), METHOD_STORED);
        assert_eq!(&buf[10..14], &[0, 0, 0, 0]); // time + date
        assert_eq!(u32::from_le_bytes([buf[14], buf[15], buf[16], buf[17]]), 0x1122_3344);
        assert_eq!(u32::from_le_bytes([buf[18], buf[19], buf[20], buf[21]]), 20);
        assert_eq!(u32::from_le_bytes([buf[22], buf[23], buf[24], buf[25]]), 20);
        assert_eq!(u16::from_le_bytes([buf[26], buf[27]]), 8); // name length
        assert_eq!(u16::from_le_bytes([buf[28], buf[29]]), 0); // extra length
        assert_eq!(&buf[30..], b"mimetype");
    }

    #[test]
    fn central_header_layout() {
        let rec = EntryRecord { path: "a.txt", crc32: 0xDEAD_BEEF, size: 7 };
        let mut buf = Vec::new();
        rec.encode_central(&mut buf, 0x0000_0123);

        assert_eq!(buf.len(), CENTRAL_HEADER_SIZE + 5);
        assert_eq!(&buf[0..4], b"PK\x01\x02");
        assert_eq!(u16::from_le_bytes([buf[4], buf[5]]), VERSION_MADE_BY);
        assert_eq!(u16::from_le_bytes([buf[6], buf[7]]), VERSION_NEEDED);
        assert_eq!(u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]), 0xDEAD_BEEF);
        // local header offset sits at bytes 42..46
        assert_eq!(u32::from_le_bytes([buf[42], buf[43], buf[44], buf[45]]), 0x123);
        assert_eq!(&buf[46..], b"a.txt");
    }

    #[test]
    fn trailer_layout() {
        let trailer = Trailer { entry_count: 3, directory_size: 159, directory_offset: 4096 };
        let mut buf = Vec::new();
        trailer.encode(&mut buf);

        assert_eq!(buf.len(), TRAILER_SIZE);
        assert_eq!(&buf[0..4], b"PK\x05\x06");
        assert_eq!(u16::from_le_bytes([buf[8], buf[9]]), 3); // entries this disk
        assert_eq!(u16::from_le_bytes([buf[10], buf[11]]), 3); // entries total
        assert_eq!(u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]), 159);
        assert_eq!(u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]), 4096);
        assert_eq!(&buf[20..22], &[0, 0]); // comment length
    }
}
