//! Per-entry CRC-32 computation.
//!
//! ZIP entries carry the standard CRC-32 (reflected polynomial 0xEDB88320,
//! initial value 0xFFFFFFFF, final XOR 0xFFFFFFFF). `crc32fast` implements
//! exactly that variant with no shared mutable state, so a fresh hasher per
//! call keeps the function pure.

use crc32fast::Hasher as Crc32Hasher;

/// Computes the CRC-32 of `data` as stored in the entry records.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = Crc32Hasher::new();
    crc.update(data);
    crc.finalize()
}
