// src/container.rs

//! Binary container layout shared by producer and consumer.
//!
//! | Section          | Size     | Content                                  |
//! |------------------|----------|------------------------------------------|
//! | Magic            | 4 bytes  | `0xFFEEEEDD`, little-endian              |
//! | Original length  | 4 bytes  | uncompressed byte count, little-endian   |
//! | Canonical header | 256 bytes| per-symbol bit width, 0 = unused         |
//! | Packed codes     | variable | MSB-first code bits, zero-padded         |
//! | Guard bytes      | 2 bytes  | always zero, allow 3-byte read-ahead     |

use std::io::Write;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::decode::error::DecodeError;
use crate::encode::canonical::MAX_SYMBOLS;
use crate::utils::error::Result;

/// Sentinel value identifying an encoded stream.
pub const MAGIC: u32 = 0xFFEE_EEDD;

/// Bytes occupied by the magic and original-length fields.
pub const FILE_HEADER_SIZE: usize = 8;

/// Zero bytes appended after the packed codes so the decoder's 3-byte
/// window gather never reads out of bounds.
pub const GUARD_BYTES: usize = 2;

/// Writes the file header, canonical header, and packed code section
/// (guard bytes included in `code_bytes`).
pub fn write_container<W: Write>(
    writer: &mut W,
    original_len: u32,
    canonical_header: &[u8; MAX_SYMBOLS],
    code_bytes: &[u8],
) -> Result<()> {
    writer.write_u32::<LittleEndian>(MAGIC)?;
    writer.write_u32::<LittleEndian>(original_len)?;
    writer.write_all(canonical_header)?;
    writer.write_all(code_bytes)?;
    Ok(())
}

/// Borrowed view of a parsed container.
pub struct Container<'a> {
    pub original_len: u32,
    pub canonical_header: &'a [u8; MAX_SYMBOLS],
    /// Packed code bytes including the trailing guard bytes.
    pub code_bytes: &'a [u8],
}

/// Parses and validates the container sections of `bytes`.
pub fn parse_container(bytes: &[u8]) -> Result<Container<'_>> {
    let min_len = FILE_HEADER_SIZE + MAX_SYMBOLS + GUARD_BYTES;
    if bytes.len() < min_len {
        return Err(DecodeError::Truncated {
            needed: min_len,
            available: bytes.len(),
        }
        .into());
    }

    let mut header = &bytes[..FILE_HEADER_SIZE];
    let magic = header.read_u32::<LittleEndian>()?;
    if magic != MAGIC {
        return Err(DecodeError::BadMagic(magic).into());
    }
    let original_len = header.read_u32::<LittleEndian>()?;

    let canonical_header: &[u8; MAX_SYMBOLS] = bytes
        [FILE_HEADER_SIZE..FILE_HEADER_SIZE + MAX_SYMBOLS]
        .try_into()
        .map_err(|_| DecodeError::Truncated {
            needed: min_len,
            available: bytes.len(),
        })?;

    Ok(Container {
        original_len,
        canonical_header,
        code_bytes: &bytes[FILE_HEADER_SIZE + MAX_SYMBOLS..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_sections() {
        let mut header = [0u8; MAX_SYMBOLS];
        header[7] = 1;
        let code_bytes = [0b0101_0000, 0, 0];

        let mut out = Vec::new();
        write_container(&mut out, 4, &header, &code_bytes).unwrap();

        let parsed = parse_container(&out).unwrap();
        assert_eq!(parsed.original_len, 4);
        assert_eq!(parsed.canonical_header[7], 1);
        assert_eq!(parsed.code_bytes, &code_bytes);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut out = Vec::new();
        write_container(&mut out, 0, &[0u8; MAX_SYMBOLS], &[0, 0]).unwrap();
        out[3] = 0x00;
        assert!(parse_container(&out).is_err());
    }

    #[test]
    fn rejects_short_input() {
        assert!(parse_container(&[0u8; 12]).is_err());
    }
}
