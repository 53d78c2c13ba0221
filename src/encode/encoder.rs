// src/encode/encoder.rs

//! Encode-session orchestration: frequency analysis, tree construction,
//! canonical assignment, and bit packing in one pass over the input.

use std::io::Write;

use log::debug;

use crate::container;
use crate::encode::bitstream::BitWriter;
use crate::encode::canonical::{self, MAX_SYMBOLS};
use crate::encode::frequency::FrequencyTable;
use crate::encode::tree::HuffmanTree;
use crate::utils::error::{HuffmanError, Result};

/// Canonical-Huffman encoder for byte inputs.
pub struct HuffmanEncoder;

impl HuffmanEncoder {
    /// Encodes `bytes` into a packed bitstream plus the canonical header
    /// describing its code.
    ///
    /// Fails with `EmptyInput` for an empty input and `BitWidthOverflow`
    /// when the frequency distribution would require a code wider than 16
    /// bits.
    pub fn encode(bytes: &[u8]) -> Result<EncodedStream> {
        if bytes.len() > u32::MAX as usize {
            return Err(HuffmanError::InvalidArg(format!(
                "input of {} bytes exceeds the 32-bit length field",
                bytes.len()
            )));
        }

        let frequencies = FrequencyTable::from_bytes(bytes);
        let tree = HuffmanTree::build(&frequencies)?;
        let widths = tree.bit_widths()?;
        let codes = canonical::assign_codes(&widths);

        let mut writer = BitWriter::new(Vec::with_capacity(bytes.len()));
        let mut symbol_bit_offsets = Vec::with_capacity(bytes.len());
        for &b in bytes {
            symbol_bit_offsets.push(writer.bit_offset() as u32);
            writer.write_code(codes[b as usize], widths[b as usize])?;
        }
        let packed_bits = writer.bit_offset();
        let mut code_bytes = writer.into_inner()?;

        // The decoder gathers a 16-bit window by reading up to 2 bytes past
        // the current one; two zero guard bytes keep that read in bounds.
        code_bytes.extend_from_slice(&[0u8; container::GUARD_BYTES]);

        debug!(
            "encoded {} bytes ({} active symbols) into {} code bits",
            bytes.len(),
            frequencies.active_symbols(),
            packed_bits
        );

        Ok(EncodedStream {
            original_len: bytes.len() as u32,
            widths,
            code_bytes,
            symbol_bit_offsets,
        })
    }
}

/// The product of one encode session: the canonical header, the packed
/// code bytes (guard bytes included), and the bit offset at which every
/// symbol's code begins.
pub struct EncodedStream {
    original_len: u32,
    widths: [u8; MAX_SYMBOLS],
    code_bytes: Vec<u8>,
    symbol_bit_offsets: Vec<u32>,
}

impl EncodedStream {
    /// Original uncompressed byte count.
    #[inline]
    pub fn original_len(&self) -> u32 {
        self.original_len
    }

    /// The 256-byte canonical header: per-symbol bit width, 0 = unused.
    #[inline]
    pub fn canonical_header(&self) -> &[u8; MAX_SYMBOLS] {
        &self.widths
    }

    /// Packed code bytes, zero-padded to a byte boundary and followed by
    /// the two zero guard bytes.
    #[inline]
    pub fn code_bytes(&self) -> &[u8] {
        &self.code_bytes
    }

    /// Bit offset at which each input symbol's code begins.
    #[inline]
    pub fn symbol_bit_offsets(&self) -> &[u32] {
        &self.symbol_bit_offsets
    }

    /// Maps symbol indices to their starting bit offsets.
    ///
    /// Block starting positions cannot be computed from the block size
    /// alone, because code lengths vary; this consults the per-symbol
    /// record instead.
    pub fn lookup_bit_offsets(&self, symbol_indices: &[u32]) -> Result<Vec<u32>> {
        let mut offsets = Vec::with_capacity(symbol_indices.len());
        for &index in symbol_indices {
            let offset = self.symbol_bit_offsets.get(index as usize).ok_or_else(|| {
                HuffmanError::InvalidArg(format!(
                    "symbol index {} out of range for {} encoded symbols",
                    index,
                    self.symbol_bit_offsets.len()
                ))
            })?;
            offsets.push(*offset);
        }
        Ok(offsets)
    }

    /// Writes the full container (file header, canonical header, packed
    /// codes, guard bytes) to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        container::write_container(writer, self.original_len, &self.widths, &self.code_bytes)
    }

    /// Serializes the full container into a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(
            container::FILE_HEADER_SIZE + MAX_SYMBOLS + self.code_bytes.len(),
        );
        self.write_to(&mut out)?;
        Ok(out)
    }
}
