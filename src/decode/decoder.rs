// src/decode/decoder.rs

//! Bitstream decoding through a lookup table.
//!
//! Every symbol costs at most two table reads and never scans candidate
//! bit widths, so the same sequence maps directly onto a parallel-compute
//! target. Decoding is sequential within a block; independent blocks may
//! be decoded concurrently from their recorded starting offsets.

use log::debug;

use crate::container::GUARD_BYTES;
use crate::decode::error::DecodeError;
use crate::decode::lookup::SymbolLookup;
use crate::utils::error::Result;

/// Cursor over a packed bitstream, gathering 16-bit windows.
struct WindowCursor<'a> {
    code_bytes: &'a [u8],
    bits_read: u64,
}

impl<'a> WindowCursor<'a> {
    fn new(code_bytes: &'a [u8], start_bit: u64) -> Self {
        Self {
            code_bytes,
            bits_read: start_bit,
        }
    }

    /// Gathers the next 16 unread bits into a window whose most
    /// significant bit is the next bit of the stream.
    ///
    /// Reads 3 consecutive bytes: a partial byte, a whole byte, and the
    /// leading bits of a third. The stream's guard bytes keep the read in
    /// bounds for any position inside the packed section.
    fn window(&self) -> std::result::Result<u16, DecodeError> {
        let byte_offset = (self.bits_read / 8) as usize;
        let used_bits = (self.bits_read % 8) as u32;
        if byte_offset + GUARD_BYTES >= self.code_bytes.len() {
            return Err(DecodeError::Truncated {
                needed: byte_offset + GUARD_BYTES + 1,
                available: self.code_bytes.len(),
            });
        }

        let b0 = u32::from(self.code_bytes[byte_offset]);
        let b1 = u32::from(self.code_bytes[byte_offset + 1]);
        let b2 = u32::from(self.code_bytes[byte_offset + 2]);

        // Shift consumed bits off b0, then stack the three reads so the
        // results always fit 16-bit intermediates.
        let mut window = ((b0 << used_bits) & 0xFF) << 8;
        window |= b1 << used_bits;
        window |= b2 >> (8 - used_bits);
        Ok(window as u16)
    }

    #[inline]
    fn advance(&mut self, bit_width: u8) {
        self.bits_read += u64::from(bit_width);
    }
}

fn decode_into<T: SymbolLookup>(
    table: &T,
    num_symbols: usize,
    code_bytes: &[u8],
    start_bit: u64,
    out: &mut Vec<u8>,
    mut bit_offsets: Option<&mut Vec<u32>>,
) -> Result<()> {
    let mut cursor = WindowCursor::new(code_bytes, start_bit);
    for _ in 0..num_symbols {
        let window = cursor.window()?;
        let entry = table.resolve(window);
        if entry.bit_width == 0 {
            return Err(DecodeError::UnresolvedCode {
                bit_offset: cursor.bits_read,
            }
            .into());
        }
        if let Some(offsets) = bit_offsets.as_mut() {
            offsets.push((cursor.bits_read - start_bit) as u32);
        }
        cursor.advance(entry.bit_width);
        out.push(entry.symbol);
    }
    Ok(())
}

/// Decodes `num_symbols` symbols starting at `start_bit` of the packed
/// stream (guard bytes included in `code_bytes`).
pub fn decode_symbols<T: SymbolLookup>(
    table: &T,
    num_symbols: usize,
    code_bytes: &[u8],
    start_bit: u64,
) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(num_symbols);
    decode_into(table, num_symbols, code_bytes, start_bit, &mut out, None)?;
    Ok(out)
}

/// Like [`decode_symbols`], additionally recording the cumulative bit
/// offset (relative to `start_bit`) at which each symbol's code began.
pub fn decode_symbols_with_offsets<T: SymbolLookup>(
    table: &T,
    num_symbols: usize,
    code_bytes: &[u8],
    start_bit: u64,
) -> Result<(Vec<u8>, Vec<u32>)> {
    let mut out = Vec::with_capacity(num_symbols);
    let mut offsets = Vec::with_capacity(num_symbols);
    decode_into(
        table,
        num_symbols,
        code_bytes,
        start_bit,
        &mut out,
        Some(&mut offsets),
    )?;
    Ok((out, offsets))
}

/// One decoded-vs-original disagreement found by [`decode_verified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyMismatch {
    pub index: usize,
    pub expected: u8,
    pub actual: u8,
}

/// Outcome of a verified decode.
#[derive(Debug)]
pub struct VerifyReport {
    pub decoded: Vec<u8>,
    pub mismatches: Vec<VerifyMismatch>,
}

impl VerifyReport {
    /// True when the decode reproduced the original exactly.
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Opt-in diagnostic decode that compares every emitted symbol against
/// `original` and reports disagreements structurally instead of failing.
///
/// Stream-level errors (truncation, unresolved codes) still abort; only
/// symbol-value differences are collected.
pub fn decode_verified<T: SymbolLookup>(
    table: &T,
    code_bytes: &[u8],
    original: &[u8],
) -> Result<VerifyReport> {
    let decoded = decode_symbols(table, original.len(), code_bytes, 0)?;
    let mismatches = decoded
        .iter()
        .zip(original)
        .enumerate()
        .filter(|(_, (a, e))| a != e)
        .map(|(index, (&actual, &expected))| VerifyMismatch {
            index,
            expected,
            actual,
        })
        .collect();
    Ok(VerifyReport {
        decoded,
        mismatches,
    })
}

/// Decodes every block of a segmented stream, concatenating the results
/// in block order.
///
/// Each entry of `block_bit_offsets` names the starting bit of one block;
/// every block holds exactly `symbols_per_block` symbols. Blocks share
/// only the read-only table and stream, so with the `rayon` feature and
/// enough blocks they are decoded in parallel.
pub fn decode_blocks<T: SymbolLookup + Sync>(
    table: &T,
    block_bit_offsets: &[u32],
    symbols_per_block: usize,
    code_bytes: &[u8],
) -> Result<Vec<u8>> {
    debug!(
        "decoding {} blocks of {} symbols",
        block_bit_offsets.len(),
        symbols_per_block
    );

    #[cfg(feature = "rayon")]
    {
        if block_bit_offsets.len() > 10 {
            use rayon::prelude::*;
            let blocks = block_bit_offsets
                .par_iter()
                .map(|&offset| decode_symbols(table, symbols_per_block, code_bytes, u64::from(offset)))
                .collect::<Result<Vec<_>>>()?;
            return Ok(blocks.concat());
        }
    }

    let mut out = Vec::with_capacity(block_bit_offsets.len() * symbols_per_block);
    for &offset in block_bit_offsets {
        decode_into(
            table,
            symbols_per_block,
            code_bytes,
            u64::from(offset),
            &mut out,
            None,
        )?;
    }
    Ok(out)
}
