// src/decode/lookup.rs

//! Decode lookup tables: a dense 65536-entry table for O(1) decode, and a
//! two-level split pair that trades one extra read for far less memory
//! (`2^k1 + groups * 2^k2` entries instead of `2^16`), which matters when
//! table storage is constrained on a parallel-compute target.

use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable, cast_slice};
use log::debug;

use crate::decode::context::CodecContext;
use crate::encode::canonical::MAX_CODE_BITS;
use crate::utils::error::{HuffmanError, Result};

/// Table1 width (in bits) used when no explicit split is requested.
pub const DEFAULT_TABLE1_BITS: u32 = 9;
/// Table2 width paired with [`DEFAULT_TABLE1_BITS`].
pub const DEFAULT_TABLE2_BITS: u32 = 7;

const FULL_TABLE_ENTRIES: usize = 1 << MAX_CODE_BITS;

/// One decode-table slot.
///
/// `bit_width == 0` means "unresolved" in a split table1 slot (where
/// `symbol` then holds a 1-based secondary-block index) and "invalid"
/// anywhere else. The layout is fixed so a whole table can be handed to a
/// parallel-compute consumer as raw bytes.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct LookupEntry {
    pub symbol: u8,
    pub bit_width: u8,
}

/// Resolves a 16-bit bitstream window to a `{symbol, bit_width}` entry.
///
/// Implemented by both table layouts so decode logic is written once.
pub trait SymbolLookup {
    fn resolve(&self, window: u16) -> LookupEntry;
}

/// Expands one symbol's left-justified code into every table slot sharing
/// its prefix: the code's field (`rshift`/`mask` select it) is fixed and
/// all free low bits are enumerated.
fn expand_symbol(
    entries: &mut [LookupEntry],
    symbol: u8,
    width: u8,
    code: u16,
    rshift: u32,
    mask: u16,
) {
    let prefix = usize::from((code >> rshift) & mask);
    let max_suffix = (0xFFFFu32 >> (rshift + u32::from(width))) as usize;
    let entry = LookupEntry {
        symbol,
        bit_width: width,
    };
    for suffix in 0..=max_suffix {
        entries[prefix | suffix] = entry;
    }
}

/// Dense full-window decode table: one entry per possible 16-bit window.
pub struct LookupTable {
    entries: Vec<LookupEntry>,
}

impl LookupTable {
    /// Builds the table by expanding every used symbol's code with all
    /// possible suffixes.
    ///
    /// Post-condition, checked unconditionally: no slot is left empty. The
    /// degenerate single-symbol header is exempt, since windows starting
    /// with a 1 bit can never occur in its streams.
    pub(crate) fn build(ctx: &CodecContext) -> Result<Self> {
        let mut entries = vec![LookupEntry::default(); FULL_TABLE_ENTRIES];
        for (symbol, width, code) in ctx.used() {
            expand_symbol(&mut entries, symbol, width, code, 0, 0xFFFF);
        }

        if ctx.used_symbols() > 1 {
            let holes = entries.iter().filter(|e| e.bit_width == 0).count();
            if holes > 0 {
                return Err(HuffmanError::HeaderCorruption(format!(
                    "full lookup table has {} unpopulated slots",
                    holes
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Number of table entries (always 65536).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw table bytes, for handing to an external compute consumer.
    pub fn as_bytes(&self) -> &[u8] {
        cast_slice(&self.entries)
    }
}

impl SymbolLookup for LookupTable {
    #[inline]
    fn resolve(&self, window: u16) -> LookupEntry {
        self.entries[window as usize]
    }
}

/// Two-level split decode tables.
///
/// Table1 covers the high `table1_bits` of a window. Codes wider than
/// `table1_bits` share table1 slots; each such slot stores a 1-based index
/// into table2, a concatenation of fixed-size `2^table2_bits` blocks, one
/// per distinct high prefix. Block 0 is a reserved all-zero sentinel so a
/// decoder may issue the second read unconditionally and discard it when
/// table1 already resolved.
pub struct SplitLookupTables {
    table1: Vec<LookupEntry>,
    table2: Vec<LookupEntry>,
    table1_bits: u32,
    table2_bits: u32,
}

impl SplitLookupTables {
    pub(crate) fn build(ctx: &CodecContext, table1_bits: u32, table2_bits: u32) -> Result<Self> {
        if table1_bits + table2_bits != u32::from(MAX_CODE_BITS)
            || table1_bits == 0
            || table2_bits == 0
        {
            return Err(HuffmanError::InvalidArg(format!(
                "split widths {} + {} must partition 16 bits",
                table1_bits, table2_bits
            )));
        }

        let table1_entries = 1usize << table1_bits;
        let table2_entries = 1usize << table2_bits;
        let mut table1 = vec![LookupEntry::default(); table1_entries];

        // Symbols that fit table1 expand directly; wider symbols group by
        // their shared high prefix, one secondary block per group.
        let mut groups: BTreeMap<u16, Vec<(u8, u8, u16)>> = BTreeMap::new();
        for (symbol, width, code) in ctx.used() {
            if u32::from(width) <= table1_bits {
                expand_symbol(
                    &mut table1,
                    symbol,
                    width,
                    code,
                    u32::from(MAX_CODE_BITS) - table1_bits,
                    (table1_entries - 1) as u16,
                );
            } else {
                let high = code >> table2_bits;
                groups.entry(high).or_default().push((symbol, width, code));
            }
        }

        // Block indices travel through the u8 symbol field, and index 0 is
        // the sentinel, leaving room for 255 groups.
        if groups.len() > 255 {
            return Err(HuffmanError::HeaderCorruption(format!(
                "{} overflow prefixes exceed the 255 secondary blocks a table1 slot can address",
                groups.len()
            )));
        }

        let mut table2 = vec![LookupEntry::default(); (groups.len() + 1) * table2_entries];
        let low_mask = (table2_entries - 1) as u16;
        for (block_index, (&high, symbols)) in groups.iter().enumerate() {
            let block_index = block_index + 1;
            let base = block_index * table2_entries;
            let block = &mut table2[base..base + table2_entries];
            for &(symbol, width, code) in symbols {
                expand_symbol(block, symbol, width, code & low_mask, 0, low_mask);
            }

            let slot = &mut table1[high as usize];
            if slot.bit_width != 0 {
                return Err(HuffmanError::HeaderCorruption(format!(
                    "prefix {:0width$b} is claimed by both a short code and an overflow group",
                    high,
                    width = table1_bits as usize
                )));
            }
            slot.symbol = block_index as u8;
        }

        // With a complete code every table1 slot either resolves a symbol
        // or forwards to a block; the degenerate header is exempt as in
        // the full-table case.
        if ctx.used_symbols() > 1 {
            let holes = table1
                .iter()
                .filter(|e| e.bit_width == 0 && e.symbol == 0)
                .count();
            if holes > 0 {
                return Err(HuffmanError::HeaderCorruption(format!(
                    "split table1 has {} slots resolving to neither symbol nor block",
                    holes
                )));
            }
        }

        debug!(
            "built split tables: {} + {} entries, {} overflow blocks",
            table1_entries,
            table2.len(),
            groups.len()
        );

        Ok(Self {
            table1,
            table2,
            table1_bits,
            table2_bits,
        })
    }

    #[inline]
    pub fn table1_bits(&self) -> u32 {
        self.table1_bits
    }

    #[inline]
    pub fn table2_bits(&self) -> u32 {
        self.table2_bits
    }

    /// Raw bytes of the primary table.
    pub fn table1_bytes(&self) -> &[u8] {
        cast_slice(&self.table1)
    }

    /// Raw bytes of the concatenated secondary blocks (sentinel block 0
    /// first).
    pub fn table2_bytes(&self) -> &[u8] {
        cast_slice(&self.table2)
    }

    /// Direct table1 probe, exposed for consumers that replicate the
    /// two-read sequence themselves.
    #[inline]
    pub fn probe_table1(&self, window: u16) -> LookupEntry {
        self.table1[usize::from(window >> self.table2_bits)]
    }
}

impl SymbolLookup for SplitLookupTables {
    #[inline]
    fn resolve(&self, window: u16) -> LookupEntry {
        let entry = self.probe_table1(window);
        if entry.bit_width != 0 {
            return entry;
        }
        let low = usize::from(window) & ((1usize << self.table2_bits) - 1);
        self.table2[(usize::from(entry.symbol) << self.table2_bits) + low]
    }
}
