// src/decode/context.rs

//! Decode-side codec state parsed from a canonical header.

use crate::decode::lookup::{LookupTable, SplitLookupTables};
use crate::encode::canonical::{self, MAX_SYMBOLS};
use crate::utils::error::Result;

/// A parsed and validated canonical header plus its regenerated code
/// table.
///
/// The context is immutable once built and carries no process-global
/// state: any number of codecs can coexist, and a context may be shared
/// read-only across concurrent decode workers.
#[derive(Debug, Clone)]
pub struct CodecContext {
    widths: [u8; MAX_SYMBOLS],
    codes: [u16; MAX_SYMBOLS],
    used_symbols: usize,
}

impl CodecContext {
    /// Parses a 256-byte canonical header, validating widths and Kraft
    /// equality before regenerating the left-justified code table.
    pub fn from_canonical_header(header: &[u8; MAX_SYMBOLS]) -> Result<Self> {
        let used_symbols = canonical::validate_widths(header)?;
        let codes = canonical::assign_codes(header);
        Ok(Self {
            widths: *header,
            codes,
            used_symbols,
        })
    }

    /// Per-symbol bit widths (0 = unused).
    #[inline]
    pub fn widths(&self) -> &[u8; MAX_SYMBOLS] {
        &self.widths
    }

    /// Per-symbol left-justified canonical codes; meaningful only where
    /// the width is nonzero.
    #[inline]
    pub fn codes(&self) -> &[u16; MAX_SYMBOLS] {
        &self.codes
    }

    /// Number of symbols with a nonzero width.
    #[inline]
    pub fn used_symbols(&self) -> usize {
        self.used_symbols
    }

    /// Used symbols in ascending order with their widths and codes.
    pub(crate) fn used(&self) -> impl Iterator<Item = (u8, u8, u16)> + '_ {
        self.widths
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w > 0)
            .map(|(s, &w)| (s as u8, w, self.codes[s]))
    }

    /// Builds the dense 65536-entry decode table for this header.
    pub fn build_lookup_table(&self) -> Result<LookupTable> {
        LookupTable::build(self)
    }

    /// Builds the two-level split decode tables for this header.
    ///
    /// `table1_bits + table2_bits` must equal 16.
    pub fn build_split_tables(
        &self,
        table1_bits: u32,
        table2_bits: u32,
    ) -> Result<SplitLookupTables> {
        SplitLookupTables::build(self, table1_bits, table2_bits)
    }
}
