// src/decode/mod.rs

//! Decode path: header parsing and validation, lookup-table construction,
//! and table-driven bitstream decoding.

pub mod context;
pub mod decoder;
pub mod error;
pub mod lookup;

#[cfg(test)]
mod tests;

pub use context::CodecContext;
pub use decoder::{
    VerifyMismatch, VerifyReport, decode_blocks, decode_symbols, decode_symbols_with_offsets,
    decode_verified,
};
pub use error::DecodeError;
pub use lookup::{
    DEFAULT_TABLE1_BITS, DEFAULT_TABLE2_BITS, LookupEntry, LookupTable, SplitLookupTables,
    SymbolLookup,
};
