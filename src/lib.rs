//! A canonical-Huffman entropy codec for byte streams, built for
//! table-driven decoding without backtracking.
//!
//! The encoder builds an optimal prefix code over the 256-value byte
//! alphabet, ships it as a compact 256-byte canonical header, and packs
//! codes MSB-first. The decoder regenerates the code from the header and
//! resolves symbols through either a dense 65536-entry table (one read
//! per symbol) or a memory-lean two-level split table pair (at most two
//! reads), so per-symbol work is constant and branch-free enough for a
//! parallel consumer. Per-block bit offset tables let independent workers
//! decode fixed-size blocks concurrently.
//!
//! # Quick Start
//!
//! ```
//! use blockhuff::{decode_bytes, encode_bytes};
//!
//! let data = b"the quick brown fox jumps over the lazy dog";
//! let packed = encode_bytes(data)?;
//! assert_eq!(decode_bytes(&packed)?, data);
//! # Ok::<(), blockhuff::HuffmanError>(())
//! ```
//!
//! Split-table decoding and parallel block decode go through the explicit
//! session types:
//!
//! ```
//! use blockhuff::{
//!     CodecContext, HuffmanEncoder, decode_symbols,
//!     DEFAULT_TABLE1_BITS, DEFAULT_TABLE2_BITS,
//! };
//!
//! let data = b"abracadabra";
//! let stream = HuffmanEncoder::encode(data)?;
//! let ctx = CodecContext::from_canonical_header(stream.canonical_header())?;
//! let tables = ctx.build_split_tables(DEFAULT_TABLE1_BITS, DEFAULT_TABLE2_BITS)?;
//! let decoded = decode_symbols(&tables, data.len(), stream.code_bytes(), 0)?;
//! assert_eq!(decoded, data);
//! # Ok::<(), blockhuff::HuffmanError>(())
//! ```

// Core modules
pub mod blocks;
pub mod container;
pub mod decode;
pub mod encode;
pub mod transform;
pub mod utils;

// Encode path
pub use encode::{EncodedStream, FrequencyTable, HuffmanEncoder, HuffmanTree};
pub use encode::{MAX_CODE_BITS, MAX_SYMBOLS};

// Decode path
pub use decode::{
    CodecContext, DEFAULT_TABLE1_BITS, DEFAULT_TABLE2_BITS, LookupEntry, LookupTable,
    SplitLookupTables, SymbolLookup, VerifyMismatch, VerifyReport, decode_blocks, decode_symbols,
    decode_symbols_with_offsets, decode_verified,
};

// Collaborator surfaces
pub use blocks::{BlockBitOffsetTable, BlockGrid, block_bit_offsets, block_bit_offsets_linear};
pub use container::{Container, MAGIC, parse_container, write_container};
pub use transform::{delta_decode, delta_encode};

// Error types
pub use utils::error::{HuffmanError, Result};

/// Encodes `bytes` into a self-describing container: file header,
/// canonical header, packed codes, guard bytes.
pub fn encode_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    HuffmanEncoder::encode(bytes)?.to_bytes()
}

/// Decodes a container produced by [`encode_bytes`], using the dense
/// full lookup table.
pub fn decode_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let container = parse_container(bytes)?;
    let ctx = CodecContext::from_canonical_header(container.canonical_header)?;
    let table = ctx.build_lookup_table()?;
    decode_symbols(&table, container.original_len as usize, container.code_bytes, 0)
}
