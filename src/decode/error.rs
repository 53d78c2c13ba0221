// src/decode/error.rs

use thiserror::Error;

/// Stream-level decode failures.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("bad container magic 0x{0:08X}")]
    BadMagic(u32),

    #[error("encoded stream truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("corrupt stream or table: code at bit offset {bit_offset} resolves to zero width")]
    UnresolvedCode { bit_offset: u64 },
}
