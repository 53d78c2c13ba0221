// src/utils/error.rs

use std::fmt;

/// The primary error type for all operations in the blockhuff library.
#[derive(Debug)]
pub enum HuffmanError {
    /// An error occurred during I/O operations.
    Io(std::io::Error),
    /// No symbol in the input has a nonzero frequency, so there is nothing
    /// to build a code over.
    EmptyInput,
    /// A symbol's computed code length exceeds the 16-bit ceiling this
    /// fixed-width design supports.
    BitWidthOverflow { symbol: u8, width: u32 },
    /// A parsed canonical header failed its width or coverage checks.
    HeaderCorruption(String),
    /// The packed bitstream could not be decoded against the given tables.
    Decode(String),
    /// An invalid argument was provided to a function.
    InvalidArg(String),
}

impl std::error::Error for HuffmanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HuffmanError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for HuffmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuffmanError::Io(err) => write!(f, "I/O error: {}", err),
            HuffmanError::EmptyInput => write!(f, "input contains no symbols to encode"),
            HuffmanError::BitWidthOverflow { symbol, width } => write!(
                f,
                "symbol {} requires a {}-bit code, exceeding the 16-bit maximum",
                symbol, width
            ),
            HuffmanError::HeaderCorruption(msg) => write!(f, "corrupt canonical header: {}", msg),
            HuffmanError::Decode(msg) => write!(f, "decode error: {}", msg),
            HuffmanError::InvalidArg(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl From<std::io::Error> for HuffmanError {
    fn from(err: std::io::Error) -> Self {
        HuffmanError::Io(err)
    }
}

impl From<crate::decode::error::DecodeError> for HuffmanError {
    fn from(err: crate::decode::error::DecodeError) -> Self {
        HuffmanError::Decode(err.to_string())
    }
}

/// A specialized `Result` type for codec operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;
