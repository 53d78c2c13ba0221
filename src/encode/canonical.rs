// src/encode/canonical.rs

//! Canonical code assignment from per-symbol bit widths.
//!
//! Both sides of the codec meet here: the encoder derives widths from a
//! freshly built tree, the decoder reads them from a parsed 256-byte
//! canonical header, and both regenerate the identical left-justified code
//! table from the widths alone.

use crate::utils::error::{HuffmanError, Result};

/// Fixed alphabet size: every input symbol is one byte.
pub const MAX_SYMBOLS: usize = 256;

/// Ceiling on any code's bit width. A 256-symbol byte alphabet keeps
/// optimal codes well under this in practice, but skewed frequency inputs
/// can exceed it and must be rejected.
pub const MAX_CODE_BITS: u8 = 16;

/// Validates a 256-entry width table and returns the used-symbol count.
///
/// Checks, unconditionally: every width is at most 16, at least one symbol
/// is used, the widths of a multi-symbol table satisfy Kraft's equality
/// (the sum of `2^-width` over used symbols is exactly 1), and a
/// single-symbol table carries the explicit width-1 code.
pub fn validate_widths(widths: &[u8; MAX_SYMBOLS]) -> Result<usize> {
    let mut used = 0usize;
    // Kraft terms accumulated in units of 2^-16; equality means 1 << 16.
    let mut kraft = 0u64;
    for (symbol, &width) in widths.iter().enumerate() {
        if width == 0 {
            continue;
        }
        if width > MAX_CODE_BITS {
            return Err(HuffmanError::HeaderCorruption(format!(
                "symbol {} has bit width {}, maximum is {}",
                symbol, width, MAX_CODE_BITS
            )));
        }
        used += 1;
        kraft += 1u64 << (MAX_CODE_BITS - width);
    }

    if used == 0 {
        return Err(HuffmanError::HeaderCorruption(
            "no symbol has a nonzero bit width".to_string(),
        ));
    }
    if used == 1 {
        let width = widths.iter().copied().find(|&w| w != 0).unwrap_or(0);
        if width != 1 {
            return Err(HuffmanError::HeaderCorruption(format!(
                "single-symbol header must use bit width 1, found {}",
                width
            )));
        }
    } else if kraft != 1u64 << u32::from(MAX_CODE_BITS) {
        return Err(HuffmanError::HeaderCorruption(format!(
            "bit widths violate Kraft equality (sum {} / 65536)",
            kraft
        )));
    }

    Ok(used)
}

/// Assigns canonical, left-justified 16-bit codes for a validated width
/// table.
///
/// Used symbols are ordered by `(width, symbol)` ascending; a running code
/// counter increments per symbol and shifts left by the width delta each
/// time the width grows. Every code is then left-justified by
/// `16 - width`. Entries for unused symbols stay zero and must not be
/// consulted.
pub fn assign_codes(widths: &[u8; MAX_SYMBOLS]) -> [u16; MAX_SYMBOLS] {
    let mut order: Vec<(u8, u8)> = widths
        .iter()
        .enumerate()
        .filter(|&(_, &w)| w > 0)
        .map(|(s, &w)| (w, s as u8))
        .collect();
    order.sort_unstable();

    let mut codes = [0u16; MAX_SYMBOLS];
    let mut code = 0u32;
    let mut prev_width = match order.first() {
        Some(&(w, _)) => w,
        None => return codes,
    };

    for &(width, symbol) in &order {
        if width > prev_width {
            code <<= width - prev_width;
            prev_width = width;
        }
        codes[symbol as usize] = (code << (16 - u32::from(width))) as u16;
        code += 1;
    }

    codes
}
