// src/transform.rs

//! Signed-delta pre/post filter.
//!
//! An optional preprocessing stage, orthogonal to the codec: smoothly
//! varying inputs delta to small values that cluster near zero, which
//! tightens the Huffman code. Arithmetic wraps modulo 256, so any byte
//! sequence round-trips.

/// Replaces each byte with its difference from the previous one; the
/// first byte is a delta from zero.
pub fn delta_encode(bytes: &[u8]) -> Vec<u8> {
    let mut deltas = Vec::with_capacity(bytes.len());
    let mut prev = 0u8;
    for &b in bytes {
        deltas.push(b.wrapping_sub(prev));
        prev = b;
    }
    deltas
}

/// Inverts [`delta_encode`] by accumulating deltas.
pub fn delta_decode(deltas: &[u8]) -> Vec<u8> {
    let mut values = Vec::with_capacity(deltas.len());
    let mut prev = 0u8;
    for &d in deltas {
        prev = prev.wrapping_add(d);
        values.push(prev);
    }
    values
}
