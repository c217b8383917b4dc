//! PKCS#7-style padding to the cipher block size.
//!
//! The pad byte equals the pad length, and a full block of padding is added
//! when the input is already aligned, so the pad length is always 1..=16.

use crate::crypto::BLOCK_LEN;
use crate::error::{HideError, Result};

/// Length after padding `len` bytes, saturating for absurd sizes
pub fn padded_len(len: usize) -> usize {
    (len / BLOCK_LEN + 1).saturating_mul(BLOCK_LEN)
}

/// Append the padding in place
pub fn pad(data: &mut Vec<u8>) {
    let pad = padded_len(data.len()) - data.len();
    data.resize(data.len() + pad, pad as u8);
}

/// Length of `padded` once the trailing pad is stripped.
///
/// Only the last byte is consulted; a value outside 1..=16 or larger than
/// the buffer means the data is corrupt.
pub fn unpadded_len(padded: &[u8]) -> Result<usize> {
    let pad = match padded.last() {
        Some(&b) => b as usize,
        None => return Err(HideError::IntegrityError("empty payload".into())),
    };
    if pad == 0 || pad > BLOCK_LEN || pad > padded.len() {
        return Err(HideError::IntegrityError(format!("invalid padding length {}", pad)));
    }
    Ok(padded.len() - pad)
}
