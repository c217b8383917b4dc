//! From-scratch cryptographic primitives used by the container format.
//!
//! The format is fixed to AES-256-CBC for confidentiality and a
//! PBKDF2-HMAC-SHA-256 key derived from the password, so nothing here is
//! pluggable.

pub mod aes;
pub mod cbc;
pub mod hmac;
pub mod pbkdf2;
pub mod sha256;
pub mod tables;

pub use aes::Aes256;
pub use cbc::CbcCipher;
pub use hmac::{hmac_sha256, HmacSha256};
pub use pbkdf2::{derive_key, password_digest, pbkdf2_hmac_sha256, KdfParams};
pub use sha256::Sha256;

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Cipher block size in bytes (128 bits)
pub const BLOCK_LEN: usize = 16;

/// AES-256 key size in bytes
pub const KEY_LEN: usize = 32;

/// A 256-bit secret key, wiped from memory when dropped
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(<redacted>)")
    }
}
