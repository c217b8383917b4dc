//! HMAC-SHA-256.

use super::sha256::{Sha256, BLOCK_LEN, DIGEST_LEN};
use zeroize::Zeroize;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// HMAC keyed once, reusable for many messages.
///
/// The inner and outer pad blocks are absorbed at construction, so each
/// [`mac`](Self::mac) call only hashes the message itself.
#[derive(Clone)]
pub struct HmacSha256 {
    inner: Sha256,
    outer: Sha256,
}

impl HmacSha256 {
    pub fn new(key: &[u8]) -> Self {
        let mut block = [0u8; BLOCK_LEN];
        if key.len() > BLOCK_LEN {
            block[..DIGEST_LEN].copy_from_slice(&Sha256::digest(key));
        } else {
            block[..key.len()].copy_from_slice(key);
        }

        let mut pad = [0u8; BLOCK_LEN];

        let mut inner = Sha256::new();
        for (p, k) in pad.iter_mut().zip(&block) {
            *p = k ^ IPAD;
        }
        inner.update(&pad);

        let mut outer = Sha256::new();
        for (p, k) in pad.iter_mut().zip(&block) {
            *p = k ^ OPAD;
        }
        outer.update(&pad);

        block.zeroize();
        pad.zeroize();
        Self { inner, outer }
    }

    pub fn mac(&self, message: &[u8]) -> [u8; DIGEST_LEN] {
        let mut inner = self.inner.clone();
        inner.update(message);
        let inner_hash = inner.finish();

        let mut outer = self.outer.clone();
        outer.update(&inner_hash);
        outer.finish()
    }
}

/// `H(key ^ opad || H(key ^ ipad || message))`
pub fn hmac_sha256(message: &[u8], key: &[u8]) -> [u8; DIGEST_LEN] {
    HmacSha256::new(key).mac(message)
}
