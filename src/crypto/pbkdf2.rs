//! PBKDF2-HMAC-SHA-256 password stretching.

use super::hmac::HmacSha256;
use super::sha256::{Sha256, DIGEST_LEN};
use super::{Key, KEY_LEN};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

/// Key derivation cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// HMAC iterations per output block; 0 behaves like 1
    pub rounds: u32,
}

impl KdfParams {
    pub const DEFAULT_ROUNDS: u32 = 20_000;
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            rounds: Self::DEFAULT_ROUNDS,
        }
    }
}

/// Fill `output` with PBKDF2-HMAC-SHA-256(password, salt, rounds)
pub fn pbkdf2_hmac_sha256(password: &[u8], salt: &[u8], rounds: u32, output: &mut [u8]) {
    let prf = HmacSha256::new(password);
    let mut seed = Vec::with_capacity(salt.len() + 4);

    for (index, chunk) in output.chunks_mut(DIGEST_LEN).enumerate() {
        let block_number = index as u32 + 1;
        seed.clear();
        seed.extend_from_slice(salt);
        seed.extend_from_slice(&block_number.to_be_bytes());

        let mut u = prf.mac(&seed);
        let mut block = u;
        for _ in 1..rounds {
            u = prf.mac(&u);
            for (acc, x) in block.iter_mut().zip(&u) {
                *acc ^= x;
            }
        }

        chunk.copy_from_slice(&block[..chunk.len()]);
        u.zeroize();
        block.zeroize();
    }
}

/// Derive the AES-256 key for a carrier from the pre-hashed password
pub fn derive_key(password: &[u8], salt: &[u8], params: &KdfParams) -> Key {
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac_sha256(password, salt, params.rounds, &mut bytes);
    let key = Key::from_bytes(bytes);
    bytes.zeroize();
    key
}

/// Hash the user's password once into fixed-length key material
pub fn password_digest(password: &str) -> Zeroizing<[u8; DIGEST_LEN]> {
    Zeroizing::new(Sha256::digest(password.as_bytes()))
}
