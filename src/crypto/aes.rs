//! AES-256 single-block transform.
//!
//! The state is held column-major: byte `4 * c + r` is row `r` of column `c`.
//! This type is stateless across blocks; chaining lives in [`CbcCipher`].
//!
//! [`CbcCipher`]: crate::crypto::CbcCipher

use super::tables::{tables, Tables};
use super::{Key, BLOCK_LEN, KEY_LEN};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Cipher rounds for a 256-bit key
pub const ROUNDS: usize = 14;

/// Size of the expanded key schedule: 15 round keys of 16 bytes
pub const SCHEDULE_LEN: usize = (ROUNDS + 1) * BLOCK_LEN;

type State = [u8; BLOCK_LEN];

/// AES-256 with an expanded, immutable round key schedule
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes256 {
    schedule: [u8; SCHEDULE_LEN],
}

impl Aes256 {
    pub fn new(key: &Key) -> Self {
        Self {
            schedule: expand_key(key.as_bytes()),
        }
    }

    /// Round key `round` (0..=14)
    pub fn round_key(&self, round: usize) -> &[u8] {
        &self.schedule[round * BLOCK_LEN..(round + 1) * BLOCK_LEN]
    }

    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        let t = tables();
        self.add_round_key(block, 0);
        for round in 1..ROUNDS {
            sub_bytes(block, &t.sbox);
            shift_rows(block);
            mix_columns(block, t);
            self.add_round_key(block, round);
        }
        sub_bytes(block, &t.sbox);
        shift_rows(block);
        self.add_round_key(block, ROUNDS);
    }

    pub fn decrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        let t = tables();
        self.add_round_key(block, ROUNDS);
        for round in (1..ROUNDS).rev() {
            inverse_shift_rows(block);
            sub_bytes(block, &t.inv_sbox);
            self.add_round_key(block, round);
            inverse_mix_columns(block, t);
        }
        inverse_shift_rows(block);
        sub_bytes(block, &t.inv_sbox);
        self.add_round_key(block, 0);
    }

    fn add_round_key(&self, state: &mut State, round: usize) {
        for (s, k) in state.iter_mut().zip(self.round_key(round)) {
            *s ^= k;
        }
    }
}

/// Rijndael key expansion for 256-bit keys
fn expand_key(key: &[u8; KEY_LEN]) -> [u8; SCHEDULE_LEN] {
    let t = tables();
    let mut schedule = [0u8; SCHEDULE_LEN];
    schedule[..KEY_LEN].copy_from_slice(key);

    let mut rcon_index = 1;
    let mut c = KEY_LEN;
    while c < SCHEDULE_LEN {
        let mut word = [
            schedule[c - 4],
            schedule[c - 3],
            schedule[c - 2],
            schedule[c - 1],
        ];

        if c % KEY_LEN == 0 {
            word.rotate_left(1);
            for b in word.iter_mut() {
                *b = t.sbox[*b as usize];
            }
            word[0] ^= t.rcon[rcon_index];
            rcon_index += 1;
        } else if c % KEY_LEN == 16 {
            // 256-bit keys substitute again halfway through each group
            for b in word.iter_mut() {
                *b = t.sbox[*b as usize];
            }
        }

        for b in word {
            schedule[c] = schedule[c - KEY_LEN] ^ b;
            c += 1;
        }
    }

    schedule
}

fn sub_bytes(state: &mut State, sbox: &[u8; 256]) {
    for b in state.iter_mut() {
        *b = sbox[*b as usize];
    }
}

/// Row `r` rotates left by `r` columns
fn shift_rows(state: &mut State) {
    let input = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[4 * c + r] = input[4 * ((c + r) % 4) + r];
        }
    }
}

fn inverse_shift_rows(state: &mut State) {
    let input = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[4 * c + r] = input[4 * ((c + 4 - r) % 4) + r];
        }
    }
}

fn mix_columns(state: &mut State, t: &Tables) {
    for column in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [column[0], column[1], column[2], column[3]];
        let (m2, m3) = (&t.mul2, &t.mul3);
        column[0] = m2[a0 as usize] ^ m3[a1 as usize] ^ a2 ^ a3;
        column[1] = a0 ^ m2[a1 as usize] ^ m3[a2 as usize] ^ a3;
        column[2] = a0 ^ a1 ^ m2[a2 as usize] ^ m3[a3 as usize];
        column[3] = m3[a0 as usize] ^ a1 ^ a2 ^ m2[a3 as usize];
    }
}

fn inverse_mix_columns(state: &mut State, t: &Tables) {
    for column in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [
            column[0] as usize,
            column[1] as usize,
            column[2] as usize,
            column[3] as usize,
        ];
        column[0] = t.mul14[a0] ^ t.mul11[a1] ^ t.mul13[a2] ^ t.mul9[a3];
        column[1] = t.mul9[a0] ^ t.mul14[a1] ^ t.mul11[a2] ^ t.mul13[a3];
        column[2] = t.mul13[a0] ^ t.mul9[a1] ^ t.mul14[a2] ^ t.mul11[a3];
        column[3] = t.mul11[a0] ^ t.mul13[a1] ^ t.mul9[a2] ^ t.mul14[a3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fips_key() -> Key {
        let mut bytes = [0u8; KEY_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        Key::from_bytes(bytes)
    }

    #[test]
    fn test_fips197_appendix_c3() {
        let aes = Aes256::new(&fips_key());
        let plaintext = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ];
        let mut block = plaintext;
        aes.encrypt_block(&mut block);
        assert_eq!(
            block,
            [
                0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b, 0x49,
                0x60, 0x89
            ]
        );

        aes.decrypt_block(&mut block);
        assert_eq!(block, plaintext);
    }

    #[test]
    fn test_key_schedule_tail() {
        // FIPS-197 appendix A.3, last expanded words w[56..60]
        let mut key = [0u8; KEY_LEN];
        let hex = [
            0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d,
            0x77, 0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3,
            0x09, 0x14, 0xdf, 0xf4,
        ];
        key.copy_from_slice(&hex);
        let aes = Aes256::new(&Key::from_bytes(key));
        assert_eq!(
            aes.round_key(14),
            &[
                0xfe, 0x48, 0x90, 0xd1, 0xe6, 0x18, 0x8d, 0x0b, 0x04, 0x6d, 0xf3, 0x44, 0x70, 0x6c,
                0x63, 0x1e
            ]
        );
        assert_eq!(aes.round_key(0), &hex[..16]);
        assert_eq!(aes.round_key(1), &hex[16..]);
    }

    #[test]
    fn test_shift_rows_inverse() {
        let mut state: State = core::array::from_fn(|i| i as u8);
        shift_rows(&mut state);
        assert_eq!(state, [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]);
        inverse_shift_rows(&mut state);
        assert_eq!(state, core::array::from_fn::<u8, 16, _>(|i| i as u8));
    }

    #[test]
    fn test_mix_columns_inverse() {
        let t = tables();
        // FIPS-197 MixColumns example column db 13 53 45 -> 8e 4d a1 bc
        let mut state: State = [
            0xdb, 0x13, 0x53, 0x45, 0xf2, 0x0a, 0x22, 0x5c, 0x01, 0x01, 0x01, 0x01, 0xc6, 0xc6,
            0xc6, 0xc6,
        ];
        let original = state;
        mix_columns(&mut state, t);
        assert_eq!(&state[..4], &[0x8e, 0x4d, 0xa1, 0xbc]);
        assert_eq!(&state[4..8], &[0x9f, 0xdc, 0x58, 0x9d]);
        assert_eq!(&state[8..12], &[0x01, 0x01, 0x01, 0x01]);
        inverse_mix_columns(&mut state, t);
        assert_eq!(state, original);
    }

    #[test]
    fn test_block_roundtrip_many_keys() {
        for seed in 0..16u8 {
            let key = Key::from_bytes([seed.wrapping_mul(37); KEY_LEN]);
            let aes = Aes256::new(&key);
            let original: [u8; BLOCK_LEN] = core::array::from_fn(|i| (i as u8) ^ seed);
            let mut block = original;
            aes.encrypt_block(&mut block);
            assert_ne!(block, original);
            aes.decrypt_block(&mut block);
            assert_eq!(block, original);
        }
    }
}
