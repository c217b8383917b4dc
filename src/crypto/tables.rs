//! Rijndael lookup tables.
//!
//! The S-box, its inverse, the GF(2^8) multiplication tables used by
//! (inverse) MixColumns and the key schedule round constants are computed
//! once per process and shared read-only by every cipher instance.

use std::sync::OnceLock;

/// Reduction polynomial x^8 + x^4 + x^3 + x + 1 without the x^8 term
const REDUCTION: u8 = 0x1b;

/// Number of round constants the AES-256 key schedule consumes, plus the
/// unused slot at index 0
pub const RCON_LEN: usize = 8;

#[derive(Debug)]
pub struct Tables {
    pub sbox: [u8; 256],
    pub inv_sbox: [u8; 256],
    pub mul2: [u8; 256],
    pub mul3: [u8; 256],
    pub mul9: [u8; 256],
    pub mul11: [u8; 256],
    pub mul13: [u8; 256],
    pub mul14: [u8; 256],
    pub rcon: [u8; RCON_LEN],
}

/// Shared tables, built on first use
pub fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(build_tables)
}

/// Multiply two elements of GF(2^8)
pub fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    for _ in 0..8 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= REDUCTION;
        }
        b >>= 1;
    }
    product
}

fn build_tables() -> Tables {
    let mut sbox = [0u8; 256];
    let mut inv_sbox = [0u8; 256];

    // Walk the multiplicative group with generator 3; q tracks the inverse of p.
    let mut p: u8 = 1;
    let mut q: u8 = 1;
    loop {
        p = p ^ (p << 1) ^ if p & 0x80 != 0 { REDUCTION } else { 0 };

        q ^= q << 1;
        q ^= q << 2;
        q ^= q << 4;
        if q & 0x80 != 0 {
            q ^= 0x09;
        }

        let affine = q
            ^ q.rotate_left(1)
            ^ q.rotate_left(2)
            ^ q.rotate_left(3)
            ^ q.rotate_left(4)
            ^ 0x63;
        sbox[p as usize] = affine;
        inv_sbox[affine as usize] = p;

        if p == 1 {
            break;
        }
    }
    // Zero has no inverse
    sbox[0x00] = 0x63;
    inv_sbox[0x63] = 0x00;

    let table = |factor: u8| {
        let mut out = [0u8; 256];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = gmul(i as u8, factor);
        }
        out
    };

    let mut rcon = [0u8; RCON_LEN];
    rcon[1] = 1;
    for i in 2..RCON_LEN {
        rcon[i] = gmul(rcon[i - 1], 2);
    }

    Tables {
        sbox,
        inv_sbox,
        mul2: table(2),
        mul3: table(3),
        mul9: table(9),
        mul11: table(11),
        mul13: table(13),
        mul14: table(14),
        rcon,
    }
}
