//! Library level embed/extract properties.

use hide::crypto::KdfParams;
use hide::entropy::RngEntropy;
use hide::layout::{max_embed_len, PREAMBLE_LEN};
use hide::{embed, extract, Carrier, EmbedParams, HideError, Level};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

const ROUNDS: u32 = 50;

fn carrier(seed: u64) -> Carrier {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pixels = vec![0u8; 64 * 64 * 4];
    rng.fill_bytes(&mut pixels);
    Carrier::new(64, 64, pixels).unwrap()
}

fn params(level: Level) -> EmbedParams {
    EmbedParams {
        level,
        kdf: KdfParams { rounds: ROUNDS },
    }
}

fn hide_and_recover(payload: &[u8], level: Level, seed: u64) -> Vec<u8> {
    let mut image = carrier(seed);
    let mut entropy = RngEntropy(StdRng::seed_from_u64(seed));
    embed(&mut image, payload, "payload.bin", "pw", &params(level), &mut entropy).unwrap();
    let out = extract(&image, "pw", &KdfParams { rounds: ROUNDS }).unwrap();
    assert_eq!(out.name, "payload.bin");
    assert_eq!(out.level, level);
    out.data
}

#[test]
fn block_boundary_lengths() {
    for len in [0usize, 1, 15, 16, 17, 31, 32, 33] {
        let payload: Vec<u8> = (0..len).map(|i| i as u8 ^ 0xA5).collect();
        assert_eq!(hide_and_recover(&payload, Level::Low, len as u64), payload);
    }
}

#[test]
fn every_level() {
    let payload = b"The quick brown fox jumps over the lazy dog".to_vec();
    for (seed, level) in Level::ALL.into_iter().enumerate() {
        assert_eq!(hide_and_recover(&payload, level, seed as u64), payload);
    }
}

#[test]
fn max_embed_size_is_exact() {
    let channels = 64 * 64 * 4;
    let max = max_embed_len(channels, Level::Low);
    assert_eq!(max, 1951);

    let payload = vec![0x42u8; max];
    assert_eq!(hide_and_recover(&payload, Level::Low, 9), payload);

    let mut image = carrier(9);
    let mut entropy = RngEntropy(StdRng::seed_from_u64(9));
    let err = embed(
        &mut image,
        &vec![0x42u8; max + 1],
        "big",
        "pw",
        &params(Level::Low),
        &mut entropy,
    )
    .unwrap_err();
    assert!(matches!(err, HideError::CapacityExceeded { .. }));
}

#[test]
fn wrong_password_is_rejected() {
    let mut image = carrier(1);
    let mut entropy = RngEntropy(StdRng::seed_from_u64(1));
    embed(&mut image, b"HelloWorld", "hello.txt", "test", &params(Level::Low), &mut entropy)
        .unwrap();

    let err = extract(&image, "wrong", &KdfParams { rounds: ROUNDS }).unwrap_err();
    assert!(matches!(err, HideError::AuthenticationFailed));
    assert_eq!(err.to_string(), "Decryption failed, invalid key or corrupt file");
}

#[test]
fn default_rounds_scenario() {
    let mut image = carrier(2);
    let mut entropy = RngEntropy(StdRng::seed_from_u64(2));
    let defaults = EmbedParams::default();
    assert_eq!(defaults.kdf.rounds, 20_000);
    embed(&mut image, b"HelloWorld", "hello.txt", "test", &defaults, &mut entropy).unwrap();

    let out = extract(&image, "test", &KdfParams::default()).unwrap();
    assert_eq!(out.data, b"HelloWorld");
    assert_eq!(out.name, "hello.txt");
}

#[test]
fn payload_corruption_is_detected() {
    let mut image = carrier(3);
    let mut entropy = RngEntropy(StdRng::seed_from_u64(3));
    let summary = embed(
        &mut image,
        &[7u8; 100],
        "data",
        "pw",
        &params(Level::Low),
        &mut entropy,
    )
    .unwrap();
    assert!(summary.offset >= PREAMBLE_LEN);

    image.channels_mut(summary.offset, 1).unwrap()[0] ^= 1;
    let err = extract(&image, "pw", &KdfParams { rounds: ROUNDS }).unwrap_err();
    assert!(matches!(err, HideError::IntegrityError(_)));
}

#[test]
fn offsets_vary_between_embeds() {
    let offsets: Vec<usize> = (0..8)
        .map(|seed| {
            let mut image = carrier(seed);
            let mut entropy = RngEntropy(StdRng::seed_from_u64(seed));
            embed(&mut image, b"x", "x", "pw", &params(Level::Low), &mut entropy)
                .unwrap()
                .offset
        })
        .collect();
    assert!(offsets.iter().any(|&o| o != offsets[0]));
}

#[test]
fn same_input_embeds_differently() {
    let mut first = carrier(4);
    let mut second = first.clone();
    embed(
        &mut first,
        b"same",
        "same",
        "pw",
        &params(Level::Medium),
        &mut RngEntropy(StdRng::seed_from_u64(10)),
    )
    .unwrap();
    embed(
        &mut second,
        b"same",
        "same",
        "pw",
        &params(Level::Medium),
        &mut RngEntropy(StdRng::seed_from_u64(11)),
    )
    .unwrap();
    assert_ne!(first, second);
}
