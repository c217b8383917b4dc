//! CRC-32 integrity code (IEEE, reflected).
//!
//! Detects accidental corruption and wrong-key garbage only; it offers no
//! protection against deliberate tampering.

/// Streaming CRC-32 accumulator
#[derive(Clone, Default)]
pub struct Checksum {
    hasher: crc32fast::Hasher,
}

impl Checksum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Value over everything fed so far
    pub fn value(&self) -> u32 {
        self.hasher.clone().finalize()
    }
}

/// One-shot CRC-32 of `data`
pub fn checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
