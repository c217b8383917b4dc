//! Bit-plane codec: payload bytes in the low-order bits of carrier channels.
//!
//! Addresses are channel indices into the carrier ("encoded-domain" bytes).
//! Payload byte `i` occupies channels `offset + i * k .. offset + (i + 1) * k`
//! where `k` is the channels-per-byte of the density level; each channel
//! holds `8 / k` bits, least significant bits first.

use crate::carrier::Carrier;
use crate::error::{HideError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encoding density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// 1 bit in each of 8 channels
    #[default]
    Low,
    /// 2 bits in each of 4 channels
    Medium,
    /// 4 bits in each of 2 channels
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    /// Low-order bits overwritten per channel
    pub const fn bits(self) -> u32 {
        match self {
            Level::Low => 1,
            Level::Medium => 2,
            Level::High => 4,
        }
    }

    /// Channels consumed per payload byte
    pub const fn channels_per_byte(self) -> usize {
        8 / self.bits() as usize
    }

    const fn mask(self) -> u8 {
        ((1u32 << self.bits()) - 1) as u8
    }

    /// Value stored in the header level field
    pub const fn to_byte(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::Medium => 1,
            Level::High => 2,
        }
    }

    pub const fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(Level::Low),
            1 => Some(Level::Medium),
            2 => Some(Level::High),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Level {
    type Err = HideError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" | "0" => Ok(Self::Low),
            "medium" | "med" | "1" => Ok(Self::Medium),
            "high" | "2" => Ok(Self::High),
            _ => Err(HideError::UnsupportedLevel(s.to_string())),
        }
    }
}

/// Carrier channels consumed by `size` payload bytes
pub const fn encoded_size(size: usize, level: Level) -> usize {
    size * level.channels_per_byte()
}

/// Write `payload` into the low-order bits starting at channel `offset`.
///
/// High-order bits of every touched channel are preserved. Fails without
/// modifying the carrier if the range does not fit.
pub fn encode(carrier: &mut Carrier, payload: &[u8], level: Level, offset: usize) -> Result<()> {
    let per_byte = level.channels_per_byte();
    let bits = level.bits();
    let mask = level.mask();

    let channels = carrier.channels_mut(offset, encoded_size(payload.len(), level))?;
    for (&byte, group) in payload.iter().zip(channels.chunks_exact_mut(per_byte)) {
        for (j, channel) in group.iter_mut().enumerate() {
            let part = (byte >> (j as u32 * bits)) & mask;
            *channel = (*channel & !mask) | part;
        }
    }
    Ok(())
}

/// Read `size` payload bytes back from channel `offset`
pub fn decode(carrier: &Carrier, size: usize, level: Level, offset: usize) -> Result<Vec<u8>> {
    let per_byte = level.channels_per_byte();
    let bits = level.bits();
    let mask = level.mask();

    let channels = carrier.channels(offset, encoded_size(size, level))?;
    let payload = channels
        .chunks_exact(per_byte)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .fold(0u8, |byte, (j, channel)| {
                    byte | ((channel & mask) << (j as u32 * bits))
                })
        })
        .collect();
    Ok(payload)
}

/// Read exactly `N` payload bytes from channel `offset`
pub fn decode_array<const N: usize>(carrier: &Carrier, level: Level, offset: usize) -> Result<[u8; N]> {
    let bytes = decode(carrier, N, level, offset)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}
