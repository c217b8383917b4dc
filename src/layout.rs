//! Address planning inside the carrier.
//!
//! The preamble always sits at the start of the image at Low density so it
//! can be read before the payload density is known:
//!
//! ```text
//! channels            content
//! [0, 128)            salt            (16 bytes)
//! [128, 256)          IV              (16 bytes)
//! [256, 768)          header          (64 bytes, encrypted)
//! [offset, ...)       payload         (header-declared offset and level)
//! ```

use crate::codec::{encoded_size, Level};
use crate::crypto::BLOCK_LEN;
use crate::error::{HideError, Result};
use crate::header::HEADER_LEN;
use crate::padding::padded_len;

pub const SALT_LEN: usize = 16;
pub const IV_LEN: usize = BLOCK_LEN;

pub const SALT_OFFSET: usize = 0;
pub const IV_OFFSET: usize = SALT_OFFSET + encoded_size(SALT_LEN, Level::Low);
pub const HEADER_OFFSET: usize = IV_OFFSET + encoded_size(IV_LEN, Level::Low);

/// First channel available to the payload
pub const PREAMBLE_LEN: usize = HEADER_OFFSET + encoded_size(HEADER_LEN, Level::Low);

/// Padded payload bytes that fit after the preamble at `level`
pub fn capacity(channels: usize, level: Level) -> usize {
    channels.saturating_sub(PREAMBLE_LEN) / level.channels_per_byte()
}

/// Largest plaintext whose padded form still fits
pub fn max_embed_len(channels: usize, level: Level) -> usize {
    (capacity(channels, level) / BLOCK_LEN * BLOCK_LEN).saturating_sub(1)
}

/// A validated placement for one payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub level: Level,
    pub channels: usize,
    pub padded_size: usize,
    /// Free channels left over after the preamble and payload
    slack: usize,
}

impl Layout {
    /// Check that a `payload_len` byte embed fits a carrier of `channels`
    pub fn plan(channels: usize, payload_len: usize, level: Level) -> Result<Self> {
        if channels > u32::MAX as usize {
            return Err(HideError::InvalidCarrier(format!(
                "{} channels exceed the 32-bit offset range",
                channels
            )));
        }

        let padded_size = padded_len(payload_len);
        let available = capacity(channels, level);
        if padded_size > available {
            return Err(HideError::CapacityExceeded {
                needed: padded_size,
                available,
            });
        }

        Ok(Self {
            level,
            channels,
            padded_size,
            slack: channels - PREAMBLE_LEN - encoded_size(padded_size, level),
        })
    }

    /// Payload start for a random draw; always after the preamble and
    /// leaves room for the whole payload
    pub fn payload_offset(&self, draw: u32) -> usize {
        PREAMBLE_LEN + draw as usize % (self.slack + 1)
    }

    pub fn slack(&self) -> usize {
        self.slack
    }
}
