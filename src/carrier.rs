//! Owned RGBA pixel buffer hosting the hidden data.

use crate::error::{HideError, Result};
use image::{ColorType, ImageFormat};
use std::path::Path;

/// Bytes per pixel (R, G, B, A)
pub const CHANNELS: usize = 4;

/// A `width * height * 4` byte RGBA image.
///
/// All access to the pixel bytes goes through range-checked accessors so a
/// bad address can never silently touch memory outside the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Carrier {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| {
                HideError::InvalidCarrier(format!("{}x{} pixels is too large", width, height))
            })?;
        if pixels.len() != expected {
            return Err(HideError::InvalidCarrier(format!(
                "{}x{} RGBA image needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A carrier with every channel set to `value`
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| {
                HideError::InvalidCarrier(format!("{}x{} pixels is too large", width, height))
            })?;
        Self::new(width, height, vec![value; len])
    }

    /// Load any supported image file, converted to 8-bit RGBA
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }

    /// Persist as PNG, the only lossless format the carrier is written in
    pub fn save(&self, path: &Path) -> Result<()> {
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            ColorType::Rgba8,
            ImageFormat::Png,
        )?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total channel bytes (`width * height * 4`)
    pub fn channel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Channels `[offset, offset + len)`
    pub fn channels(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = self.check_range(offset, len)?;
        Ok(&self.pixels[offset..end])
    }

    /// Mutable channels `[offset, offset + len)`
    pub fn channels_mut(&mut self, offset: usize, len: usize) -> Result<&mut [u8]> {
        let end = self.check_range(offset, len)?;
        Ok(&mut self.pixels[offset..end])
    }

    fn check_range(&self, offset: usize, len: usize) -> Result<usize> {
        match offset.checked_add(len) {
            Some(end) if end <= self.pixels.len() => Ok(end),
            _ => Err(HideError::OutOfBounds {
                offset,
                len,
                capacity: self.pixels.len(),
            }),
        }
    }
}
