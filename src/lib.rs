//! Hide - password protected steganography for RGBA images
//!
//! A file is encrypted with AES-256-CBC under a PBKDF2-HMAC-SHA-256 key and
//! spread over the low-order bits of an image's colour channels. Every
//! primitive (AES, SHA-256, HMAC, PBKDF2) is implemented in this crate.
//!
//! ## Carrier Layout
//!
//! ```text
//! channel 0 ─ salt ─ 128 ─ IV ─ 256 ─ encrypted header ─ 768 ─ ... payload at random offset ...
//! ```
//!
//! The preamble is always written at Low density (one bit per channel). The
//! payload density is chosen per embed:
//!
//! - **Low**: 1 bit per channel, 8 channels per byte
//! - **Medium**: 2 bits per channel, 4 channels per byte
//! - **High**: 4 bits per channel, 2 channels per byte
//!
//! ## Example
//!
//! ```no_run
//! use hide::cli::{decode_file, encode_file, DecodeOptions, EncodeOptions};
//! use std::path::Path;
//!
//! let encode = EncodeOptions {
//!     password: "my_secret".into(),
//!     ..Default::default()
//! };
//! encode_file(
//!     Path::new("cover.png"),
//!     Path::new("stego.png"),
//!     Path::new("notes.txt"),
//!     &encode,
//! )?;
//!
//! let decode = DecodeOptions {
//!     password: "my_secret".into(),
//!     ..Default::default()
//! };
//! decode_file(Path::new("stego.png"), Some(Path::new("notes.txt")), &decode)?;
//! # Ok::<(), hide::HideError>(())
//! ```

pub mod capacity;
pub mod carrier;
pub mod checksum;
pub mod cli;
pub mod codec;
pub mod container;
pub mod crypto;
pub mod entropy;
pub mod error;
pub mod header;
pub mod layout;
pub mod padding;

pub use carrier::Carrier;
pub use codec::Level;
pub use container::{embed, extract, EmbedParams, EmbedSummary, Extracted};
pub use error::{HideError, Result};
