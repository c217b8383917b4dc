//! Encrypted container: ties key derivation, block encryption and the
//! bit-plane codec together into embed and extract runs.
//!
//! ```text
//! embed:   payload ─► CRC32 ─► pad ─► AES-256-CBC ─► codec ─► carrier
//!          header  ─────────────────► AES-256-CBC ─► codec ─► preamble
//! extract: preamble ─► key ─► header ─► payload ─► unpad ─► CRC32 check
//! ```
//!
//! Header and payload are encrypted by two separate CBC sessions that share
//! key and IV, so either can be decrypted without the other.

use crate::capacity::format_size;
use crate::carrier::Carrier;
use crate::checksum::checksum;
use crate::codec::{self, Level};
use crate::crypto::{derive_key, password_digest, CbcCipher, KdfParams, BLOCK_LEN};
use crate::entropy::EntropySource;
use crate::error::{HideError, Result};
use crate::header::{check_name, Header, HEADER_LEN};
use crate::layout::{
    max_embed_len, Layout, HEADER_OFFSET, IV_LEN, IV_OFFSET, PREAMBLE_LEN, SALT_LEN, SALT_OFFSET,
};
use crate::padding::{pad, unpadded_len};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Stages of an embed or extract run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    KeyDerivation,
    HeaderCrypto,
    PayloadCrypto,
    Embed,
    Extract,
    Validate,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::KeyDerivation => "key derivation",
            Stage::HeaderCrypto => "header crypto",
            Stage::PayloadCrypto => "payload crypto",
            Stage::Embed => "embed",
            Stage::Extract => "extract",
            Stage::Validate => "validate",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Tracks the current stage of one run and logs transitions
#[derive(Debug)]
struct Progress {
    run: &'static str,
    stage: Stage,
}

impl Progress {
    fn new(run: &'static str) -> Self {
        Self {
            run,
            stage: Stage::Idle,
        }
    }

    fn enter(&mut self, stage: Stage) {
        debug!("{}: {} -> {}", self.run, self.stage, stage);
        self.stage = stage;
    }

    fn finish<T>(&mut self, result: &Result<T>) {
        match result {
            Ok(_) => self.enter(Stage::Done),
            Err(e) => {
                debug!("{}: failed during {}: {}", self.run, self.stage, e);
                self.stage = Stage::Failed;
            }
        }
    }
}

/// Parameters for [`embed`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedParams {
    pub level: Level,
    pub kdf: KdfParams,
}

/// What an [`embed`] run wrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedSummary {
    pub name: String,
    pub level: Level,
    pub payload_len: usize,
    pub padded_len: usize,
    /// First payload channel
    pub offset: usize,
}

/// A recovered payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub name: String,
    pub level: Level,
    pub data: Vec<u8>,
}

/// Encrypt `payload` and hide it in `carrier`.
///
/// Every check runs before the first pixel is written, so on error the
/// carrier is unchanged.
pub fn embed(
    carrier: &mut Carrier,
    payload: &[u8],
    name: &str,
    password: &str,
    params: &EmbedParams,
    entropy: &mut dyn EntropySource,
) -> Result<EmbedSummary> {
    let mut progress = Progress::new("encode");
    let result = run_embed(&mut progress, carrier, payload, name, password, params, entropy);
    progress.finish(&result);
    result
}

fn run_embed(
    progress: &mut Progress,
    carrier: &mut Carrier,
    payload: &[u8],
    name: &str,
    password: &str,
    params: &EmbedParams,
    entropy: &mut dyn EntropySource,
) -> Result<EmbedSummary> {
    let level = params.level;
    check_name(name)?;

    info!("Image size: {}x{} pixels", carrier.width(), carrier.height());
    info!("Encoding level: {}", level);
    info!(
        "Max embed size: {}",
        format_size(max_embed_len(carrier.channel_count(), level))
    );
    info!("Embed size: {}", format_size(payload.len()));

    let layout = Layout::plan(carrier.channel_count(), payload.len(), level)?;
    info!("Encrypted embed size: {}", format_size(layout.padded_size));

    let offset = layout.payload_offset(entropy.next_u32()?);
    let mut salt = [0u8; SALT_LEN];
    entropy.fill(&mut salt)?;
    let mut iv = [0u8; IV_LEN];
    entropy.fill(&mut iv)?;

    let crc = checksum(payload);
    info!("Generated CRC32 checksum");
    let mut padded = Vec::with_capacity(layout.padded_size);
    padded.extend_from_slice(payload);
    pad(&mut padded);

    progress.enter(Stage::KeyDerivation);
    let digest = password_digest(password);
    let key = derive_key(&digest[..], &salt, &params.kdf);
    info!(
        "Generated encryption key with PBKDF2-HMAC-SHA-256 ({} rounds)",
        params.kdf.rounds
    );

    progress.enter(Stage::HeaderCrypto);
    // Layout::plan caps the carrier at u32::MAX channels
    let header = Header::new(level, offset as u32, padded.len() as u32, crc, name)?;
    let mut header_bytes = header.to_bytes();
    let encrypted_header = CbcCipher::new(&key, &iv).cbc_encrypt(&header_bytes)?;
    header_bytes.zeroize();

    progress.enter(Stage::PayloadCrypto);
    let encrypted_payload = CbcCipher::new(&key, &iv).cbc_encrypt(&padded)?;
    padded.zeroize();
    info!("Encrypted embed with AES-256-CBC");

    progress.enter(Stage::Embed);
    codec::encode(carrier, &salt, Level::Low, SALT_OFFSET)?;
    codec::encode(carrier, &iv, Level::Low, IV_OFFSET)?;
    codec::encode(carrier, &encrypted_header, Level::Low, HEADER_OFFSET)?;
    codec::encode(carrier, &encrypted_payload, level, offset)?;
    info!("Embedded {} into image", name);

    Ok(EmbedSummary {
        name: name.to_string(),
        level,
        payload_len: payload.len(),
        padded_len: layout.padded_size,
        offset,
    })
}

/// Recover and verify the payload hidden in `carrier`
pub fn extract(carrier: &Carrier, password: &str, kdf: &KdfParams) -> Result<Extracted> {
    let mut progress = Progress::new("decode");
    let result = run_extract(&mut progress, carrier, password, kdf);
    progress.finish(&result);
    result
}

fn run_extract(
    progress: &mut Progress,
    carrier: &Carrier,
    password: &str,
    kdf: &KdfParams,
) -> Result<Extracted> {
    let channels = carrier.channel_count();
    if channels < PREAMBLE_LEN {
        return Err(HideError::InvalidCarrier(format!(
            "{} channels cannot hold a {} channel preamble",
            channels, PREAMBLE_LEN
        )));
    }
    info!("Image size: {}x{} pixels", carrier.width(), carrier.height());

    progress.enter(Stage::Extract);
    let salt: [u8; SALT_LEN] = codec::decode_array(carrier, Level::Low, SALT_OFFSET)?;
    let iv: [u8; IV_LEN] = codec::decode_array(carrier, Level::Low, IV_OFFSET)?;
    let encrypted_header: [u8; HEADER_LEN] =
        codec::decode_array(carrier, Level::Low, HEADER_OFFSET)?;

    progress.enter(Stage::KeyDerivation);
    let digest = password_digest(password);
    let key = derive_key(&digest[..], &salt, kdf);
    info!(
        "Generated decryption key with PBKDF2-HMAC-SHA-256 ({} rounds)",
        kdf.rounds
    );

    progress.enter(Stage::HeaderCrypto);
    let mut header_bytes = [0u8; HEADER_LEN];
    header_bytes.copy_from_slice(&CbcCipher::new(&key, &iv).cbc_decrypt(&encrypted_header)?);
    let header = Header::from_bytes(&header_bytes);
    header_bytes.zeroize();
    let level = header.validate()?;
    let name = header.name();
    info!("Successfully decrypted header");
    info!("Detected embed {}", name);
    info!("Encoding level: {}", level);

    let size = header.size as usize;
    let offset = header.offset as usize;
    if size == 0 || size % BLOCK_LEN != 0 {
        return Err(HideError::IntegrityError(format!(
            "payload size {} is not a positive multiple of {}",
            size, BLOCK_LEN
        )));
    }
    let in_bounds = size
        .checked_mul(level.channels_per_byte())
        .and_then(|span| span.checked_add(offset))
        .is_some_and(|end| offset >= PREAMBLE_LEN && end <= channels);
    if !in_bounds {
        return Err(HideError::IntegrityError(format!(
            "payload region at {} of {} bytes lies outside the image",
            offset, size
        )));
    }

    progress.enter(Stage::Extract);
    let encrypted_payload = codec::decode(carrier, size, level, offset)?;

    progress.enter(Stage::PayloadCrypto);
    let mut data = CbcCipher::new(&key, &iv).cbc_decrypt(&encrypted_payload)?;

    progress.enter(Stage::Validate);
    let len = match unpadded_len(&data) {
        Ok(len) => len,
        Err(e) => {
            data.zeroize();
            return Err(e);
        }
    };
    data.truncate(len);
    if checksum(&data) != header.checksum {
        data.zeroize();
        return Err(HideError::IntegrityError("CRC32 checksum mismatch".into()));
    }
    info!("CRC32 checksum matches");

    Ok(Extracted { name, level, data })
}
