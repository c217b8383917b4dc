use crate::carrier::Carrier;
use crate::codec::Level;
use crate::container::{embed, EmbedParams, EmbedSummary};
use crate::crypto::KdfParams;
use crate::entropy::EntropyBackend;
use crate::error::{HideError, Result};
use crate::header::check_name;
use crate::layout::Layout;
use std::fs;
use std::io;
use std::path::Path;

/// Options for the encode command
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub password: String,
    pub level: Level,
    pub rounds: u32,
    pub entropy: EntropyBackend,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            password: String::new(),
            level: Level::default(),
            rounds: KdfParams::DEFAULT_ROUNDS,
            entropy: EntropyBackend::default(),
        }
    }
}

/// Hide `embed_path` inside the image at `carrier_path` and write the
/// result to `output_path` as PNG.
///
/// The output file is only created once embedding succeeded.
pub fn encode_file(
    carrier_path: &Path,
    output_path: &Path,
    embed_path: &Path,
    options: &EncodeOptions,
) -> Result<EmbedSummary> {
    let name = embed_name(embed_path)?;
    check_name(&name)?;

    let mut carrier = Carrier::load(carrier_path)?;

    // Reject oversized files before reading them
    let embed_len = usize::try_from(fs::metadata(embed_path)?.len()).unwrap_or(usize::MAX);
    Layout::plan(carrier.channel_count(), embed_len, options.level)?;

    let payload = fs::read(embed_path)?;
    let params = EmbedParams {
        level: options.level,
        kdf: KdfParams {
            rounds: options.rounds,
        },
    };
    let mut entropy = options.entropy.source();
    let summary = embed(
        &mut carrier,
        &payload,
        &name,
        &options.password,
        &params,
        entropy.as_mut(),
    )?;

    carrier.save(output_path)?;
    Ok(summary)
}

fn embed_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            HideError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} does not name a file", path.display()),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_carrier(path: &Path, width: u32, height: u32) {
        Carrier::filled(width, height, 0x80)
            .unwrap()
            .save(path)
            .unwrap();
    }

    fn fast(password: &str) -> EncodeOptions {
        EncodeOptions {
            password: password.into(),
            rounds: 100,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_options() {
        let options = EncodeOptions::default();
        assert_eq!(options.level, Level::Low);
        assert_eq!(options.rounds, 20_000);
        assert_eq!(options.entropy, EntropyBackend::Os);
    }

    #[test]
    fn test_encode_writes_png() {
        let dir = tempdir().unwrap();
        let carrier_path = dir.path().join("cover.png");
        let output_path = dir.path().join("out.png");
        let embed_path = dir.path().join("secret.txt");
        write_carrier(&carrier_path, 64, 64);
        std::fs::write(&embed_path, b"Hello, World!").unwrap();

        let summary = encode_file(&carrier_path, &output_path, &embed_path, &fast("pw")).unwrap();
        assert_eq!(summary.name, "secret.txt");
        assert_eq!(summary.payload_len, 13);

        let stego = Carrier::load(&output_path).unwrap();
        assert_eq!((stego.width(), stego.height()), (64, 64));
        assert_ne!(stego, Carrier::load(&carrier_path).unwrap());
    }

    #[test]
    fn test_oversized_embed_creates_no_output() {
        let dir = tempdir().unwrap();
        let carrier_path = dir.path().join("cover.png");
        let output_path = dir.path().join("out.png");
        let embed_path = dir.path().join("big.bin");
        write_carrier(&carrier_path, 32, 32);
        std::fs::write(&embed_path, vec![1u8; 4096]).unwrap();

        let err = encode_file(&carrier_path, &output_path, &embed_path, &fast("pw")).unwrap_err();
        assert!(matches!(err, HideError::CapacityExceeded { .. }));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_long_name_rejected() {
        let dir = tempdir().unwrap();
        let carrier_path = dir.path().join("cover.png");
        let embed_path = dir.path().join(format!("{}.txt", "a".repeat(40)));
        write_carrier(&carrier_path, 64, 64);
        std::fs::write(&embed_path, b"x").unwrap();

        let err = encode_file(
            &carrier_path,
            &dir.path().join("out.png"),
            &embed_path,
            &fast("pw"),
        )
        .unwrap_err();
        assert!(matches!(err, HideError::NameTooLong(_)));
    }

    #[test]
    fn test_missing_carrier() {
        let dir = tempdir().unwrap();
        let embed_path = dir.path().join("secret.txt");
        std::fs::write(&embed_path, b"x").unwrap();
        assert!(encode_file(
            &dir.path().join("missing.png"),
            &dir.path().join("out.png"),
            &embed_path,
            &fast("pw"),
        )
        .is_err());
    }
}
