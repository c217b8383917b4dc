use crate::carrier::Carrier;
use crate::container::extract;
use crate::crypto::KdfParams;
use crate::error::{HideError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for the decode command
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub password: String,
    pub rounds: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            password: String::new(),
            rounds: KdfParams::DEFAULT_ROUNDS,
        }
    }
}

/// Recover the file hidden in `carrier_path`.
///
/// Without an explicit `output_path` the embedded name is used, reduced to
/// its final component. Returns the path written.
pub fn decode_file(
    carrier_path: &Path,
    output_path: Option<&Path>,
    options: &DecodeOptions,
) -> Result<PathBuf> {
    let carrier = Carrier::load(carrier_path)?;
    let kdf = KdfParams {
        rounds: options.rounds,
    };
    let extracted = extract(&carrier, &options.password, &kdf)?;

    let target = match output_path {
        Some(path) => path.to_path_buf(),
        None => safe_name(&extracted.name).ok_or(HideError::MissingOutput)?,
    };
    fs::write(&target, &extracted.data)?;
    Ok(target)
}

/// Strip directories from a header supplied name
fn safe_name(name: &str) -> Option<PathBuf> {
    Path::new(name)
        .file_name()
        .filter(|n| !n.is_empty())
        .map(PathBuf::from)
}
