//! Secure random byte sources.
//!
//! The container protocol never picks a backend itself; callers choose an
//! [`EntropyBackend`] at configuration time and inject the resulting source.

use crate::error::{HideError, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Fills buffers with cryptographically secure random bytes
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;

    fn next_u32(&mut self) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes)?;
        Ok(u32::from_ne_bytes(bytes))
    }
}

/// The operating system CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| HideError::Entropy(e.to_string()))
    }
}

/// A read-only entropy device such as `/dev/urandom`
#[derive(Debug, Clone)]
pub struct DeviceEntropy {
    path: PathBuf,
}

impl DeviceEntropy {
    pub const DEFAULT_PATH: &'static str = "/dev/urandom";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for DeviceEntropy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl EntropySource for DeviceEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut device = File::open(&self.path)
            .map_err(|e| HideError::Entropy(format!("{}: {}", self.path.display(), e)))?;
        device
            .read_exact(buf)
            .map_err(|e| HideError::Entropy(format!("{}: {}", self.path.display(), e)))
    }
}

/// Adapter for any `rand` generator, e.g. a seeded `StdRng` for reproducible runs
#[derive(Debug, Clone)]
pub struct RngEntropy<R: RngCore>(pub R);

impl<R: RngCore> EntropySource for RngEntropy<R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.0
            .try_fill_bytes(buf)
            .map_err(|e| HideError::Entropy(e.to_string()))
    }
}

/// Entropy backend options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntropyBackend {
    #[default]
    Os,
    Urandom,
}

impl EntropyBackend {
    pub fn source(self) -> Box<dyn EntropySource> {
        match self {
            EntropyBackend::Os => Box::new(OsEntropy),
            EntropyBackend::Urandom => Box::new(DeviceEntropy::default()),
        }
    }
}

impl fmt::Display for EntropyBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyBackend::Os => f.write_str("os"),
            EntropyBackend::Urandom => f.write_str("urandom"),
        }
    }
}

impl std::str::FromStr for EntropyBackend {
    type Err = HideError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "os" => Ok(Self::Os),
            "urandom" | "dev-urandom" => Ok(Self::Urandom),
            _ => Err(HideError::UnsupportedEntropy(s.to_string())),
        }
    }
}
