use thiserror::Error;

#[derive(Error, Debug)]
pub enum HideError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid carrier: {0}")]
    InvalidCarrier(String),

    #[error("Embed too large: {needed} bytes needed, {available} bytes available")]
    CapacityExceeded { needed: usize, available: usize },

    #[error("File name '{0}' is over 32 bytes")]
    NameTooLong(String),

    #[error("Unable to generate random bytes: {0}")]
    Entropy(String),

    #[error("Decryption failed, invalid key or corrupt file")]
    AuthenticationFailed,

    #[error("File is corrupted: {0}")]
    IntegrityError(String),

    #[error("Invalid cipher input length: {0}. Must be a multiple of 16")]
    InvalidBlockLength(usize),

    #[error("Range of {len} bytes at offset {offset} exceeds carrier of {capacity} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    #[error("Unsupported encoding level: {0}")]
    UnsupportedLevel(String),

    #[error("Unsupported entropy source: {0}")]
    UnsupportedEntropy(String),

    #[error("No output path given and the embed has no usable file name")]
    MissingOutput,
}

pub type Result<T> = std::result::Result<T, HideError>;
