use crate::codec::Level;
use crate::error::{HideError, Result};

/// Serialized header size in bytes
pub const HEADER_LEN: usize = 64;

/// File signature
pub const MAGIC: &[u8; 4] = b"HIDE";

/// Format version written by this implementation
pub const FORMAT_VERSION: u16 = 1;

/// Maximum embedded file name length in bytes
pub const NAME_LEN: usize = 32;

pub const RESERVED_LEN: usize = 12;

/// Embed header, stored encrypted right after the salt and IV.
///
/// Layout (numeric fields little-endian):
///
/// ```text
/// offset  size  field
///  0       4    signature  "HIDE"
///  4       2    version
///  6       1    level      (0=Low, 1=Medium, 2=High)
///  7       1    flags      (reserved, 0)
///  8       4    offset     (channel index of the payload)
/// 12       4    size       (padded payload length)
/// 16       4    checksum   (CRC-32 of the unpadded payload)
/// 20      32    name       (zero padded, unterminated when 32 bytes long)
/// 52      12    reserved   (all zero)
/// ```
///
/// Nothing authenticates the header. A wrong key is only detected because
/// the decrypted signature, version and reserved bytes stop making sense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub signature: [u8; 4],
    pub version: u16,
    pub level: u8,
    pub flags: u8,
    pub offset: u32,
    pub size: u32,
    pub checksum: u32,
    pub name: [u8; NAME_LEN],
    pub reserved: [u8; RESERVED_LEN],
}

impl Header {
    pub fn new(level: Level, offset: u32, size: u32, checksum: u32, name: &str) -> Result<Self> {
        Ok(Self {
            signature: *MAGIC,
            version: FORMAT_VERSION,
            level: level.to_byte(),
            flags: 0,
            offset,
            size,
            checksum,
            name: encode_name(name)?,
            reserved: [0u8; RESERVED_LEN],
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&self.signature);
        buf[4..6].copy_from_slice(&self.version.to_le_bytes());
        buf[6] = self.level;
        buf[7] = self.flags;
        buf[8..12].copy_from_slice(&self.offset.to_le_bytes());
        buf[12..16].copy_from_slice(&self.size.to_le_bytes());
        buf[16..20].copy_from_slice(&self.checksum.to_le_bytes());
        buf[20..52].copy_from_slice(&self.name);
        buf[52..64].copy_from_slice(&self.reserved);
        buf
    }

    /// Parse without validating; see [`Header::validate`]
    pub fn from_bytes(buf: &[u8; HEADER_LEN]) -> Self {
        let mut signature = [0u8; 4];
        signature.copy_from_slice(&buf[0..4]);
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&buf[20..52]);
        let mut reserved = [0u8; RESERVED_LEN];
        reserved.copy_from_slice(&buf[52..64]);

        Self {
            signature,
            version: u16::from_le_bytes([buf[4], buf[5]]),
            level: buf[6],
            flags: buf[7],
            offset: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            size: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
            checksum: u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]),
            name,
            reserved,
        }
    }

    /// Structural plausibility check after decryption.
    ///
    /// Any mismatch means the key was wrong or the carrier is corrupt; the
    /// two cases cannot be told apart.
    pub fn validate(&self) -> Result<Level> {
        if &self.signature != MAGIC
            || self.version != FORMAT_VERSION
            || self.reserved.iter().any(|&b| b != 0)
        {
            return Err(HideError::AuthenticationFailed);
        }
        Level::from_byte(self.level).ok_or(HideError::AuthenticationFailed)
    }

    /// Embedded file name, lossily decoded
    pub fn name(&self) -> String {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(NAME_LEN);
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }
}

/// Reject names that do not fit the fixed header field
pub fn check_name(name: &str) -> Result<()> {
    if name.len() > NAME_LEN {
        return Err(HideError::NameTooLong(name.to_string()));
    }
    Ok(())
}

fn encode_name(name: &str) -> Result<[u8; NAME_LEN]> {
    check_name(name)?;
    let bytes = name.as_bytes();
    let mut out = [0u8; NAME_LEN];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(out)
}
