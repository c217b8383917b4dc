//! CBC chaining session over [`Aes256`].

use super::aes::Aes256;
use super::{Key, BLOCK_LEN};
use crate::error::{HideError, Result};

/// A CBC session that owns its chaining value.
///
/// Every call continues the same logical stream: after a call the chaining
/// value is the last ciphertext block processed. Two sessions built from the
/// same key and IV are independent streams.
pub struct CbcCipher {
    cipher: Aes256,
    chain: [u8; BLOCK_LEN],
}

impl CbcCipher {
    pub fn new(key: &Key, iv: &[u8; BLOCK_LEN]) -> Self {
        Self {
            cipher: Aes256::new(key),
            chain: *iv,
        }
    }

    /// Current chaining value (the IV for the next block)
    pub fn chaining_value(&self) -> &[u8; BLOCK_LEN] {
        &self.chain
    }

    pub fn cbc_encrypt(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        check_len(data)?;
        let mut out = Vec::with_capacity(data.len());
        for chunk in data.chunks_exact(BLOCK_LEN) {
            let mut block = self.chain;
            for (b, p) in block.iter_mut().zip(chunk) {
                *b ^= p;
            }
            self.cipher.encrypt_block(&mut block);
            out.extend_from_slice(&block);
            self.chain = block;
        }
        Ok(out)
    }

    pub fn cbc_decrypt(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        check_len(data)?;
        let mut out = Vec::with_capacity(data.len());
        for chunk in data.chunks_exact(BLOCK_LEN) {
            let mut block = [0u8; BLOCK_LEN];
            block.copy_from_slice(chunk);
            self.cipher.decrypt_block(&mut block);
            for (b, c) in block.iter_mut().zip(self.chain) {
                *b ^= c;
            }
            out.extend_from_slice(&block);
            self.chain.copy_from_slice(chunk);
        }
        Ok(out)
    }
}

fn check_len(data: &[u8]) -> Result<()> {
    if data.len() % BLOCK_LEN != 0 {
        return Err(HideError::InvalidBlockLength(data.len()));
    }
    Ok(())
}
