use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce};
use thiserror::Error;

const NONCE_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("encryption failed")]
    Encrypt,
    #[error("ciphertext too short")]
    TooShort,
    #[error("decryption failed")]
    Decrypt,
}

/// AES-256-GCM cipher for submission files. The key lives only in process
/// memory and is regenerated on every start, so ciphertexts do not survive a
/// restart. Submissions are deleted right after grading, which makes that
/// acceptable.
pub struct FileCipher {
    cipher: Aes256Gcm,
}

impl FileCipher {
    pub fn generate() -> Self {
        let key: Key<Aes256Gcm> = Aes256Gcm::generate_key(OsRng);
        FileCipher {
            cipher: Aes256Gcm::new(&key),
        }
    }

    /// Encrypts `plaintext`, prepending the 12-byte nonce to the ciphertext.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| CipherError::Encrypt)?;
        let mut out = nonce.to_vec();
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypts a buffer produced by [`encrypt`](Self::encrypt).
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        if data.len() < NONCE_LEN {
            return Err(CipherError::TooShort);
        }
        let nonce = Nonce::from_slice(&data[..NONCE_LEN]);
        self.cipher
            .decrypt(nonce, &data[NONCE_LEN..])
            .map_err(|_| CipherError::Decrypt)
    }
}
