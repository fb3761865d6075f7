use crate::crypto::{CipherError, FileCipher};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A submission stored encrypted on disk for the duration of one request.
/// The file gets a per-request unique name and is removed when the value is
/// dropped, on every exit path.
#[derive(Debug)]
pub struct EncryptedSubmission {
    path: PathBuf,
}

impl EncryptedSubmission {
    pub fn write(cipher: &FileCipher, content: &[u8]) -> Result<Self, StorageError> {
        Self::write_in(cipher, content, std::env::temp_dir())
    }

    pub fn write_in(
        cipher: &FileCipher,
        content: &[u8],
        dir: impl AsRef<Path>,
    ) -> Result<Self, StorageError> {
        let path = dir
            .as_ref()
            .join(format!("submission_{}.pdf.enc", Uuid::new_v4()));
        fs::write(&path, cipher.encrypt(content)?)?;
        Ok(EncryptedSubmission { path })
    }

    pub fn read(&self, cipher: &FileCipher) -> Result<Vec<u8>, StorageError> {
        Ok(cipher.decrypt(&fs::read(&self.path)?)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EncryptedSubmission {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!("failed to remove {}: {e}", self.path.display());
        }
    }
}
