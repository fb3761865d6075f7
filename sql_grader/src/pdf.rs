use crate::crypto::FileCipher;
use crate::storage::EncryptedSubmission;
use log::error;

/// Decrypts the stored submission and extracts the text of all pages, in page
/// order. Extraction is best effort: any decrypt or parse failure is logged
/// and treated as an empty answer rather than a fatal error.
pub fn extract_text(cipher: &FileCipher, submission: &EncryptedSubmission) -> String {
    let bytes = match submission.read(cipher) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("failed to read submission: {e}");
            return String::new();
        }
    };
    match pdf_extract::extract_text_from_mem(&bytes) {
        Ok(text) => text,
        Err(e) => {
            error!("failed to extract pdf text: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_extract_to_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let cipher = FileCipher::generate();
        let submission =
            EncryptedSubmission::write_in(&cipher, b"this is not a pdf", dir.path()).unwrap();
        assert_eq!(extract_text(&cipher, &submission), "");
    }

    #[test]
    fn unreadable_submission_extracts_to_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let cipher = FileCipher::generate();
        let submission = EncryptedSubmission::write_in(&cipher, b"%PDF-", dir.path()).unwrap();
        // Wrong key: decryption fails, which counts as "no answer".
        let other = FileCipher::generate();
        assert_eq!(extract_text(&other, &submission), "");
    }
}
