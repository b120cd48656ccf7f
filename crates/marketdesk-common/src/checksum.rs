//! Checksum utilities for uploaded file verification

use crate::error::{MarketdeskError, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Compute the SHA-256 checksum of a byte slice, hex-encoded.
pub fn checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute the SHA-256 checksum of a file on disk.
pub fn checksum_file(path: impl AsRef<Path>) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Verify that a file on disk matches an expected checksum.
pub fn verify_file_checksum(path: impl AsRef<Path>, expected: &str) -> Result<bool> {
    let actual = checksum_file(path)?;
    if actual == expected {
        Ok(true)
    } else {
        Err(MarketdeskError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_checksum_bytes() {
        let checksum = checksum_bytes(b"hello world");
        assert_eq!(checksum, "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9");
    }

    #[test]
    fn test_checksum_file_matches_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();

        let checksum = checksum_file(file.path()).unwrap();
        assert_eq!(checksum, checksum_bytes(b"hello world"));
    }

    #[test]
    fn test_verify_file_checksum_mismatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();

        let result = verify_file_checksum(file.path(), "deadbeef");
        assert!(matches!(result, Err(MarketdeskError::ChecksumMismatch { .. })));
    }
}
