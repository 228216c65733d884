//! Hashing utilities for source archive checksums.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Fail unless the file hashes to `expected` (case-insensitive hex).
pub fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file(path)?;
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        bail!(
            "hash mismatch for {}:\n  expected: {}\n  actual:   {}",
            path.display(),
            expected,
            actual
        );
    }
    tracing::debug!("hash verified: {}", &actual[..16]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_sha256_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), b"hello").unwrap();
        assert_eq!(sha256_file(tmp.path()).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn test_verify_sha256() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), b"hello").unwrap();
        assert!(verify_sha256(tmp.path(), &HELLO_SHA256.to_uppercase()).is_ok());

        std::fs::write(tmp.path(), b"hello!").unwrap();
        let err = verify_sha256(tmp.path(), HELLO_SHA256).unwrap_err();
        assert!(err.to_string().contains("hash mismatch"));
    }
}
