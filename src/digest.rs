//! SHA-512 content digests for bundle files.

use crate::error::BundleError;
use sha2::{Digest, Sha512};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Algorithm tag carried by every digest on the wire.
pub const DIGEST_PREFIX: &str = "SHA-512:";

/// Compute the SHA-512 digest of a file's contents.
///
/// Streams the full byte stream through the hasher and returns the
/// lowercase hex encoding of the 64-byte digest. Fails if the file cannot
/// be opened or read mid-stream; a partial digest is never returned, so a
/// caller can never mistake a failed read for a valid checksum.
pub fn file_digest(path: &Path) -> Result<String, BundleError> {
    let file = File::open(path).map_err(|e| BundleError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha512::new();
    io::copy(&mut reader, &mut hasher).map_err(|e| BundleError::io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Prefix a raw hex digest with the algorithm tag.
pub fn tagged_digest(hex: &str) -> String {
    format!("{}{}", DIGEST_PREFIX, hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Canonical SHA-512 digest of the empty byte string.
    const EMPTY_SHA512: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";

    #[test]
    fn test_digest_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("policy.xml");
        fs::write(&file, "<Policy/>").unwrap();

        let digest1 = file_digest(&file).unwrap();
        let digest2 = file_digest(&file).unwrap();
        assert_eq!(digest1, digest2);
        assert_eq!(digest1.len(), 128, "SHA-512 hex digest is 128 chars");
    }

    #[test]
    fn test_digest_changes_with_content() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("policy.xml");

        fs::write(&file, "<Policy/>").unwrap();
        let digest1 = file_digest(&file).unwrap();

        fs::write(&file, "<policy/>").unwrap();
        let digest2 = file_digest(&file).unwrap();

        assert_ne!(digest1, digest2);
    }

    #[test]
    fn test_digest_empty_file_known_value() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("empty");
        fs::write(&file, "").unwrap();

        assert_eq!(file_digest(&file).unwrap(), EMPTY_SHA512);
    }

    #[test]
    fn test_digest_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.xml");

        let result = file_digest(&missing);
        assert!(matches!(result, Err(BundleError::Io { .. })));
    }

    #[test]
    fn test_tagged_digest_prefix() {
        assert_eq!(tagged_digest("abc123"), "SHA-512:abc123");
        assert_eq!(tagged_digest(""), "SHA-512:");
    }
}
