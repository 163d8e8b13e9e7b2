//! Content fingerprinting for change detection.
//!
//! A photo is reprocessed if and only if its fingerprint differs from the one
//! recorded in the category manifest. The fingerprint is a SHA-256 over the
//! full file bytes — content-based rather than mtime-based, so it survives
//! `git checkout`, `touch`, and backup-restore cycles that reset timestamps
//! without changing pixels. File size is deliberately not used as a fast path.

use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

/// SHA-256 of a file's contents, as a lowercase hex string.
pub fn fingerprint(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn fingerprint_deterministic() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        fs::write(&path, b"pixel soup").unwrap();

        let h1 = fingerprint(&path).unwrap();
        let h2 = fingerprint(&path).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn fingerprint_changes_with_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");

        fs::write(&path, b"version 1").unwrap();
        let h1 = fingerprint(&path).unwrap();

        fs::write(&path, b"version 2").unwrap();
        let h2 = fingerprint(&path).unwrap();

        assert_ne!(h1, h2);
    }

    #[test]
    fn fingerprint_ignores_path() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.jpg");
        let b = tmp.path().join("b.jpg");
        fs::write(&a, b"same bytes").unwrap();
        fs::write(&b, b"same bytes").unwrap();

        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn fingerprint_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(fingerprint(&tmp.path().join("absent.jpg")).is_err());
    }
}
