//! Checksums for downloaded toolchain archives.

use anyhow::{bail, Result};
use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Check `data` against an expected hex digest (case-insensitive).
pub fn verify_sha256(data: &[u8], expected: &str, what: &str) -> Result<()> {
    let actual = sha256_bytes(data);
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        bail!(
            "hash mismatch for {}:\n  expected: {}\n  actual:   {}",
            what,
            expected,
            actual
        );
    }
    Ok(())
}
