//! SHA-256 checksum utilities
//!
//! Provides a single canonical checksum format (`sha256:<hex>`) used to
//! decide whether two section texts are byte-identical without diffing them.

use sha2::{Digest, Sha256};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
///
/// The digest is order and whitespace sensitive. Returns a string in the
/// canonical format `"sha256:<hex>"`.
pub fn compute_content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_checksum_has_prefix() {
        let checksum = compute_content_checksum("- alpha");
        assert!(checksum.starts_with("sha256:"));
    }

    #[test]
    fn content_checksum_is_whitespace_sensitive() {
        let a = compute_content_checksum("- alpha");
        let b = compute_content_checksum("- alpha ");
        assert_ne!(a, b);
    }

    #[test]
    fn content_checksum_known_value() {
        let checksum = compute_content_checksum("hello world");
        assert_eq!(
            checksum,
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }
}
