//! Section similarity classification
//!
//! Two section texts are compared with a content checksum first; only when
//! the checksums differ is a character-level alignment ratio computed. The
//! alignment runs under a deadline, and texts whose lengths alone rule out
//! a similar match are never aligned.

use std::time::Duration;

use notesync_fs::checksum::compute_content_checksum;
use serde::{Deserialize, Serialize};
use similar::{Algorithm, TextDiff};

/// Ratio above which two differing texts are treated as unchanged.
pub const SIMILARITY_THRESHOLD: f64 = 0.9;

/// Time budget for one character alignment. Past it the diff is coarse.
pub const ALIGNMENT_TIMEOUT: Duration = Duration::from_millis(250);

/// Outcome of comparing two section texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    /// Checksums are equal
    Identical,
    /// Checksums differ but the alignment ratio exceeds the threshold
    Similar,
    /// Substantive divergence
    Different,
}

impl Similarity {
    /// Whether the two texts should be treated as the same content.
    pub fn is_unchanged(self) -> bool {
        matches!(self, Self::Identical | Self::Similar)
    }
}

/// Normalized alignment ratio in `[0, 1]` between two strings.
///
/// Computed as `2 * M / T` where `M` is the number of characters in the
/// longest matching alignment and `T` the combined length.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .timeout(ALIGNMENT_TIMEOUT)
        .diff_chars(a, b)
        .ratio() as f64
}

/// Best ratio two texts of these lengths could reach.
fn ratio_upper_bound(a: &str, b: &str) -> f64 {
    let (a, b) = (a.chars().count(), b.chars().count());
    if a + b == 0 {
        return 1.0;
    }
    2.0 * a.min(b) as f64 / (a + b) as f64
}

/// Classify two section texts as identical, similar, or different.
pub fn classify(a: &str, b: &str) -> Similarity {
    if compute_content_checksum(a) == compute_content_checksum(b) {
        return Similarity::Identical;
    }
    if ratio_upper_bound(a, b) <= SIMILARITY_THRESHOLD {
        return Similarity::Different;
    }

    let ratio = similarity_ratio(a, b);
    tracing::trace!(ratio, "section similarity");
    if ratio > SIMILARITY_THRESHOLD {
        Similarity::Similar
    } else {
        Similarity::Different
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text() {
        assert_eq!(classify("- alpha\n- beta", "- alpha\n- beta"), Similarity::Identical);
    }

    #[test]
    fn test_empty_strings_are_identical() {
        assert_eq!(classify("", ""), Similarity::Identical);
    }

    #[test]
    fn test_trailing_space_is_similar() {
        let a = "- alpha is the first letter of the greek alphabet";
        let b = "- alpha is the first letter of the greek alphabet ";
        assert_eq!(classify(a, b), Similarity::Similar);
    }

    #[test]
    fn test_rewrite_is_different() {
        assert_eq!(classify("- alpha\n- beta", "Completely new prose."), Similarity::Different);
    }

    #[test]
    fn test_ratio_bounds() {
        assert_eq!(similarity_ratio("abc", "abc"), 1.0);
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        let r = similarity_ratio("abcd", "abce");
        assert!(r > 0.7 && r < 0.8, "ratio was {r}");
    }

    #[test]
    fn test_length_gap_is_different() {
        let short = "- alpha";
        let long = format!("{short}{}", " beta".repeat(20));
        assert!(ratio_upper_bound(short, &long) <= SIMILARITY_THRESHOLD);
        assert_eq!(classify(short, &long), Similarity::Different);
    }

    #[test]
    fn test_large_unrelated_texts_finish_quickly() {
        fn letters(mut seed: u32, len: usize) -> String {
            (0..len)
                .map(|_| {
                    seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    char::from(b'a' + ((seed >> 16) % 26) as u8)
                })
                .collect()
        }
        let a = letters(1, 40_000);
        let b = letters(7, 40_000);

        let start = std::time::Instant::now();
        assert_eq!(classify(&a, &b), Similarity::Different);
        assert!(start.elapsed() < std::time::Duration::from_secs(10));
    }

    #[test]
    fn test_is_unchanged() {
        assert!(Similarity::Identical.is_unchanged());
        assert!(Similarity::Similar.is_unchanged());
        assert!(!Similarity::Different.is_unchanged());
    }
}
