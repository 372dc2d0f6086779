use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::SeedMatch;

pub const DEFAULT_SEED_MIN_LEN: usize = 6;
pub const DEFAULT_SEED_MAX_LEN: usize = 8;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid seed length range {min_len}..={max_len}: need 1 <= min <= max")]
pub struct SeedRangeError {
    pub min_len: usize,
    pub max_len: usize,
}

/// Window length bounds for seed detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_SEED_MIN_LEN,
            max_len: DEFAULT_SEED_MAX_LEN,
        }
    }
}

impl SeedConfig {
    /// Create a seed configuration
    ///
    /// # Errors
    ///
    /// Returns `SeedRangeError` if `min_len` is zero or greater than `max_len`.
    pub fn new(min_len: usize, max_len: usize) -> Result<Self, SeedRangeError> {
        if min_len == 0 || min_len > max_len {
            return Err(SeedRangeError { min_len, max_len });
        }
        Ok(Self { min_len, max_len })
    }
}

/// Find the best seed with the default 6-8 nt window range
#[must_use]
pub fn find_seed_match(first: &str, second: &str) -> SeedMatch {
    find_seed_match_with(first, second, &SeedConfig::default())
}

/// Find the longest exact window of `first` that occurs in `second`.
///
/// Comparison is case-insensitive. Among windows of the winning length the one
/// whose first occurrence in `second` is earliest wins; equal positions keep
/// the earliest window of `first`. Positions in the result are 1-based.
#[must_use]
pub fn find_seed_match_with(first: &str, second: &str, config: &SeedConfig) -> SeedMatch {
    if first.is_empty() || second.is_empty() || config.min_len == 0 {
        return SeedMatch::none();
    }

    let first: Vec<char> = first.chars().flat_map(char::to_uppercase).collect();
    let second: Vec<char> = second.chars().flat_map(char::to_uppercase).collect();

    for length in (config.min_len..=config.max_len).rev() {
        if length > first.len() || length > second.len() {
            continue;
        }

        // (start in first, start in second), both 0-based
        let mut best: Option<(usize, usize)> = None;
        for (i, window) in first.windows(length).enumerate() {
            let Some(j) = second.windows(length).position(|w| w == window) else {
                continue;
            };
            if best.map_or(true, |(_, best_j)| j < best_j) {
                best = Some((i, j));
            }
        }

        // Shorter windows are never considered once a length has matched
        if let Some((i, j)) = best {
            return SeedMatch::found(length, i + 1, j + 1);
        }
    }

    SeedMatch::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Window of `first` described by `seed` must occur in `second` where reported
    fn assert_seed_consistent(first: &str, second: &str, seed: &SeedMatch) {
        let first: Vec<char> = first.to_uppercase().chars().collect();
        let second: Vec<char> = second.to_uppercase().chars().collect();
        let i = seed.seed_start_in_first.unwrap() - 1;
        let j = seed.seed_start_in_second.unwrap() - 1;
        assert_eq!(
            &first[i..i + seed.length],
            &second[j..j + seed.length],
            "seed {seed:?} does not point at matching windows"
        );
    }

    #[test]
    fn test_empty_inputs_have_no_seed() {
        assert_eq!(find_seed_match("", "ACGUACGU"), SeedMatch::none());
        assert_eq!(find_seed_match("ACGUACGU", ""), SeedMatch::none());
        assert_eq!(find_seed_match("", ""), SeedMatch::none());
    }

    #[test]
    fn test_no_shared_window() {
        let seed = find_seed_match("AAAAAAAA", "CCCCCCCC");
        assert_eq!(seed, SeedMatch::none());
    }

    #[test]
    fn test_prefers_longer_seed() {
        // "ACGTAC" (6-mer) appears early in b, the full 8-mer later
        let a = "ACGTACGT";
        let b = "ACGTACTTTTACGTACGT";
        let seed = find_seed_match(a, b);
        assert!(seed.has_seed);
        assert_eq!(seed.length, 8);
        assert_eq!(seed.seed_start_in_first, Some(1));
        assert_eq!(seed.seed_start_in_second, Some(11));
        assert_seed_consistent(a, b, &seed);
    }

    #[test]
    fn test_tie_break_earliest_in_second() {
        // Two distinct 7-mers of `a` occur in `b`; the second one occurs earlier in b
        let a = "GGGGGGGAUUUUUUU";
        let b = "CUUUUUUUCAGGGGGGGC";
        let seed = find_seed_match(a, b);
        assert_eq!(seed.length, 7);
        assert_eq!(seed.seed_start_in_second, Some(2));
        assert_eq!(seed.seed_start_in_first, Some(9));
        assert_seed_consistent(a, b, &seed);
    }

    #[test]
    fn test_equal_position_keeps_first_window() {
        // Both 6-mer windows of "AAAAAAA" first occur at position 1 of b
        let config = SeedConfig::new(6, 6).unwrap();
        let seed = find_seed_match_with("AAAAAAA", "AAAAAAAC", &config);
        assert_eq!(seed.length, 6);
        assert_eq!(seed.seed_start_in_first, Some(1));
        assert_eq!(seed.seed_start_in_second, Some(1));
    }

    #[test]
    fn test_case_insensitive() {
        let seed = find_seed_match("acguacgu", "NNACGUACGUNN");
        assert_eq!(seed.length, 8);
        assert_eq!(seed.seed_start_in_second, Some(3));
    }

    #[test]
    fn test_sequences_shorter_than_min_len() {
        assert_eq!(find_seed_match("ACGUA", "ACGUA"), SeedMatch::none());
    }

    #[test]
    fn test_example_pair_is_consistent() {
        let a = "AUGCUACGUGAAGGCU";
        let b = "CUCCGCUUUCACGCGGAUUACG";
        let seed = find_seed_match(a, b);
        if seed.has_seed {
            assert!((6..=8).contains(&seed.length));
            assert_seed_consistent(a, b, &seed);
        } else {
            assert_eq!(seed, SeedMatch::none());
        }
    }

    #[test]
    fn test_custom_range() {
        let config = SeedConfig::new(3, 4).unwrap();
        let seed = find_seed_match_with("GGAUCC", "UUAUCUU", &config);
        assert_eq!(seed.length, 3);
        assert_eq!(seed.seed_start_in_first, Some(3));
        assert_eq!(seed.seed_start_in_second, Some(3));
    }

    #[test]
    fn test_seed_config_validation() {
        assert!(SeedConfig::new(0, 4).is_err());
        assert_eq!(
            SeedConfig::new(9, 8),
            Err(SeedRangeError {
                min_len: 9,
                max_len: 8
            })
        );
        assert!(SeedConfig::new(7, 7).is_ok());
    }
}
