//! Seed detection between query and target sequences.
//!
//! A seed is a short exact contiguous match hypothesized to nucleate a longer
//! binding interaction. [`find_seed_match`] searches for the best one:
//!
//! 1. Window lengths are tried longest first (`max_len` down to `min_len`)
//! 2. Every window of the first sequence is looked up in the second
//! 3. The first length producing any match is final
//! 4. Ties at that length go to the earliest position in the second sequence
//!
//! ## Example
//!
//! ```rust
//! use rna_interact::matching::find_seed_match;
//!
//! let seed = find_seed_match("AUGCUACGUGAAGGCU", "CCUACGUGAAUU");
//! assert!(seed.has_seed);
//! assert_eq!(seed.length, 8);
//! ```

pub mod seed;

pub use seed::{find_seed_match, find_seed_match_with, SeedConfig, SeedRangeError};
