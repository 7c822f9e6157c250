//! Team and outcome name normalization
//!
//! Gamdom spells teams one way, The Odds API another ("Bayern München" vs
//! "Bayern Munchen"). Both sides of every comparison go through [`normalize`]
//! so that the matcher can use exact key lookups.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a team or outcome name for comparison.
///
/// Lowercases, strips accents (NFKD decomposition, combining marks dropped)
/// and collapses all whitespace runs to single spaces. Pure and idempotent.
pub fn normalize(name: &str) -> String {
    let stripped: String = name
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
