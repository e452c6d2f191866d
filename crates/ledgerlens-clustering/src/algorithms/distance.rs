//! Maps a [`DistanceMetric`] to its pairwise string function.
//!
//! Similarity metrics (Jaro, Jaro-Winkler, match rating) are returned as-is
//! and consumed by the linkage as if they were distances, so the most
//! similar pairs end up the farthest apart. Downstream fixtures rely on
//! this orientation.

use ledgerlens_core::constants::{MATCH_RATING_MATCH_DISTANCE, MATCH_RATING_NON_MATCH_DISTANCE};
use ledgerlens_core::errors::ClusteringError;
use ledgerlens_core::models::DistanceMetric;

use super::match_rating;

/// Symmetric pairwise function over preprocessed strings.
pub type DistanceFn = fn(&str, &str) -> f64;

/// Look up the function for `metric`.
pub fn distance_function(metric: DistanceMetric) -> DistanceFn {
    match metric {
        DistanceMetric::Levenshtein => levenshtein,
        DistanceMetric::DamerauLevenshtein => damerau_levenshtein,
        DistanceMetric::Hamming => hamming,
        DistanceMetric::JaroSimilarity => jaro_similarity,
        DistanceMetric::JaroWinklerSimilarity => jaro_winkler_similarity,
        DistanceMetric::MatchRatingApproach => match_rating_approach,
    }
}

/// Look up the function for a wire identifier.
pub fn distance_function_by_name(name: &str) -> Result<DistanceFn, ClusteringError> {
    Ok(distance_function(name.parse()?))
}

pub fn levenshtein(a: &str, b: &str) -> f64 {
    strsim::levenshtein(a, b) as f64
}

/// Unrestricted Damerau-Levenshtein (adjacent transpositions may overlap edits).
pub fn damerau_levenshtein(a: &str, b: &str) -> f64 {
    strsim::damerau_levenshtein(a, b) as f64
}

/// Positional mismatches plus the length difference, so strings of unequal
/// length are still comparable.
pub fn hamming(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mismatches = a.iter().zip(b.iter()).filter(|(x, y)| x != y).count();
    (mismatches + a.len().abs_diff(b.len())) as f64
}

/// Jaro similarity; `0.0` when either side is empty.
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::jaro(a, b)
}

/// Jaro-Winkler similarity; `0.0` when either side is empty.
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::jaro_winkler(a, b)
}

/// Two-valued pseudo-distance over the match-rating comparator:
/// a match maps to `0.9`, anything else (non-match or undetermined) to `0.1`.
pub fn match_rating_approach(a: &str, b: &str) -> f64 {
    match match_rating::compare(a, b) {
        Some(true) => MATCH_RATING_MATCH_DISTANCE,
        _ => MATCH_RATING_NON_MATCH_DISTANCE,
    }
}
