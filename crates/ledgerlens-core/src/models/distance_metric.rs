use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClusteringError;

/// Pairwise string-distance metric. The serialized names are wire-visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceMetric {
    Levenshtein,
    DamerauLevenshtein,
    Hamming,
    JaroSimilarity,
    JaroWinklerSimilarity,
    #[serde(alias = "MatchRatingApproach")]
    MatchRatingApproach,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 6] = [
        Self::Levenshtein,
        Self::DamerauLevenshtein,
        Self::Hamming,
        Self::JaroSimilarity,
        Self::JaroWinklerSimilarity,
        Self::MatchRatingApproach,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Levenshtein => "levenshtein",
            Self::DamerauLevenshtein => "damerauLevenshtein",
            Self::Hamming => "hamming",
            Self::JaroSimilarity => "jaroSimilarity",
            Self::JaroWinklerSimilarity => "jaroWinklerSimilarity",
            Self::MatchRatingApproach => "matchRatingApproach",
        }
    }

    /// Whether the metric yields a similarity (higher = closer) that is fed
    /// to the linkage as-is.
    pub fn is_similarity(&self) -> bool {
        matches!(
            self,
            Self::JaroSimilarity | Self::JaroWinklerSimilarity | Self::MatchRatingApproach
        )
    }

    fn expected() -> String {
        Self::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = ClusteringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "levenshtein" => Ok(Self::Levenshtein),
            "damerauLevenshtein" => Ok(Self::DamerauLevenshtein),
            "hamming" => Ok(Self::Hamming),
            "jaroSimilarity" => Ok(Self::JaroSimilarity),
            "jaroWinklerSimilarity" => Ok(Self::JaroWinklerSimilarity),
            "matchRatingApproach" | "MatchRatingApproach" => Ok(Self::MatchRatingApproach),
            other => Err(ClusteringError::UnknownDistanceMetric {
                value: other.to_string(),
                expected: Self::expected(),
            }),
        }
    }
}
