use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClusteringError;

/// Agglomerative linkage strategy. The serialized names are wire-visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkageMethod {
    #[default]
    Average,
    Single,
    Complete,
    Weighted,
    Centroid,
    Median,
    Ward,
}

impl LinkageMethod {
    pub const ALL: [LinkageMethod; 7] = [
        Self::Average,
        Self::Single,
        Self::Complete,
        Self::Weighted,
        Self::Centroid,
        Self::Median,
        Self::Ward,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Single => "single",
            Self::Complete => "complete",
            Self::Weighted => "weighted",
            Self::Centroid => "centroid",
            Self::Median => "median",
            Self::Ward => "ward",
        }
    }

    fn expected() -> String {
        Self::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for LinkageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkageMethod {
    type Err = ClusteringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ClusteringError::UnknownLinkageMethod {
                value: s.to_string(),
                expected: Self::expected(),
            })
    }
}
