use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DistanceMetric, LinkageMethod};
use crate::errors::{FrequencyError, LedgerlensResult};

/// Which field transactions are grouped by when computing frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UniqueKey {
    Category,
    TransactionDescription,
    ClusteredTransactionDescription,
}

impl UniqueKey {
    pub const ALL: [UniqueKey; 3] = [
        Self::Category,
        Self::TransactionDescription,
        Self::ClusteredTransactionDescription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::TransactionDescription => "transactionDescription",
            Self::ClusteredTransactionDescription => "clusteredTransactionDescription",
        }
    }
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UniqueKey {
    type Err = FrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| FrequencyError::UnknownUniqueKey {
                value: s.to_string(),
                expected: Self::ALL.map(|k| k.as_str()).join(","),
            })
    }
}

/// Period unit a frequency is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = FrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            other => Err(FrequencyError::UnknownPeriod {
                value: other.to_string(),
                expected: "day,month".to_string(),
            }),
        }
    }
}

/// Clustering parameters, only meaningful for the clustered description key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteringParams {
    pub distance_measure: DistanceMetric,
    pub linkage_method: LinkageMethod,
    pub number_of_cluster: usize,
}

/// Grouping key together with whatever it needs to be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrequencyKey {
    Category,
    TransactionDescription,
    ClusteredTransactionDescription(ClusteringParams),
}

impl FrequencyKey {
    pub fn unique_key(&self) -> UniqueKey {
        match self {
            Self::Category => UniqueKey::Category,
            Self::TransactionDescription => UniqueKey::TransactionDescription,
            Self::ClusteredTransactionDescription(_) => UniqueKey::ClusteredTransactionDescription,
        }
    }
}

/// Validated frequency configuration. The clustering triple cannot be
/// partially present: it lives inside the clustered key variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrequencyOption {
    pub key: FrequencyKey,
    pub per: Period,
}

impl FrequencyOption {
    pub fn new(key: FrequencyKey, per: Period) -> Self {
        Self { key, per }
    }

    pub fn unique_key(&self) -> UniqueKey {
        self.key.unique_key()
    }

    pub fn clustering(&self) -> Option<&ClusteringParams> {
        match &self.key {
            FrequencyKey::ClusteredTransactionDescription(params) => Some(params),
            _ => None,
        }
    }
}

impl Default for FrequencyOption {
    fn default() -> Self {
        Self::new(FrequencyKey::Category, Period::Month)
    }
}

/// Wire-shaped frequency option as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyOptionRequest {
    pub unique_key: String,
    pub per: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_measure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkage_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_cluster: Option<i64>,
}

impl FrequencyOptionRequest {
    /// Validate into a [`FrequencyOption`].
    ///
    /// The three clustering fields are accepted all together or not at all.
    /// A complete triple sent with a raw key is validated, then dropped.
    pub fn validate(&self) -> LedgerlensResult<FrequencyOption> {
        let unique_key: UniqueKey = self.unique_key.parse()?;
        let per: Period = self.per.parse()?;

        let mut missing = Vec::new();
        if self.distance_measure.is_none() {
            missing.push("distanceMeasure");
        }
        if self.linkage_method.is_none() {
            missing.push("linkageMethod");
        }
        if self.number_of_cluster.is_none() {
            missing.push("numberOfCluster");
        }

        let params = match (&self.distance_measure, &self.linkage_method, self.number_of_cluster) {
            (Some(distance), Some(linkage), Some(count)) => {
                let distance_measure: DistanceMetric = distance.parse()?;
                let linkage_method: LinkageMethod = linkage.parse()?;
                if count < 1 {
                    return Err(FrequencyError::ZeroClusterCount.into());
                }
                Some(ClusteringParams {
                    distance_measure,
                    linkage_method,
                    number_of_cluster: count as usize,
                })
            }
            (None, None, None) => None,
            _ => return Err(FrequencyError::IncompleteClusteringParams { missing }.into()),
        };

        let key = match (unique_key, params) {
            (UniqueKey::Category, _) => FrequencyKey::Category,
            (UniqueKey::TransactionDescription, _) => FrequencyKey::TransactionDescription,
            (UniqueKey::ClusteredTransactionDescription, Some(params)) => {
                FrequencyKey::ClusteredTransactionDescription(params)
            }
            (UniqueKey::ClusteredTransactionDescription, None) => {
                return Err(FrequencyError::IncompleteClusteringParams { missing }.into())
            }
        };

        Ok(FrequencyOption::new(key, per))
    }
}

impl From<FrequencyOption> for FrequencyOptionRequest {
    fn from(option: FrequencyOption) -> Self {
        let params = option.clustering().copied();
        Self {
            unique_key: option.unique_key().as_str().to_string(),
            per: option.per.as_str().to_string(),
            distance_measure: params.map(|p| p.distance_measure.as_str().to_string()),
            linkage_method: params.map(|p| p.linkage_method.as_str().to_string()),
            number_of_cluster: params.map(|p| p.number_of_cluster as i64),
        }
    }
}
