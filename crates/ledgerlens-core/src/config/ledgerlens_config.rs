//! Top-level LedgerLens configuration with layered resolution.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ClusteringConfig, DatasetConfig, FrequencyConfig, ObservabilityConfig};
use crate::constants::ENV_PREFIX;
use crate::errors::ConfigError;
use crate::models::{DistanceMetric, LinkageMethod};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`LEDGERLENS_*`)
/// 3. Config file
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerlensConfig {
    pub dataset: DatasetConfig,
    pub clustering: ClusteringConfig,
    pub frequency: FrequencyConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub csv_path: Option<String>,
    pub linkage_method: Option<LinkageMethod>,
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl LedgerlensConfig {
    /// Load configuration: defaults, then `path` (if given), then the
    /// process environment, then `cli_overrides`.
    pub fn load(path: Option<&Path>, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides_from(|name| std::env::var(name).ok());

        if let Some(cli) = cli_overrides {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clustering.metrics.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "clustering.metrics".to_string(),
                message: "at least one distance metric is required".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for metric in &self.clustering.metrics {
            if !seen.insert(metric) {
                return Err(ConfigError::ValidationFailed {
                    field: "clustering.metrics".to_string(),
                    message: format!("{metric} is listed more than once"),
                });
            }
        }
        if self.observability.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Apply `LEDGERLENS_*` overrides read through `lookup`.
    /// Values that fail to parse are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));

        if let Some(val) = var("CSV_PATH") {
            self.dataset.csv_path = Some(val);
        }
        if let Some(v) = var("DAY_FIRST").and_then(|val| val.parse::<bool>().ok()) {
            self.dataset.day_first = v;
        }
        if let Some(val) = var("METRICS") {
            let parsed: Result<Vec<DistanceMetric>, _> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse)
                .collect();
            if let Ok(metrics) = parsed {
                self.clustering.metrics = metrics;
            }
        }
        if let Some(v) = var("LINKAGE_METHOD").and_then(|val| val.parse().ok()) {
            self.clustering.default_linkage_method = v;
        }
        if let Some(v) = var("UNIQUE_KEY").and_then(|val| val.parse().ok()) {
            self.frequency.default_unique_key = v;
        }
        if let Some(v) = var("PER").and_then(|val| val.parse().ok()) {
            self.frequency.default_per = v;
        }
        if let Some(val) = var("LOG_LEVEL") {
            self.observability.log_level = val;
        }
        if let Some(v) = var("JSON_LOGS").and_then(|val| val.parse::<bool>().ok()) {
            self.observability.json_logs = v;
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(ref path) = cli.csv_path {
            self.dataset.csv_path = Some(path.clone());
        }
        if let Some(method) = cli.linkage_method {
            self.clustering.default_linkage_method = method;
        }
        if let Some(ref level) = cli.log_level {
            self.observability.log_level = level.clone();
        }
        if let Some(json) = cli.json_logs {
            self.observability.json_logs = json;
        }
    }
}
