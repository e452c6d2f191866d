use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledgerlens_core::config::CliOverrides;
use ledgerlens_core::models::{DistanceMetric, FrequencyOptionRequest, LinkageMethod};
use ledgerlens_core::LedgerlensConfig;
use ledgerlens_dataset::TransactionDataset;

#[derive(Debug, Parser)]
#[command(name = "ledgerlens", version, about = "Transaction frequency and description clustering")]
struct Args {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ledger CSV, overriding `dataset.csv_path`.
    #[arg(long, global = true)]
    csv: Option<String>,

    /// Linkage method every clusterer starts with.
    #[arg(long, global = true, value_parser = parse_linkage)]
    default_linkage: Option<LinkageMethod>,

    /// Log filter used when LEDGERLENS_LOG is unset.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every transaction with its derived columns.
    Transactions,
    /// Recompute frequencies and print them per transaction.
    Frequency {
        #[arg(long, default_value = "category")]
        unique_key: String,
        #[arg(long, default_value = "month")]
        per: String,
        #[arg(long)]
        distance_measure: Option<String>,
        #[arg(long)]
        linkage_method: Option<String>,
        #[arg(long)]
        number_of_cluster: Option<i64>,
    },
    /// Print the unique descriptions with their cluster ids.
    Clusters {
        #[arg(long, value_parser = parse_metric)]
        metric: DistanceMetric,
        #[arg(long, value_parser = parse_linkage, default_value = "average")]
        linkage: LinkageMethod,
        #[arg(short = 'k', long)]
        number_of_cluster: usize,
    },
}

fn parse_metric(value: &str) -> Result<DistanceMetric, String> {
    value.parse().map_err(|e| format!("{e}"))
}

fn parse_linkage(value: &str) -> Result<LinkageMethod, String> {
    value.parse().map_err(|e| format!("{e}"))
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            csv_path: self.csv.clone(),
            linkage_method: self.default_linkage,
            log_level: self.log_level.clone(),
            json_logs: self.json_logs.then_some(true),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = LedgerlensConfig::load(args.config.as_deref(), Some(&args.overrides()))
        .context("failed to resolve configuration")?;

    if let Err(e) = ledgerlens_observability::init_tracing(&config.observability) {
        eprintln!("tracing already initialised: {e}");
    }

    let output = run(&args.command, &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(command: &Command, config: &LedgerlensConfig) -> Result<serde_json::Value> {
    let csv_path = config
        .dataset
        .csv_path
        .as_deref()
        .context("no ledger given: pass --csv or set dataset.csv_path")?;
    let mut dataset = TransactionDataset::from_csv_path(Path::new(csv_path), config)
        .with_context(|| format!("failed to load ledger {csv_path}"))?;
    tracing::debug!(source = dataset.source(), "ledger ready");

    let value = match command {
        Command::Transactions => serde_json::to_value(dataset.transactions())?,
        Command::Frequency {
            unique_key,
            per,
            distance_measure,
            linkage_method,
            number_of_cluster,
        } => {
            let request = FrequencyOptionRequest {
                unique_key: unique_key.clone(),
                per: per.clone(),
                distance_measure: distance_measure.clone(),
                linkage_method: linkage_method.clone(),
                number_of_cluster: *number_of_cluster,
            };
            let result = dataset.set_frequency_option_request(&request)?;
            serde_json::to_value(result)?
        }
        Command::Clusters {
            metric,
            linkage,
            number_of_cluster,
        } => serde_json::to_value(dataset.string_clusters(*metric, *linkage, *number_of_cluster)?)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for_sample() -> LedgerlensConfig {
        let mut config = LedgerlensConfig::default();
        config.dataset.csv_path = Some(
            test_fixtures::fixture_path(test_fixtures::SAMPLE_LEDGER)
                .display()
                .to_string(),
        );
        config
    }

    #[test]
    fn clusters_subcommand_parses_identifiers() {
        let args = Args::try_parse_from([
            "ledgerlens", "clusters", "--metric", "jaroWinklerSimilarity", "--linkage", "ward", "-k", "3",
        ])
        .unwrap();
        match args.command {
            Command::Clusters {
                metric,
                linkage,
                number_of_cluster,
            } => {
                assert_eq!(metric, DistanceMetric::JaroWinklerSimilarity);
                assert_eq!(linkage, LinkageMethod::Ward);
                assert_eq!(number_of_cluster, 3);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_metric_is_rejected_by_the_parser() {
        let err = Args::try_parse_from(["ledgerlens", "clusters", "--metric", "nonexistent", "-k", "2"]);
        assert!(err.is_err());
    }

    #[test]
    fn global_flags_become_overrides() {
        let args = Args::try_parse_from([
            "ledgerlens", "--csv", "ledger.csv", "--default-linkage", "single", "--json-logs", "transactions",
        ])
        .unwrap();
        let overrides = args.overrides();
        assert_eq!(overrides.csv_path.as_deref(), Some("ledger.csv"));
        assert_eq!(overrides.linkage_method, Some(LinkageMethod::Single));
        assert_eq!(overrides.json_logs, Some(true));
        assert_eq!(overrides.log_level, None);
    }

    #[test]
    fn frequency_command_prints_every_transaction() {
        let command = Command::Frequency {
            unique_key: "transactionDescription".into(),
            per: "day".into(),
            distance_measure: None,
            linkage_method: None,
            number_of_cluster: None,
        };
        let value = run(&command, &config_for_sample()).unwrap();
        assert_eq!(value["assignments"].as_array().map(Vec::len), Some(12));
        assert_eq!(value["per"], "day");
    }

    #[test]
    fn clusters_command_prints_aligned_lists() {
        let command = Command::Clusters {
            metric: DistanceMetric::Levenshtein,
            linkage: LinkageMethod::Average,
            number_of_cluster: 2,
        };
        let value = run(&command, &config_for_sample()).unwrap();
        assert_eq!(value["strings"].as_array().map(Vec::len), Some(7));
        assert_eq!(value["clusterIds"].as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn missing_ledger_path_is_reported() {
        let err = run(&Command::Transactions, &LedgerlensConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no ledger given"));
    }
}
