//! Test fixture loader for LedgerLens sample ledgers and expected results.
//!
//! Fixture paths are relative to the `test-fixtures` directory at the
//! workspace root, found from any crate's `CARGO_MANIFEST_DIR`.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Sample bank export with raw (space separated, title-case) headers.
pub const SAMPLE_LEDGER: &str = "ledgers/sample_ledger.csv";

/// Expected derived values for [`SAMPLE_LEDGER`].
pub const SAMPLE_LEDGER_EXPECTED: &str = "ledgers/sample_ledger_expected.json";

/// Same rows as [`SAMPLE_LEDGER`] with one transaction number repeated.
pub const DUPLICATE_LEDGER: &str = "ledgers/duplicate_transaction_number.csv";

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // Inside a member crate: walk up to the workspace root.
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = load_fixture_text(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {relative_path}: {e}"))
}

/// Load a fixture file as text.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixtures_root().join(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}
