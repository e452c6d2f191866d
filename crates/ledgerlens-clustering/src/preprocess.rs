//! Default description normalisation.

use ledgerlens_core::traits::IStringPreprocessor;

/// Trims surrounding whitespace, lower-cases, and keeps only alphanumeric
/// and whitespace characters. Inner whitespace is preserved as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPreprocessor;

impl IStringPreprocessor for DefaultPreprocessor {
    fn preprocess(&self, input: &str) -> String {
        input
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect()
    }

    fn describe(&self) -> &str {
        "trim, lowercase, keep alphanumeric and whitespace characters"
    }
}
