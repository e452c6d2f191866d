/// Normalizes a string before distances are measured.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait IStringPreprocessor: Send + Sync {
    fn preprocess(&self, input: &str) -> String;

    /// Human-readable description, reported in cluster info.
    fn describe(&self) -> &str;
}

impl<F> IStringPreprocessor for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn preprocess(&self, input: &str) -> String {
        self(input)
    }

    fn describe(&self) -> &str {
        "custom preprocessor"
    }
}
