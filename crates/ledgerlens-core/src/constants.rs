/// Number of bisection steps the threshold search performs before giving up.
pub const THRESHOLD_SEARCH_ITERATIONS: usize = 100;

/// Pseudo-distance emitted by the match-rating metric when the comparator matches.
pub const MATCH_RATING_MATCH_DISTANCE: f64 = 0.9;

/// Pseudo-distance emitted by the match-rating metric otherwise.
pub const MATCH_RATING_NON_MATCH_DISTANCE: f64 = 0.1;

/// Probe string fed to a preprocessor when validating its contract.
pub const PREPROCESSOR_PROBE: &str = "some string";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "LEDGERLENS_";

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "LEDGERLENS_LOG";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
