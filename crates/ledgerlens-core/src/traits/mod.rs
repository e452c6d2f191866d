pub mod cluster_assignments;
pub mod preprocessor;

pub use cluster_assignments::IClusterAssignments;
pub use preprocessor::IStringPreprocessor;
