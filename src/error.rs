//! Error types for the clustering engine

use thiserror::Error;

/// Result type alias for clustering operations
pub type Result<T> = std::result::Result<T, ClusteringError>;

/// Failures raised while seeding, stepping or validating a k-means run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusteringError {
    /// Two vectors of different length were compared or aggregated
    #[error("Dimension mismatch: expected vectors of length {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The requested number of clusters is outside `[1, n]`
    #[error("Invalid number of clusters: k = {k} for {n} observations (expected 1 <= k <= n)")]
    InvalidK { k: usize, n: usize },

    /// A cluster ended a step with no observations assigned to it
    #[error("Cluster {cluster} received no observations")]
    EmptyCluster { cluster: usize },

    /// Weighted sampling could not produce an index
    #[error("Algorithmic failure: {reason}")]
    AlgorithmicFailure { reason: String },

    /// A configuration value was rejected
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl ClusteringError {
    pub fn algorithmic(reason: impl Into<String>) -> Self {
        Self::AlgorithmicFailure {
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Whether rerunning with a different random seed could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClusteringError::EmptyCluster { .. } | ClusteringError::AlgorithmicFailure { .. }
        )
    }
}
