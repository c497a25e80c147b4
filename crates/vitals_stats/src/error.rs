//! Error types for the stats layer.

use thiserror::Error;

/// Errors surfaced by refresh orchestration. The aggregation functions
/// themselves never fail; empty input and bad timestamps are encoded in
/// their return shapes.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("data source error: {0}")]
    Source(#[from] vitals_client::VitalsError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for stats operations.
pub type StatsResult<T> = Result<T, StatsError>;
