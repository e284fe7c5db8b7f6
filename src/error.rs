//! Error types for the simulation engine.
//!
//! - [`EngineError`] — every way a `run()` call can fail
//! - [`Result`] — alias for `Result<T, EngineError>`

use thiserror::Error;

use crate::economics::ModelError;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failure of a simulation run.
///
/// A run either produces a complete report or fails with exactly one of
/// these; partial reports are never returned.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The scenario tag is not one of the supported disruption types.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// The parameter record does not match the scenario's schema.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// A named city, supplier, or product category does not exist.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Entity kind, e.g. `"city"` or `"supplier"`.
        kind: &'static str,
        /// The name or id that was looked up.
        name: String,
    },

    /// A formula received degenerate input.
    #[error("computation error: {0}")]
    Computation(#[from] ModelError),

    /// A data collaborator (routes, inventory, suppliers) failed.
    #[error("upstream unavailable: {0}")]
    Upstream(String),

    /// The run log sink rejected the record.
    #[error("run log error: {0}")]
    RunLog(String),

    /// JSON encoding or decoding failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure in a file-backed sink.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates an entity-not-found error.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Creates an upstream-unavailable error.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Creates a run-log error.
    pub fn run_log(msg: impl Into<String>) -> Self {
        Self::RunLog(msg.into())
    }

    /// Returns `true` if the caller supplied bad input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidScenario(_) | Self::InvalidParams(_) | Self::NotFound { .. }
        )
    }
}
