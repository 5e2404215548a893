//! Search failures.
//!
//! An unreachable target is not an error, it's an exhausted
//! [`SearchResult`](crate::result::SearchResult).
use thiserror::Error;

use crate::strategy::Strategy;

/// The inputs can't be searched with the requested strategy.
///
/// These are found before expanding any state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{strategy} needs a heuristic table")]
    MissingHeuristicTable { strategy: Strategy },
    #[error("No heuristic value for state '{state}'")]
    MissingHeuristic { state: String },
    #[error("Negative heuristic value {value} for state '{state}'")]
    NegativeHeuristic { state: String, value: String },
    #[error("Invalid heuristic value {value} for state '{state}'")]
    InvalidHeuristic { state: String, value: String },
    #[error("Invalid cost {cost} on edge '{from}' -> '{to}'")]
    InvalidEdgeCost {
        from: String,
        to: String,
        cost: String,
    },
    #[error("Negative cost {cost} on edge '{from}' -> '{to}'")]
    NegativeEdgeCost {
        from: String,
        to: String,
        cost: String,
    },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// Safety valve for huge inputs.
    #[error("Gave up after expanding {limit} states")]
    ExpansionLimitReached { limit: usize },
}
