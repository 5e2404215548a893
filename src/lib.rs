use shadow_rs::shadow;

shadow!(build);

// Costs and search spaces
// -----------------------
pub mod cost;
pub mod float_cost;
pub mod heuristic;
pub mod space;

// Search machinery
// ----------------
pub mod engine;
pub mod frontier;
pub mod search;
pub mod strategy;

// Outcomes
// --------
pub mod error;
pub mod report;
pub mod result;

// Problems
// --------
pub mod problem;

pub use engine::SearchEngine;
pub use engine::run;
pub use error::ConfigurationError;
pub use error::SearchError;
pub use heuristic::HeuristicTable;
pub use result::SearchResult;
pub use space::Path;
pub use space::StateGraph;
pub use strategy::DuplicatePolicy;
pub use strategy::Strategy;
