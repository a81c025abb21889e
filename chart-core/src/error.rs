//! Error types for chart loading.

use thiserror::Error;

/// Result type alias for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;

/// Errors that can occur while reading a chart file or building its tree.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The document parsed, but its top level is not a JSON object.
    #[error("chart is not a JSON object")]
    NotAnObject,

    /// No `"root"` entry was present in the chart.
    #[error("chart has no \"root\" entry")]
    MissingRoot,

    /// An entry was present but its fields did not match the schema.
    #[error("invalid entry {id:?}: {source}")]
    InvalidEntry {
        id: String,
        source: serde_json::Error,
    },

    /// Entries that can never attach to the tree: their `parent` chain
    /// does not reach `"root"`, either because a parent id is unknown or
    /// because the chain is cyclic.
    #[error("entries unreachable from root (unknown or cyclic parent): {ids:?}")]
    Unreachable { ids: Vec<String> },

    /// The document is not valid JSON at all.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O error while reading the chart file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
