//! FILENAME: core/chart-engine/src/error.rs

use thiserror::Error;

/// Problems with a widget or dashboard definition.
///
/// Only configuration can fail. Aggregation itself degrades to empty output.
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Invalid definition JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Query has no {0} column")]
    MissingColumn(&'static str),

    #[error("Duplicate filter id: {0}")]
    DuplicateFilterId(String),

    #[error("Duplicate widget id: {0}")]
    DuplicateWidgetId(String),

    #[error("Top-N limit must be at least 1 (widget {0})")]
    ZeroLimit(String),
}
