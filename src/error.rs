// Typed errors with thiserror. Surface meaningful messages to JS.
// See DESIGN.md: Error handling

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown carousel row: {0}")]
    UnknownRow(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

/// Failures of a single catalog fetch.
///
/// All variants are displayed the same way by the view layer: the row's
/// query is marked failed and keeps the message.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog service could not be reached.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body did not parse into a list result.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("Catalog request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid request URL: {0}")]
    Url(String),
}
