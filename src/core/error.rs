//! Error types for the application

use thiserror::Error;

/// Application-wide error type
///
/// The cost engine itself never fails; these cover loading the
/// configuration and the appliance catalog, and reading usage input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid usage entry: {0}")]
    InvalidUsage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
