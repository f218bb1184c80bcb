use thiserror::Error;

/// Pipeline-wide error types for Horizon.
#[derive(Debug, Error)]
pub enum HorizonError {
    /// Dissimilarity matrix violates its contract (shape, symmetry, diagonal, sign).
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    /// Symmetric eigendecomposition failed (e.g. no convergence).
    #[error("Eigendecomposition error: {0}")]
    Eigen(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// External pair metric failed or returned garbage.
    #[error("Metric error: {0}")]
    Metric(String),

    /// Malformed CSV artefact.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Timeline index or snapshot failed validation.
    #[error("Timeline error: {0}")]
    Timeline(String),

    /// Required resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for HorizonError {
    fn from(e: serde_json::Error) -> Self {
        HorizonError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for HorizonError {
    fn from(e: std::io::Error) -> Self {
        HorizonError::Io(e.to_string())
    }
}
