use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Invalid feature dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Feature extraction failed for record {id}: {reason}")]
    FeatureExtraction { id: String, reason: String },

    #[error("Scaling error: {0}")]
    Scaling(String),
}
