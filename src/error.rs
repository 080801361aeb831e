//! Error types for the section solver

use thiserror::Error;

/// Main error type for section analysis and design
#[derive(Error, Debug)]
pub enum SectionError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Singular system: {0}")]
    SingularSystem(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for section operations
pub type SectionResult<T> = Result<T, SectionError>;
