use celseq_core::errors::AnnotationError;
use thiserror::Error;

/// Errors from saving, loading or configuring annotation models.
#[derive(Error, Debug)]
pub enum ModelIoError {
    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    #[error("Failed to (de)serialize annotation model: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Invalid annotation model file: {0}")]
    InvalidModelFile(String),

    #[error("Unsupported annotation model format version {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid model options: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
