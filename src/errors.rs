use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("serialization error: {0}")]
    Serde(String),
    #[error("store error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(e: impl std::fmt::Display) -> Self { Self::Backend(e.to_string()) }
    pub fn serde(e: impl std::fmt::Display) -> Self { Self::Serde(e.to_string()) }
}
