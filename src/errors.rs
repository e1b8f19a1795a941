// ABOUTME: Error types for the quickslides engine
// ABOUTME: Provides structured error handling for the collaborators around the slide engine

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideError {
    #[error("Failed to read or write file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Document store error: {0}")]
    StoreError(String),

    #[error("Failed to decode shared document: {0}")]
    ShareDecodeError(String),

    #[error("Invalid share URL: {0}")]
    ShareUrlError(#[from] url::ParseError),

    #[error("Markdown rendering error: {0}")]
    RenderError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

// Implement conversion from anyhow::Error to our SlideError
impl From<anyhow::Error> for SlideError {
    fn from(err: anyhow::Error) -> Self {
        SlideError::UnknownError(err.to_string())
    }
}

impl From<base64::DecodeError> for SlideError {
    fn from(err: base64::DecodeError) -> Self {
        SlideError::ShareDecodeError(format!("invalid token encoding: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SlideError>;
