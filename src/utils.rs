// ABOUTME: Utility functions for the quickslides engine
// ABOUTME: Path validation plus plain text import and export of the document

use crate::errors::{Result, SlideError};
use chrono::{DateTime, TimeZone};
use log::info;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SlideError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SlideError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(SlideError::FileError)?;
    } else if !path.is_dir() {
        return Err(SlideError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }
    Ok(())
}

/// Get the absolute path
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|e| {
        SlideError::ValidationError(format!("Failed to get absolute path for {:?}: {}", path, e))
    })
}

/// Read a document from a plain text file.
pub fn import_document(path: &Path) -> Result<String> {
    validate_file_exists(path)?;
    info!("Importing document from {:?}", path);
    let text = std::fs::read_to_string(path).map_err(SlideError::FileError)?;
    // Editors on Windows save CRLF; the separator is matched on LF.
    Ok(text.replace("\r\n", "\n"))
}

/// Write a document to a plain text file.
pub fn export_document(text: &str, path: &Path) -> Result<()> {
    ensure_parent_directory_exists(path)?;
    info!("Exporting document to {:?}", path);
    std::fs::write(path, text).map_err(SlideError::FileError)
}

/// Default file name for an export made at `now`.
pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("slides-{}.md", now.format("%Y%m%d-%H%M%S"))
}
