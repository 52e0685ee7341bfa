//! Error types for stampline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for stampline operations.
pub type Result<T> = std::result::Result<T, StamplineError>;

/// Errors that can occur while building or persisting a project.
#[derive(Error, Debug)]
pub enum StamplineError {
    // Project Errors
    #[error("Project not found: {path}")]
    ProjectNotFound { path: PathBuf },

    #[error("No project is active; create or load one first")]
    NoActiveProject,

    #[error("Clip {clip_id} references missing file {file_id}")]
    DanglingFileReference { clip_id: String, file_id: String },

    #[error("No {prefix} ids left to allocate")]
    IdSpaceExhausted { prefix: &'static str },

    // File Errors
    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization Errors
    #[error("Malformed project document: {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Encode(#[from] serde_json::Error),

    // Placement Errors
    #[error("Image not found: {path}")]
    ImageNotFound { path: PathBuf },

    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp { value: f64 },

    #[error("Invalid {field}: {value} (must be a finite number)")]
    InvalidPlacementValue { field: &'static str, value: f64 },

    // Import Errors
    #[error("Timestamp list not found: {path}")]
    ImportFileNotFound { path: PathBuf },

    #[error("Line {line}: {reason}")]
    InvalidImportLine { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StamplineError {
    /// Get the error code for this error type.
    pub fn error_code(&self) -> &'static str {
        match self {
            StamplineError::ProjectNotFound { .. } => "PROJECT_NOT_FOUND",
            StamplineError::NoActiveProject => "NO_ACTIVE_PROJECT",
            StamplineError::DanglingFileReference { .. } => "DANGLING_FILE_REFERENCE",
            StamplineError::IdSpaceExhausted { .. } => "ID_SPACE_EXHAUSTED",
            StamplineError::FileReadError { .. } => "FILE_READ_ERROR",
            StamplineError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            StamplineError::Decode { .. } => "DECODE_ERROR",
            StamplineError::Encode(_) => "ENCODE_ERROR",
            StamplineError::ImageNotFound { .. } => "IMAGE_NOT_FOUND",
            StamplineError::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            StamplineError::InvalidPlacementValue { .. } => "INVALID_PLACEMENT_VALUE",
            StamplineError::ImportFileNotFound { .. } => "IMPORT_FILE_NOT_FOUND",
            StamplineError::InvalidImportLine { .. } => "INVALID_IMPORT_LINE",
            StamplineError::Io(_) => "IO_ERROR",
        }
    }

    /// Returns true for per-item failures that a batch skips and moves past.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StamplineError::ImageNotFound { .. }
                | StamplineError::InvalidTimestamp { .. }
                | StamplineError::InvalidPlacementValue { .. }
                | StamplineError::InvalidImportLine { .. }
        )
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StamplineError::ProjectNotFound { .. } => {
                Some("Check the project path, or pass --create to start a new project.")
            }
            StamplineError::NoActiveProject => {
                Some("Call create_new_project or load_project before placing images.")
            }
            StamplineError::ImageNotFound { .. } => Some("Check the image path and try again."),
            StamplineError::IdSpaceExhausted { .. } => {
                Some("Renumber the project's ids in the editor before adding more images.")
            }
            StamplineError::Decode { .. } => {
                Some("The file is not a valid project; open and re-save it in the editor.")
            }
            StamplineError::FileWriteError { .. } => {
                Some("Check that the output directory exists and is writable.")
            }
            _ => None,
        }
    }
}
