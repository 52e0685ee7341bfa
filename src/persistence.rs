//! Reading and writing project documents.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;

use crate::document::Project;
use crate::error::{Result, StamplineError};

/// Extension used for project files.
pub const PROJECT_EXTENSION: &str = "osp";

/// Load a project document from disk.
///
/// The whole file must parse; nothing is returned for a partially valid
/// document.
pub fn read_project(path: &Path) -> Result<Project> {
    if !path.exists() {
        return Err(StamplineError::ProjectNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| StamplineError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| StamplineError::Decode {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Render a project as pretty-printed JSON. Non-ASCII text is kept as-is.
pub fn to_pretty_json(project: &Project) -> Result<String> {
    Ok(serde_json::to_string_pretty(project)?)
}

/// Write a project document to disk, replacing any existing file.
pub fn write_project(path: &Path, project: &Project) -> Result<()> {
    let content = to_pretty_json(project)?;

    fs::write(path, content).map_err(|e| StamplineError::FileWriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("project saved: {}", path.display());
    Ok(())
}

/// Copy an existing document to `<name>.<YYYYmmdd_HHMMSS>.bak` beside it.
///
/// Returns `None` when there is nothing at `path` to back up.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("project.{PROJECT_EXTENSION}"));
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let backup_path = path.with_file_name(format!("{file_name}.{timestamp}.bak"));

    fs::copy(path, &backup_path).map_err(|e| StamplineError::FileWriteError {
        path: backup_path.clone(),
        source: e,
    })?;

    info!("backed up {} to {}", path.display(), backup_path.display());
    Ok(Some(backup_path))
}

/// Append the project extension when `path` has none.
pub fn with_project_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(PROJECT_EXTENSION)
    }
}
