//! Import helpers
//!
//! Turns user-supplied sources into placement inputs: timestamp lists
//! (`path,timestamp[,duration]` per line, CSV or plain text) and folders of
//! images for slideshows. Parsing problems on individual lines are collected
//! rather than aborting the import.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, StamplineError};
use crate::placement::ImageEntry;

/// Extensions picked up by [`scan_image_folder`].
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Marker for comment lines in timestamp lists.
const COMMENT_PREFIX: char = '#';

/// Entries parsed from a timestamp list, plus the lines that were skipped.
#[derive(Debug, Default)]
pub struct TimestampList {
    pub entries: Vec<ImageEntry>,
    /// One [`StamplineError::InvalidImportLine`] per rejected line.
    pub skipped: Vec<StamplineError>,
}

/// Parse a timestamp list.
///
/// Blank lines and `#` comments are ignored. A leading line whose second
/// column is not a number is treated as a header. Lines without a duration
/// use `default_duration`; columns after the third are ignored.
pub fn parse_timestamp_list(content: &str, default_duration: f64) -> TimestampList {
    let mut list = TimestampList::default();
    let mut seen_data = false;

    for (index, raw) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let is_first = !seen_data;
        seen_data = true;

        if is_first && fields.len() >= 2 && fields[1].parse::<f64>().is_err() {
            debug!("line {line_number}: treating `{line}` as a header");
            continue;
        }

        match parse_line(&fields, default_duration) {
            Ok(entry) => list.entries.push(entry),
            Err(reason) => {
                warn!("line {line_number} skipped: {reason}");
                list.skipped.push(StamplineError::InvalidImportLine {
                    line: line_number,
                    reason,
                });
            }
        }
    }

    list
}

fn parse_line(fields: &[&str], default_duration: f64) -> std::result::Result<ImageEntry, String> {
    let (path, timestamp) = match fields {
        [path, timestamp, ..] => (*path, *timestamp),
        _ => return Err("expected `path,timestamp[,duration]`".to_string()),
    };

    if path.is_empty() {
        return Err("missing image path".to_string());
    }

    let timestamp: f64 = timestamp
        .parse()
        .map_err(|_| format!("invalid timestamp `{timestamp}`"))?;

    let duration = match fields.get(2) {
        Some(value) if !value.is_empty() => value
            .parse::<f64>()
            .map_err(|_| format!("invalid duration `{value}`"))?,
        _ => default_duration,
    };

    Ok(ImageEntry::new(path, timestamp, duration))
}

/// Read and parse a timestamp list file.
pub fn read_timestamp_list(path: &Path, default_duration: f64) -> Result<TimestampList> {
    if !path.exists() {
        return Err(StamplineError::ImportFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| StamplineError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(parse_timestamp_list(&content, default_duration))
}

/// Images directly inside `dir`, sorted by file name.
pub fn scan_image_folder(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(StamplineError::ImportFileNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && has_image_extension(entry.path()) {
            images.push(entry.into_path());
        }
    }

    debug!("found {} images in {}", images.len(), dir.display());
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
