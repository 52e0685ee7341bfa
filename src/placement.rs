//! Placement Engine
//!
//! Appends image files and the clips that show them to the active project.
//! Single placements fail without touching the document; batch placements
//! skip failed entries and report them.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_json::{Map, Number};

use crate::document::{Clip, Curve, MediaFile, IMAGE_MEDIA_TYPE};
use crate::error::{Result, StamplineError};
use crate::session::ProjectSession;

/// Opacity written on every placed clip.
const FULL_OPACITY: u64 = 1;

/// `value` as a JSON number, or `InvalidPlacementValue` when it has no JSON
/// form (NaN and the infinities).
fn finite_value(field: &'static str, value: f64) -> Result<Number> {
    Number::from_f64(value).ok_or(StamplineError::InvalidPlacementValue { field, value })
}

/// Position and scale of a placed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Placement {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_scale(self, scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            ..self
        }
    }
}

/// One image to place: where it is and when it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    pub path: PathBuf,
    /// Seconds from the start of the timeline.
    pub timestamp: f64,
    /// Seconds on screen.
    pub duration: f64,
}

impl ImageEntry {
    pub fn new(path: impl Into<PathBuf>, timestamp: f64, duration: f64) -> Self {
        Self {
            path: path.into(),
            timestamp,
            duration,
        }
    }
}

/// Evenly spaced timestamps for a slideshow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalSchedule {
    pub start_time: f64,
    /// Gap between consecutive start times; may be zero or negative.
    pub interval: f64,
    pub duration: f64,
}

impl Default for IntervalSchedule {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            interval: 5.0,
            duration: 2.0,
        }
    }
}

impl IntervalSchedule {
    /// Start time of the `index`-th image.
    pub fn timestamp_at(&self, index: usize) -> f64 {
        self.start_time + index as f64 * self.interval
    }
}

/// Ids created by a successful placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub file_id: String,
    pub clip_id: String,
    /// Absolute path recorded in the file entry.
    pub path: PathBuf,
    pub timestamp: f64,
}

/// An entry a batch skipped.
#[derive(Debug)]
pub struct PlacementFailure {
    /// Position of the entry in the batch input.
    pub index: usize,
    pub path: PathBuf,
    pub error: StamplineError,
}

/// Outcome of a batch placement.
#[derive(Debug, Default)]
pub struct PlacementReport {
    pub total: usize,
    /// Successful placements in input order.
    pub placed: Vec<PlacedImage>,
    pub failures: Vec<PlacementFailure>,
}

impl PlacementReport {
    pub fn succeeded(&self) -> usize {
        self.placed.len()
    }

    /// `(succeeded, total)`
    pub fn counts(&self) -> (usize, usize) {
        (self.succeeded(), self.total)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, index: usize, path: &Path, outcome: Result<PlacedImage>) {
        self.total += 1;
        match outcome {
            Ok(placed) => self.placed.push(placed),
            Err(error) => {
                warn!("skipping {}: {}", path.display(), error);
                self.failures.push(PlacementFailure {
                    index,
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }
}

impl ProjectSession {
    /// Place one image on the timeline.
    ///
    /// Appends a file entry for the image's absolute path and a clip that
    /// starts at `timestamp`, lasts `duration` and holds `placement` for its
    /// whole length. Nothing is appended when the image is missing, the
    /// timestamp is negative or not finite, the duration or a placement
    /// value is not finite, or no project is active.
    pub fn add_image_at_timestamp(
        &mut self,
        image: impl AsRef<Path>,
        timestamp: f64,
        duration: f64,
        layer: i64,
        placement: Placement,
    ) -> Result<PlacedImage> {
        let image = image.as_ref();

        if self.project.is_none() {
            return Err(StamplineError::NoActiveProject);
        }
        if !image.exists() {
            return Err(StamplineError::ImageNotFound {
                path: image.to_path_buf(),
            });
        }
        if !timestamp.is_finite() || timestamp < 0.0 {
            return Err(StamplineError::InvalidTimestamp { value: timestamp });
        }
        if !duration.is_finite() {
            return Err(StamplineError::InvalidPlacementValue {
                field: "duration",
                value: duration,
            });
        }
        let x = finite_value("x", placement.x)?;
        let y = finite_value("y", placement.y)?;
        let scale_x = finite_value("scale_x", placement.scale_x)?;
        let scale_y = finite_value("scale_y", placement.scale_y)?;
        let absolute = std::path::absolute(image)?;
        for ids in [&self.file_ids, &self.clip_ids] {
            if !ids.has_next() {
                return Err(StamplineError::IdSpaceExhausted {
                    prefix: ids.prefix(),
                });
            }
        }

        let project = self
            .project
            .as_mut()
            .ok_or(StamplineError::NoActiveProject)?;
        let file_id = self.file_ids.allocate()?;
        let clip_id = self.clip_ids.allocate()?;

        project.files.push(MediaFile {
            id: file_id.clone(),
            path: absolute.clone(),
            media_type: IMAGE_MEDIA_TYPE.to_string(),
            unknown_fields: Map::new(),
        });
        project.clips.push(Clip {
            id: clip_id.clone(),
            file_id: file_id.clone(),
            position: timestamp,
            start: 0.0,
            end: duration,
            layer,
            alpha: Curve::constant(FULL_OPACITY),
            location_x: Curve::constant(x),
            location_y: Curve::constant(y),
            scale_x: Curve::constant(scale_x),
            scale_y: Curve::constant(scale_y),
            unknown_fields: Map::new(),
        });

        info!(
            "added image {} at {}s ({})",
            image
                .file_name()
                .unwrap_or(image.as_os_str())
                .to_string_lossy(),
            timestamp,
            clip_id
        );

        Ok(PlacedImage {
            file_id,
            clip_id,
            path: absolute,
            timestamp,
        })
    }

    /// Place each entry in order on a shared layer with the default placement.
    pub fn add_multiple_images(&mut self, entries: &[ImageEntry], layer: i64) -> PlacementReport {
        let mut report = PlacementReport::default();

        for (index, entry) in entries.iter().enumerate() {
            let outcome = self.add_image_at_timestamp(
                &entry.path,
                entry.timestamp,
                entry.duration,
                layer,
                Placement::default(),
            );
            report.record(index, &entry.path, outcome);
        }

        info!(
            "placed {}/{} images on layer {}",
            report.succeeded(),
            report.total,
            layer
        );
        report
    }

    /// Place images at `start_time + i * interval`, all with the same
    /// duration and layer.
    pub fn add_images_at_interval<P: AsRef<Path>>(
        &mut self,
        images: &[P],
        schedule: IntervalSchedule,
        layer: i64,
    ) -> PlacementReport {
        let mut report = PlacementReport::default();

        for (index, image) in images.iter().enumerate() {
            let image = image.as_ref();
            let outcome = self.add_image_at_timestamp(
                image,
                schedule.timestamp_at(index),
                schedule.duration,
                layer,
                Placement::default(),
            );
            report.record(index, image, outcome);
        }

        info!(
            "placed {}/{} images every {}s starting at {}s",
            report.succeeded(),
            report.total,
            schedule.interval,
            schedule.start_time
        );
        report
    }
}
