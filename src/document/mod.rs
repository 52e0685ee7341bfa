//! Project Document Schema
//!
//! Typed view of the editor's `.osp` project file. Only the fields this crate
//! reads or writes are modelled; everything else is collected into the
//! flattened `unknown_fields` maps and written back untouched.

pub mod curve;
pub mod ids;
pub mod profile;

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::config::ProjectSettings;
use crate::error::StamplineError;

pub use curve::{Coordinate, Curve, Point, HOLD_INTERPOLATION};
pub use ids::{IdAllocator, CLIP_ID_PREFIX, FILE_ID_PREFIX};
pub use profile::profile_label;

/// Editor version written into new projects.
pub const EDITOR_VERSION: &str = "3.1.1";
/// Engine library version written into new projects.
pub const ENGINE_VERSION: &str = "0.3.2";

/// Audio defaults for new projects.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_CHANNELS: u32 = 2;
pub const DEFAULT_CHANNEL_LAYOUT: u32 = 3;

/// Timeline display defaults for new projects.
pub const DEFAULT_SCALE: u64 = 15;
pub const DEFAULT_TICK_PIXELS: u64 = 100;

/// Media type recorded for still images.
pub const IMAGE_MEDIA_TYPE: &str = "image";

/// Root project document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Producing toolchain versions; never interpreted.
    #[serde(default = "default_version")]
    pub version: Map<String, Value>,

    pub width: u32,
    pub height: u32,
    pub fps: FrameRate,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_channels")]
    pub channels: u32,

    #[serde(default = "default_channel_layout")]
    pub channel_layout: u32,

    #[serde(default)]
    pub clips: Vec<Clip>,

    #[serde(default)]
    pub files: Vec<MediaFile>,

    #[serde(default)]
    pub effects: Vec<Value>,

    #[serde(default)]
    pub layers: Vec<Value>,

    /// Timeline zoom hint.
    #[serde(default = "default_scale")]
    pub scale: Number,

    #[serde(default = "default_tick_pixels")]
    pub tick_pixels: Number,

    #[serde(default = "default_playhead_position")]
    pub playhead_position: Number,

    #[serde(default)]
    pub profile: String,

    #[serde(default)]
    pub markers: Vec<Value>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub unknown_fields: Map<String, Value>,
}

fn default_version() -> Map<String, Value> {
    let mut version = Map::new();
    version.insert("openshot-qt".to_string(), Value::from(EDITOR_VERSION));
    version.insert("libopenshot".to_string(), Value::from(ENGINE_VERSION));
    version
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_channels() -> u32 {
    DEFAULT_CHANNELS
}

fn default_channel_layout() -> u32 {
    DEFAULT_CHANNEL_LAYOUT
}

fn default_scale() -> Number {
    Number::from(DEFAULT_SCALE)
}

fn default_tick_pixels() -> Number {
    Number::from(DEFAULT_TICK_PIXELS)
}

fn default_playhead_position() -> Number {
    Number::from(0u64)
}

/// Frame rate as a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    pub num: u32,
    pub den: u32,
}

impl FrameRate {
    pub fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// A whole-number rate such as 30/1.
    pub fn whole(fps: u32) -> Self {
        Self { num: fps, den: 1 }
    }

    pub fn as_f64(&self) -> f64 {
        if self.den == 0 {
            return 0.0;
        }
        f64::from(self.num) / f64::from(self.den)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// A registered media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: String,

    /// Absolute path on disk.
    pub path: PathBuf,

    pub media_type: String,

    #[serde(flatten)]
    pub unknown_fields: Map<String, Value>,
}

/// A placed instance of a file on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: String,

    /// Id of the [`MediaFile`] this clip shows.
    pub file_id: String,

    /// Timeline offset in seconds where the clip starts playing.
    pub position: f64,

    /// Seconds into the source media; always 0 for stills.
    #[serde(default)]
    pub start: f64,

    /// Clip duration in seconds. The editor format names this `end` but
    /// stills store their on-screen duration here.
    pub end: f64,

    /// Stacking order; higher layers render on top.
    pub layer: i64,

    pub alpha: Curve,
    pub location_x: Curve,
    pub location_y: Curve,
    pub scale_x: Curve,
    pub scale_y: Curve,

    #[serde(flatten)]
    pub unknown_fields: Map<String, Value>,
}

impl Clip {
    /// Timeline time at which the clip stops showing.
    pub fn timeline_end(&self) -> f64 {
        self.position + self.end
    }
}

/// Counts and extents of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub file_count: usize,
    pub clip_count: usize,
    /// Latest `position + end` over all clips, 0 for an empty timeline.
    pub timeline_end: f64,
    /// Distinct layers in use, ascending.
    pub layers: Vec<i64>,
}

impl Project {
    /// A new empty project for the given settings.
    pub fn new(settings: &ProjectSettings) -> Self {
        Self {
            version: default_version(),
            width: settings.width,
            height: settings.height,
            fps: settings.fps,
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            channel_layout: DEFAULT_CHANNEL_LAYOUT,
            clips: Vec::new(),
            files: Vec::new(),
            effects: Vec::new(),
            layers: Vec::new(),
            scale: default_scale(),
            tick_pixels: default_tick_pixels(),
            playhead_position: default_playhead_position(),
            profile: profile_label(settings.width, settings.height, settings.fps),
            markers: Vec::new(),
            unknown_fields: Map::new(),
        }
    }

    pub fn file(&self, id: &str) -> Option<&MediaFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Id counter for the file registry, positioned after existing ids.
    pub fn file_id_allocator(&self) -> IdAllocator {
        IdAllocator::seeded(FILE_ID_PREFIX, self.files.iter().map(|f| f.id.as_str()))
    }

    /// Id counter for the clip registry, positioned after existing ids.
    pub fn clip_id_allocator(&self) -> IdAllocator {
        IdAllocator::seeded(CLIP_ID_PREFIX, self.clips.iter().map(|c| c.id.as_str()))
    }

    /// Clips whose `file_id` has no matching file.
    pub fn dangling_references(&self) -> Vec<StamplineError> {
        let known: HashSet<&str> = self.files.iter().map(|f| f.id.as_str()).collect();
        self.clips
            .iter()
            .filter(|clip| !known.contains(clip.file_id.as_str()))
            .map(|clip| StamplineError::DanglingFileReference {
                clip_id: clip.id.clone(),
                file_id: clip.file_id.clone(),
            })
            .collect()
    }

    pub fn summary(&self) -> ProjectSummary {
        let timeline_end = self
            .clips
            .iter()
            .map(Clip::timeline_end)
            .fold(0.0_f64, f64::max);
        let layers: BTreeSet<i64> = self.clips.iter().map(|c| c.layer).collect();

        ProjectSummary {
            file_count: self.files.len(),
            clip_count: self.clips.len(),
            timeline_end,
            layers: layers.into_iter().collect(),
        }
    }
}
