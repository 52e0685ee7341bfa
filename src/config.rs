//! Project configuration.
//!
//! Resolution and frame-rate settings used when starting a new project,
//! plus the named resolution presets the CLI offers.

use serde::{Deserialize, Serialize};

use crate::document::FrameRate;

/// Default project width in pixels.
pub const DEFAULT_WIDTH: u32 = 1920;
/// Default project height in pixels.
pub const DEFAULT_HEIGHT: u32 = 1080;
/// Default frames per second.
pub const DEFAULT_FPS: u32 = 30;

/// Settings for a freshly created project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Horizontal resolution in pixels.
    pub width: u32,
    /// Vertical resolution in pixels.
    pub height: u32,
    /// Timeline frame rate.
    pub fps: FrameRate,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: FrameRate::whole(DEFAULT_FPS),
        }
    }
}

impl ProjectSettings {
    pub fn new(width: u32, height: u32, fps: FrameRate) -> Self {
        Self { width, height, fps }
    }

    /// Settings for a named preset at the given frame rate.
    pub fn from_preset(preset: ResolutionPreset, fps: FrameRate) -> Self {
        let (width, height) = preset.dimensions();
        Self { width, height, fps }
    }
}

/// Common output resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResolutionPreset {
    /// 1920x1080
    #[default]
    FullHd,
    /// 1280x720
    Hd,
    /// 3840x2160
    Uhd,
}

impl ResolutionPreset {
    /// Width and height in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ResolutionPreset::FullHd => (1920, 1080),
            ResolutionPreset::Hd => (1280, 720),
            ResolutionPreset::Uhd => (3840, 2160),
        }
    }
}
