//! CLI Module
//!
//! Command-line interface for placing images on a project timeline.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ProjectSettings, ResolutionPreset, DEFAULT_FPS};
use crate::document::FrameRate;

/// Place still images at timestamps on an OpenShot project timeline
#[derive(Parser, Debug)]
#[command(name = "stampline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty project file
    #[command(name = "new")]
    New {
        /// Path for the new project (.osp is added when missing)
        project: PathBuf,

        #[command(flatten)]
        resolution: ResolutionArgs,

        /// Copy an existing file at the path before overwriting it
        #[arg(long)]
        backup: bool,
    },

    /// Place a single image
    #[command(name = "add")]
    Add {
        #[command(flatten)]
        target: ProjectArgs,

        /// Image to place
        image: PathBuf,

        /// Timeline position in seconds
        #[arg(long = "at")]
        timestamp: f64,

        /// Seconds on screen
        #[arg(short, long, default_value_t = 2.0)]
        duration: f64,

        /// Layer (higher renders on top)
        #[arg(short, long, default_value_t = 1)]
        layer: i64,

        /// Horizontal position
        #[arg(long, default_value_t = 0.0)]
        x: f64,

        /// Vertical position
        #[arg(long, default_value_t = 0.0)]
        y: f64,

        /// Horizontal scale
        #[arg(long, default_value_t = 1.0)]
        scale_x: f64,

        /// Vertical scale
        #[arg(long, default_value_t = 1.0)]
        scale_y: f64,
    },

    /// Place images listed in a CSV or text file (path,timestamp[,duration])
    #[command(name = "import")]
    Import {
        #[command(flatten)]
        target: ProjectArgs,

        /// Timestamp list
        list: PathBuf,

        /// Layer for every image
        #[arg(short, long, default_value_t = 1)]
        layer: i64,

        /// Duration for lines that do not give one
        #[arg(long, default_value_t = 3.0)]
        default_duration: f64,
    },

    /// Place images at a fixed interval
    #[command(name = "interval")]
    Interval {
        #[command(flatten)]
        target: ProjectArgs,

        /// Images in display order
        images: Vec<PathBuf>,

        /// Also place every image found in this folder, sorted by name
        #[arg(long)]
        folder: Option<PathBuf>,

        /// Time of the first image in seconds
        #[arg(long, default_value_t = 0.0)]
        start: f64,

        /// Seconds between consecutive images
        #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
        every: f64,

        /// Seconds each image stays on screen
        #[arg(short, long, default_value_t = 2.0)]
        duration: f64,

        /// Layer for every image
        #[arg(short, long, default_value_t = 1)]
        layer: i64,
    },

    /// Print a summary of a project
    #[command(name = "info")]
    Info {
        /// Path to the project
        project: PathBuf,
    },
}

/// Project selection shared by the placement commands.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Path to the project (.osp is added when missing)
    pub project: PathBuf,

    /// Start a new project instead of loading the existing one
    #[arg(long)]
    pub create: bool,

    #[command(flatten)]
    pub resolution: ResolutionArgs,

    /// Write the result here instead of back to the project path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Copy the existing output file before overwriting it
    #[arg(long)]
    pub backup: bool,
}

/// Resolution and frame rate for new projects.
#[derive(Args, Debug, Clone)]
pub struct ResolutionArgs {
    /// Named resolution
    #[arg(long, value_enum, default_value_t = ResolutionPreset::FullHd)]
    pub resolution: ResolutionPreset,

    /// Custom width in pixels (overrides --resolution)
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Custom height in pixels (overrides --resolution)
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,
}

impl ResolutionArgs {
    pub fn settings(&self) -> ProjectSettings {
        let fps = FrameRate::whole(self.fps);
        match (self.width, self.height) {
            (Some(width), Some(height)) => ProjectSettings::new(width, height, fps),
            _ => ProjectSettings::from_preset(self.resolution, fps),
        }
    }
}
