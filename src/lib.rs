//! stampline - place still images on a video editor timeline
//!
//! Builds and edits OpenShot project files (`.osp`) so that images show up
//! at chosen timestamps without editing the save format by hand.
//!
//! # Architecture
//!
//! - [`document`]: typed project schema with passthrough of unknown fields
//! - [`session`]: owner of one in-memory project and its id counters
//! - [`placement`]: single, batch and interval image placement
//! - [`persistence`]: JSON load/save and backups
//! - [`import`]: timestamp lists and image folders as placement input
//!
//! ```no_run
//! use stampline::{ImageEntry, ProjectSession, ProjectSettings};
//!
//! let mut session = ProjectSession::new("tutorial.osp");
//! session.create_new_project(&ProjectSettings::default());
//! let report = session.add_multiple_images(
//!     &[
//!         ImageEntry::new("intro.png", 0.0, 5.0),
//!         ImageEntry::new("step1.png", 10.0, 8.0),
//!     ],
//!     2,
//! );
//! println!("placed {}/{}", report.succeeded(), report.total);
//! session.save_project(None)?;
//! # Ok::<(), stampline::StamplineError>(())
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod import;
pub mod persistence;
pub mod placement;
pub mod session;

pub use config::{ProjectSettings, ResolutionPreset};
pub use document::{Clip, Curve, FrameRate, MediaFile, Project, ProjectSummary};
pub use error::{Result, StamplineError};
pub use placement::{ImageEntry, IntervalSchedule, Placement, PlacedImage, PlacementReport};
pub use session::ProjectSession;
