//! Project Session
//!
//! A session owns one in-memory project, the path it saves to by default,
//! and the id counters for its file and clip registries. Every operation
//! runs on `&mut self`; a session is meant for a single writer.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::ProjectSettings;
use crate::document::{IdAllocator, Project, CLIP_ID_PREFIX, FILE_ID_PREFIX};
use crate::error::{Result, StamplineError};
use crate::persistence;

/// Owner of the active project document.
#[derive(Debug)]
pub struct ProjectSession {
    /// Default load and save location.
    project_path: PathBuf,
    pub(crate) project: Option<Project>,
    pub(crate) file_ids: IdAllocator,
    pub(crate) clip_ids: IdAllocator,
}

impl ProjectSession {
    /// A session targeting `project_path` with no active project yet.
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            project: None,
            file_ids: IdAllocator::new(FILE_ID_PREFIX),
            clip_ids: IdAllocator::new(CLIP_ID_PREFIX),
        }
    }

    /// A session that starts with an existing in-memory project.
    pub fn with_project(project_path: impl Into<PathBuf>, project: Project) -> Self {
        let mut session = Self::new(project_path);
        session.install(project);
        session
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn into_project(self) -> Option<Project> {
        self.project
    }

    pub fn is_active(&self) -> bool {
        self.project.is_some()
    }

    /// Replace the active project with an empty one built from `settings`.
    pub fn create_new_project(&mut self, settings: &ProjectSettings) -> &Project {
        info!(
            "new project ({}x{} @ {} fps)",
            settings.width, settings.height, settings.fps
        );
        self.install(Project::new(settings))
    }

    /// Load the project at the session's path.
    pub fn load_project(&mut self) -> Result<&Project> {
        let path = self.project_path.clone();
        self.load_project_from(&path)
    }

    /// Load the project at `path`, replacing the active one.
    ///
    /// The active project is left as it was when loading fails. Clips that
    /// reference files missing from the document are reported as warnings.
    pub fn load_project_from(&mut self, path: &Path) -> Result<&Project> {
        let project = persistence::read_project(path)?;

        for dangling in project.dangling_references() {
            warn!("{}: {}", path.display(), dangling);
        }
        info!(
            "project loaded: {} ({} files, {} clips)",
            path.display(),
            project.files.len(),
            project.clips.len()
        );

        Ok(self.install(project))
    }

    /// Write the active project to `output`, or to the session's path.
    ///
    /// Returns the path written.
    pub fn save_project(&self, output: Option<&Path>) -> Result<PathBuf> {
        let project = self.active_project()?;
        let target = output.unwrap_or(self.project_path.as_path());
        persistence::write_project(target, project)?;
        Ok(target.to_path_buf())
    }

    pub(crate) fn active_project(&self) -> Result<&Project> {
        self.project.as_ref().ok_or(StamplineError::NoActiveProject)
    }

    fn install(&mut self, project: Project) -> &Project {
        self.file_ids = project.file_id_allocator();
        self.clip_ids = project.clip_id_allocator();
        self.project.insert(project)
    }
}
