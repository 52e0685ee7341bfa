//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use log::{info, warn};

use crate::cli::{Commands, ProjectArgs, ResolutionArgs};
use crate::import::{read_timestamp_list, scan_image_folder};
use crate::persistence::{backup_existing, with_project_extension};
use crate::placement::{IntervalSchedule, Placement, PlacementReport};
use crate::session::ProjectSession;

/// Dispatch a parsed command.
pub fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::New {
            project,
            resolution,
            backup,
        } => new_project(&project, &resolution, backup),
        Commands::Add {
            target,
            image,
            timestamp,
            duration,
            layer,
            x,
            y,
            scale_x,
            scale_y,
        } => {
            let placement = Placement::at(x, y).with_scale(scale_x, scale_y);
            add_image(&target, &image, timestamp, duration, layer, placement)
        }
        Commands::Import {
            target,
            list,
            layer,
            default_duration,
        } => import_list(&target, &list, layer, default_duration),
        Commands::Interval {
            target,
            images,
            folder,
            start,
            every,
            duration,
            layer,
        } => {
            let schedule = IntervalSchedule {
                start_time: start,
                interval: every,
                duration,
            };
            place_at_interval(&target, images, folder.as_deref(), schedule, layer)
        }
        Commands::Info { project } => show_info(&project),
    }
}

/// Create an empty project file.
pub fn new_project(path: &Path, resolution: &ResolutionArgs, backup: bool) -> anyhow::Result<()> {
    let path = with_project_extension(path);
    info!("Creating new project at: {}", path.display());

    let mut session = ProjectSession::new(&path);
    let project = session.create_new_project(&resolution.settings());
    println!(
        "New project: {}x{} @ {} fps ({})",
        project.width, project.height, project.fps, project.profile
    );

    save(&session, None, backup)
}

/// Place one image and save.
pub fn add_image(
    target: &ProjectArgs,
    image: &Path,
    timestamp: f64,
    duration: f64,
    layer: i64,
    placement: Placement,
) -> anyhow::Result<()> {
    let mut session = open_session(target)?;

    let placed = session
        .add_image_at_timestamp(image, timestamp, duration, layer, placement)
        .with_context(|| format!("could not place {}", image.display()))?;
    println!(
        "Added {} at {}s as {}",
        placed.path.display(),
        placed.timestamp,
        placed.clip_id
    );

    save(&session, target.output.as_deref(), target.backup)
}

/// Place every entry of a timestamp list and save.
pub fn import_list(
    target: &ProjectArgs,
    list: &Path,
    layer: i64,
    default_duration: f64,
) -> anyhow::Result<()> {
    let parsed = read_timestamp_list(list, default_duration)
        .with_context(|| format!("could not read {}", list.display()))?;
    for skipped in &parsed.skipped {
        println!("Skipped {}", skipped);
    }
    if parsed.entries.is_empty() {
        bail!("no usable entries in {}", list.display());
    }
    println!(
        "Read {} entries from {}",
        parsed.entries.len(),
        list.display()
    );

    let mut session = open_session(target)?;
    let report = session.add_multiple_images(&parsed.entries, layer);
    print_report(&report);
    ensure_placed(&report)?;

    save(&session, target.output.as_deref(), target.backup)
}

/// Place images at a fixed interval and save.
pub fn place_at_interval(
    target: &ProjectArgs,
    mut images: Vec<PathBuf>,
    folder: Option<&Path>,
    schedule: IntervalSchedule,
    layer: i64,
) -> anyhow::Result<()> {
    if let Some(folder) = folder {
        let found = scan_image_folder(folder)
            .with_context(|| format!("could not scan {}", folder.display()))?;
        info!("{} images found in {}", found.len(), folder.display());
        images.extend(found);
    }
    if images.is_empty() {
        bail!("no images given; pass image paths or --folder");
    }

    let mut session = open_session(target)?;
    let report = session.add_images_at_interval(&images, schedule, layer);
    print_report(&report);
    ensure_placed(&report)?;

    save(&session, target.output.as_deref(), target.backup)
}

/// Print counts, extents and reference problems of a project.
pub fn show_info(path: &Path) -> anyhow::Result<()> {
    let path = with_project_extension(path);
    let mut session = ProjectSession::new(&path);
    let project = session
        .load_project()
        .with_context(|| format!("could not load {}", path.display()))?;

    let summary = project.summary();
    println!("Project: {}", path.display());
    println!(
        "Resolution: {}x{} @ {} fps ({})",
        project.width, project.height, project.fps, project.profile
    );
    println!("Files: {}", summary.file_count);
    println!("Clips: {}", summary.clip_count);
    println!("Timeline end: {:.2}s", summary.timeline_end);
    if !summary.layers.is_empty() {
        let layers: Vec<String> = summary.layers.iter().map(i64::to_string).collect();
        println!("Layers: {}", layers.join(", "));
    }

    let dangling = project.dangling_references();
    if dangling.is_empty() {
        println!("References: ok");
    } else {
        println!("References: {} broken", dangling.len());
        for problem in dangling {
            println!("  {}", problem);
        }
    }

    Ok(())
}

fn open_session(target: &ProjectArgs) -> anyhow::Result<ProjectSession> {
    let path = with_project_extension(&target.project);
    let mut session = ProjectSession::new(&path);

    if target.create {
        info!("Creating new project at: {}", path.display());
        session.create_new_project(&target.resolution.settings());
    } else {
        info!("Loading project: {}", path.display());
        session.load_project().with_context(|| {
            format!(
                "could not load {} (use --create to start a new project)",
                path.display()
            )
        })?;
    }

    Ok(session)
}

fn save(session: &ProjectSession, output: Option<&Path>, backup: bool) -> anyhow::Result<()> {
    let output = output.map(with_project_extension);
    let destination = output.as_deref().unwrap_or(session.project_path());

    if backup {
        if let Some(copy) = backup_existing(destination)? {
            println!("Backup: {}", copy.display());
        }
    }

    let written = session
        .save_project(Some(destination))
        .with_context(|| format!("could not save {}", destination.display()))?;
    println!("Project saved: {}", written.display());
    Ok(())
}

fn print_report(report: &PlacementReport) {
    let (succeeded, total) = report.counts();
    println!("Placed {}/{} images", succeeded, total);
    for failure in &report.failures {
        println!(
            "  #{} {}: {}",
            failure.index + 1,
            failure.path.display(),
            failure.error
        );
    }
}

fn ensure_placed(report: &PlacementReport) -> anyhow::Result<()> {
    if report.total > 0 && report.succeeded() == 0 {
        warn!("nothing placed; leaving the project file untouched");
        bail!("none of the {} images could be placed", report.total);
    }
    Ok(())
}
