//! Integration Tests
//!
//! End-to-end tests for building, saving and reloading project timelines.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

use stampline::import::parse_timestamp_list;
use stampline::{
    FrameRate, ImageEntry, IntervalSchedule, Placement, ProjectSession, ProjectSettings,
    StamplineError,
};

/// Helper to create placeholder image files in a scratch directory
fn create_images(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, b"placeholder").unwrap();
            path
        })
        .collect()
}

fn new_session(dir: &TempDir, settings: ProjectSettings) -> ProjectSession {
    let mut session = ProjectSession::new(dir.path().join("project.osp"));
    session.create_new_project(&settings);
    session
}

// === Round Trip Tests ===

#[test]
fn test_save_load_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let images = create_images(temp_dir.path(), &["logo.png", "slide.png"]);

    let settings = ProjectSettings::new(1920, 1080, FrameRate::whole(30));
    let mut session = new_session(&temp_dir, settings);
    session
        .add_image_at_timestamp(
            &images[0],
            0.0,
            180.0,
            5,
            Placement::at(0.88, 0.05).with_scale(0.12, 0.12),
        )
        .unwrap();
    session
        .add_image_at_timestamp(&images[1], 15.0, 12.0, 2, Placement::default())
        .unwrap();

    let path = session.save_project(None).unwrap();
    let before = session.into_project().unwrap();

    let mut reloaded = ProjectSession::new(&path);
    let after = reloaded.load_project().unwrap();

    assert_eq!(after.files, before.files);
    assert_eq!(after.clips, before.clips);
    assert_eq!(after, &before);
}

#[test]
fn test_saved_file_matches_editor_format() {
    let temp_dir = tempfile::tempdir().unwrap();
    let images = create_images(temp_dir.path(), &["imagem1.png"]);

    let mut session = new_session(&temp_dir, ProjectSettings::default());
    session
        .add_image_at_timestamp(&images[0], 5.0, 3.0, 2, Placement::default())
        .unwrap();
    let path = session.save_project(None).unwrap();

    let saved: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let absolute = std::path::absolute(&images[0]).unwrap();

    assert_eq!(saved["profile"], json!("HD 1080p 30 fps"));
    assert_eq!(saved["fps"], json!({"num": 30, "den": 1}));
    assert_eq!(
        saved["files"][0],
        json!({"id": "file_1", "path": absolute.to_str().unwrap(), "media_type": "image"})
    );

    let clip = &saved["clips"][0];
    assert_eq!(clip["id"], json!("clip_1"));
    assert_eq!(clip["file_id"], json!("file_1"));
    assert_eq!(clip["position"], json!(5.0));
    assert_eq!(clip["start"], json!(0.0));
    assert_eq!(clip["end"], json!(3.0));
    assert_eq!(clip["layer"], json!(2));
    assert_eq!(
        clip["alpha"],
        json!({"Points": [{"co": {"X": 1, "Y": 1}, "interpolation": 0}]})
    );
    assert_eq!(clip["scale_y"]["Points"][0]["co"]["Y"], json!(1.0));
}

#[test]
fn test_foreign_document_passes_through() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("foreign.osp");
    let original = json!({
        "id": "T0",
        "version": {"openshot-qt": "2.6.1", "libopenshot": "0.2.7"},
        "width": 1280,
        "height": 720,
        "fps": {"num": 30000, "den": 1001},
        "sample_rate": 48000,
        "channels": 2,
        "channel_layout": 3,
        "files": [
            {"id": "X7TQ", "path": "/media/intro.mp4", "media_type": "video", "duration": 12.0}
        ],
        "clips": [
            {
                "id": "K2LP",
                "file_id": "X7TQ",
                "position": 0.0,
                "start": 1.5,
                "end": 9.0,
                "layer": 5000000,
                "title": "intro",
                "alpha": {"Points": [
                    {"co": {"X": 1.0, "Y": 0.0}, "interpolation": 0, "handle_type": 0},
                    {"co": {"X": 30, "Y": 1}, "interpolation": 1}
                ]},
                "location_x": {"Points": [{"co": {"X": 1.0, "Y": 0.0}, "interpolation": 0}]},
                "location_y": {"Points": [{"co": {"X": 1.0, "Y": 0.0}, "interpolation": 0}]},
                "scale_x": {"Points": [{"co": {"X": 1.0, "Y": 1.0}, "interpolation": 0}]},
                "scale_y": {"Points": [{"co": {"X": 1.0, "Y": 1.0}, "interpolation": 0}]},
                "rotation": {"Points": [{"co": {"X": 1.0, "Y": 0.0}, "interpolation": 0}]}
            }
        ],
        "effects": [],
        "layers": [{"id": "L1", "number": 1000000, "y": 0, "label": "", "lock": false}],
        "markers": [{"id": "M1", "position": 4.25}],
        "scale": 16.0,
        "tick_pixels": 100,
        "playhead_position": 3.5,
        "profile": "HD 720p 29.97 fps",
        "history": {"undo": [], "redo": []}
    });
    fs::write(&path, serde_json::to_string_pretty(&original).unwrap()).unwrap();

    let mut session = ProjectSession::new(&path);
    session.load_project().unwrap();
    session.save_project(None).unwrap();

    let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, original);
}

// === Placement Tests ===

#[test]
fn test_interval_placement_end_to_end() {
    let temp_dir = tempfile::tempdir().unwrap();
    let images = create_images(temp_dir.path(), &["a.png", "b.png", "c.png"]);

    let mut session = new_session(&temp_dir, ProjectSettings::default());
    let schedule = IntervalSchedule {
        start_time: 2.0,
        interval: 5.0,
        duration: 1.0,
    };
    let report = session.add_images_at_interval(&images, schedule, 1);
    assert_eq!(report.counts(), (3, 3));

    let clips = &session.project().unwrap().clips;
    let placed: Vec<(f64, f64, i64)> = clips.iter().map(|c| (c.position, c.end, c.layer)).collect();
    assert_eq!(placed, vec![(2.0, 1.0, 1), (7.0, 1.0, 1), (12.0, 1.0, 1)]);
}

#[test]
fn test_batch_tolerates_missing_images() {
    let temp_dir = tempfile::tempdir().unwrap();
    let images = create_images(temp_dir.path(), &["first.png", "third.png"]);

    let mut session = new_session(&temp_dir, ProjectSettings::default());
    let entries = vec![
        ImageEntry::new(&images[0], 1.0, 2.0),
        ImageEntry::new(temp_dir.path().join("second.png"), 3.0, 2.0),
        ImageEntry::new(&images[1], 5.0, 2.0),
    ];
    let report = session.add_multiple_images(&entries, 4);

    assert_eq!(report.counts(), (2, 3));
    assert!(matches!(
        report.failures[0].error,
        StamplineError::ImageNotFound { .. }
    ));

    let project = session.project().unwrap();
    assert_eq!(project.files.len(), 2);
    assert_eq!(project.clips.len(), 2);
    assert_eq!(project.clips[0].position, 1.0);
    assert_eq!(project.clips[1].position, 5.0);
    assert!(project.dangling_references().is_empty());
}

#[test]
fn test_import_list_feeds_batch_placement() {
    let temp_dir = tempfile::tempdir().unwrap();
    let images = create_images(temp_dir.path(), &["verse.png", "chorus.png"]);

    let content = format!(
        "# lyrics\n{},5.5,4.0\n{},22.0\n",
        images[0].display(),
        images[1].display()
    );
    let list = parse_timestamp_list(&content, 5.0);

    let mut session = new_session(&temp_dir, ProjectSettings::default());
    let report = session.add_multiple_images(&list.entries, 3);

    assert!(report.is_complete());
    let ends: Vec<f64> = session
        .project()
        .unwrap()
        .clips
        .iter()
        .map(|c| c.end)
        .collect();
    assert_eq!(ends, vec![4.0, 5.0]);
}

#[test]
fn test_non_finite_duration_never_reaches_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let images = create_images(temp_dir.path(), &["a.png", "b.png"]);

    let mut session = new_session(&temp_dir, ProjectSettings::default());
    let err = session
        .add_image_at_timestamp(&images[0], 1.0, f64::INFINITY, 1, Placement::default())
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_PLACEMENT_VALUE");

    let entries = vec![
        ImageEntry::new(&images[0], 0.0, f64::NAN),
        ImageEntry::new(&images[1], 3.0, 2.0),
    ];
    let report = session.add_multiple_images(&entries, 1);
    assert_eq!(report.counts(), (1, 2));

    let path = session.save_project(None).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("null"));

    let mut reloaded = ProjectSession::new(&path);
    let project = reloaded.load_project().unwrap();
    assert_eq!(project.clips.len(), 1);
    assert_eq!(project.clips[0].end, 2.0);
}

// === Identifier Tests ===

#[test]
fn test_append_after_load_never_collides() {
    let temp_dir = tempfile::tempdir().unwrap();
    let images = create_images(temp_dir.path(), &["new.png"]);
    let path = temp_dir.path().join("edited.osp");

    let curve = json!({"Points": [{"co": {"X": 1, "Y": 1}, "interpolation": 0}]});
    let clip = |id: &str, file_id: &str| {
        json!({
            "id": id, "file_id": file_id, "position": 0, "start": 0, "end": 2, "layer": 1,
            "alpha": curve, "location_x": curve, "location_y": curve,
            "scale_x": curve, "scale_y": curve
        })
    };
    let document = json!({
        "width": 1920,
        "height": 1080,
        "fps": {"num": 30, "den": 1},
        "files": [
            {"id": "file_3", "path": "/x/3.png", "media_type": "image"},
            {"id": "file_5", "path": "/x/5.png", "media_type": "image"}
        ],
        "clips": [clip("clip_2", "file_3"), clip("clip_9", "file_5")]
    });
    fs::write(&path, document.to_string()).unwrap();

    let mut session = ProjectSession::new(&path);
    session.load_project().unwrap();
    let placed = session
        .add_image_at_timestamp(&images[0], 4.0, 2.0, 1, Placement::default())
        .unwrap();

    assert_eq!(placed.file_id, "file_6");
    assert_eq!(placed.clip_id, "clip_10");

    let project = session.project().unwrap();
    let mut file_ids: Vec<&str> = project.files.iter().map(|f| f.id.as_str()).collect();
    file_ids.sort_unstable();
    file_ids.dedup();
    assert_eq!(file_ids.len(), project.files.len());
}

#[test]
fn test_append_after_max_suffix_id() {
    let temp_dir = tempfile::tempdir().unwrap();
    let images = create_images(temp_dir.path(), &["existing.png"]);
    let path = temp_dir.path().join("huge_ids.osp");

    let document = json!({
        "width": 1920,
        "height": 1080,
        "fps": {"num": 30, "den": 1},
        "files": [
            {"id": "file_18446744073709551615", "path": "/x/big.png", "media_type": "image"}
        ],
        "clips": []
    });
    fs::write(&path, document.to_string()).unwrap();

    let mut session = ProjectSession::new(&path);
    session.load_project().unwrap();
    let placed = session
        .add_image_at_timestamp(&images[0], 0.0, 1.0, 1, Placement::default())
        .unwrap();

    assert_eq!(placed.file_id, "file_2");
    let project = session.project().unwrap();
    assert_eq!(project.files.len(), 2);
    assert_ne!(project.files[0].id, project.files[1].id);
}

// === Error Tests ===

#[test]
fn test_save_to_unwritable_path_returns_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let session = new_session(&temp_dir, ProjectSettings::default());

    let missing_dir = temp_dir.path().join("missing").join("project.osp");
    let err = session.save_project(Some(missing_dir.as_path())).unwrap_err();
    assert!(matches!(err, StamplineError::FileWriteError { .. }));

    let err = session.save_project(Some(temp_dir.path())).unwrap_err();
    assert_eq!(err.error_code(), "FILE_WRITE_ERROR");
}

#[test]
fn test_load_errors_are_distinguished() {
    let temp_dir = tempfile::tempdir().unwrap();
    let broken = temp_dir.path().join("broken.osp");
    fs::write(&broken, "{\"width\": \"wide\"}").unwrap();

    let mut session = ProjectSession::new(temp_dir.path().join("absent.osp"));
    assert!(matches!(
        session.load_project().unwrap_err(),
        StamplineError::ProjectNotFound { .. }
    ));
    assert!(matches!(
        session.load_project_from(&broken).unwrap_err(),
        StamplineError::Decode { .. }
    ));
    assert!(!session.is_active());
}
