//! Human-readable profile labels such as `HD 1080p 30 fps`.

use super::FrameRate;

/// Build the profile label for a resolution and frame rate.
pub fn profile_label(width: u32, height: u32, fps: FrameRate) -> String {
    format!("{} {} fps", resolution_name(width, height), fps_label(fps))
}

fn resolution_name(width: u32, height: u32) -> String {
    match (width, height) {
        (3840, 2160) => "UHD 2160p".to_string(),
        (2560, 1440) => "QHD 1440p".to_string(),
        (1920, 1080) => "HD 1080p".to_string(),
        (1280, 720) => "HD 720p".to_string(),
        (854, 480) | (720, 480) | (640, 480) => "SD 480p".to_string(),
        _ => format!("{width}x{height}"),
    }
}

fn fps_label(fps: FrameRate) -> String {
    if fps.den <= 1 {
        return fps.num.to_string();
    }
    let rounded = format!("{:.2}", fps.as_f64());
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
