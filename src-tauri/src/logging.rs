use log::LevelFilter;
use tauri_plugin_log::{Target, TargetKind};

pub const LOG_FILE_NAME: &str = "summer-toolbox";

pub fn default_level(is_dev: bool) -> LevelFilter {
    if is_dev {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Log plugin builder: stdout plus the webview console while developing,
/// stdout plus a log file in the platform log dir for release builds.
pub fn get_builder() -> tauri_plugin_log::Builder {
    let is_dev = cfg!(debug_assertions);

    let builder = tauri_plugin_log::Builder::new()
        .clear_targets()
        .level(default_level(is_dev))
        .target(Target::new(TargetKind::Stdout));

    if is_dev {
        builder.target(Target::new(TargetKind::Webview))
    } else {
        builder.target(Target::new(TargetKind::LogDir {
            file_name: Some(LOG_FILE_NAME.to_string()),
        }))
    }
}
