//! Saving a converted image to disk and offering to open it.

use std::fs;
use std::path::{Path, PathBuf};

use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_opener::OpenerExt;

use crate::error::{Result, ToolboxError};
use crate::image_convert::TargetFormat;

/// Save dialog filter for `format`: a display name and its extensions.
pub fn filter_for(format: TargetFormat) -> (&'static str, &'static [&'static str]) {
    match format {
        TargetFormat::Png => ("PNG image", &["png"]),
        TargetFormat::Jpeg => ("JPEG image", &["jpg", "jpeg"]),
        TargetFormat::Ico => ("Icon", &["ico"]),
        TargetFormat::Svg => ("SVG image", &["svg"]),
    }
}

pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(ToolboxError::invalid_input("nothing to save"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;
    Ok(())
}

/// Asks where to save `data`, writes it, then asks whether to open it.
/// Returns the saved path, or `None` when the user cancelled.
pub fn save_with_dialog(app: &AppHandle, data: &[u8], file_name: &str, format: TargetFormat) -> Result<Option<PathBuf>> {
    let (filter_name, extensions) = filter_for(format);
    let picked = app
        .dialog()
        .file()
        .set_title("Save converted image")
        .set_file_name(file_name)
        .add_filter(filter_name, extensions)
        .blocking_save_file();

    let Some(picked) = picked else {
        log::debug!("save_image: cancelled");
        return Ok(None);
    };
    let path = picked
        .as_path()
        .map(Path::to_path_buf)
        .ok_or_else(|| ToolboxError::invalid_input(format!("not a local path: {}", picked)))?;

    write_file(&path, data)?;
    log::info!("saved {} bytes to {}", data.len(), path.display());

    let open_now = app
        .dialog()
        .message("The file has been saved. Open it now?")
        .title("Summer Toolbox")
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::OkCancelCustom("Open".to_string(), "Later".to_string()))
        .blocking_show();

    if open_now {
        app.opener()
            .open_path(path.to_string_lossy(), None::<&str>)
            .map_err(|e| ToolboxError::Open(e.to_string()))?;
    }
    Ok(Some(path))
}
