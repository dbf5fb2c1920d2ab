pub mod codec;
pub mod error;
pub mod image_convert;
mod logging;
pub mod save;

use error::{Result, ToolboxError};
use image_convert::TargetFormat;

#[tauri::command]
fn greet(name: &str) -> String {
    format!("Hello, {}! You've been greeted from Rust!", name)
}

#[tauri::command]
fn encode_url(text: &str) -> Result<String> {
    log::debug!("encode_url: {} bytes", text.len());
    Ok(codec::encode_url(text))
}

#[tauri::command]
fn decode_url(text: &str) -> Result<String> {
    log::debug!("decode_url: {} bytes", text.len());
    codec::decode_url(text).inspect_err(|e| log::warn!("decode_url failed: {}", e))
}

#[tauri::command]
fn encode_unicode(text: &str) -> Result<String> {
    log::debug!("encode_unicode: {} bytes", text.len());
    Ok(codec::encode_unicode(text))
}

#[tauri::command]
fn decode_unicode(text: &str) -> Result<String> {
    log::debug!("decode_unicode: {} bytes", text.len());
    codec::decode_unicode(text).inspect_err(|e| log::warn!("decode_unicode failed: {}", e))
}

#[tauri::command]
fn encode_base64(text: &str) -> Result<String> {
    log::debug!("encode_base64: {} bytes", text.len());
    Ok(codec::encode_base64(text))
}

#[tauri::command]
fn decode_base64(text: &str) -> Result<String> {
    log::debug!("decode_base64: {} bytes", text.len());
    codec::decode_base64(text).inspect_err(|e| log::warn!("decode_base64 failed: {}", e))
}

#[tauri::command]
async fn encode_base64_file(data: Vec<u8>) -> Result<String> {
    log::debug!("encode_base64_file: {} bytes", data.len());
    Ok(codec::encode_base64_bytes(&data))
}

#[tauri::command]
fn encode_html(text: &str) -> Result<String> {
    log::debug!("encode_html: {} bytes", text.len());
    Ok(codec::encode_html(text))
}

#[tauri::command]
fn decode_html(text: &str) -> Result<String> {
    log::debug!("decode_html: {} bytes", text.len());
    Ok(codec::decode_html(text))
}

// Async so the resize runs off the main thread.
#[tauri::command]
async fn convert_image(image_data: Vec<u8>, format: String, width: u32, height: u32) -> Result<Vec<u8>> {
    log::debug!(
        "convert_image: {} bytes -> {} {}x{}",
        image_data.len(),
        format,
        width,
        height
    );
    let target: TargetFormat = format.parse()?;
    image_convert::convert_image(&image_data, target, width, height)
        .inspect(|out| log::debug!("convert_image: produced {} bytes", out.len()))
        .inspect_err(|e: &ToolboxError| log::warn!("convert_image failed: {}", e))
}

// Async so the blocking dialogs stay off the main thread.
#[tauri::command]
async fn save_image(app: tauri::AppHandle, data: Vec<u8>, file_name: String, format: String) -> Result<Option<String>> {
    log::debug!("save_image: {} ({} bytes)", file_name, data.len());
    let target: TargetFormat = format.parse()?;
    save::save_with_dialog(&app, &data, &file_name, target)
        .map(|path| path.map(|p| p.to_string_lossy().into_owned()))
        .inspect_err(|e| log::warn!("save_image failed: {}", e))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(logging::get_builder().build())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|_app| {
            log::info!("Summer Toolbox v{} starting", env!("CARGO_PKG_VERSION"));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            greet,
            encode_url,
            decode_url,
            encode_unicode,
            decode_unicode,
            encode_base64,
            decode_base64,
            encode_base64_file,
            encode_html,
            decode_html,
            convert_image,
            save_image
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
