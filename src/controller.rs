//! What happens when a page button is pressed: validate, call the backend,
//! log the result to history.
//!
//! History is best-effort. A failed append is logged and the operation still
//! succeeds.

use thiserror::Error;

use crate::bridge::{ImageRequest, TextOp, TransformBackend};
use crate::history::HistoryStore;
use crate::json_format::{self, JsonFormatError};
use crate::state::{HistoryKind, ImageFormat, ICO_MAX_SIZE, MAX_IMAGE_SIZE};
use crate::storage::StoragePort;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Backend(String),

    #[error(transparent)]
    Json(#[from] JsonFormatError),
}

fn record<S: StoragePort>(history: &HistoryStore<S>, kind: HistoryKind, input: &str, output: &str) {
    if let Err(e) = history.append(kind, input, output) {
        log::warn!("could not save history entry: {}", e);
    }
}

pub async fn run_text_op<B, S>(backend: &B, history: &HistoryStore<S>, op: TextOp, input: &str) -> Result<String, ToolError>
where
    B: TransformBackend,
    S: StoragePort,
{
    if input.is_empty() {
        return Err(ToolError::Validation("Please enter some text first".to_string()));
    }

    let output = backend.text(op, input).await.map_err(ToolError::Backend)?;
    record(history, op.kind(), input, &output);
    Ok(output)
}

/// Base64 of a whole file. The history entry keeps the file name as input.
pub async fn encode_file<B, S>(backend: &B, history: &HistoryStore<S>, file_name: &str, data: &[u8]) -> Result<String, ToolError>
where
    B: TransformBackend,
    S: StoragePort,
{
    if file_name.is_empty() {
        return Err(ToolError::Validation("Please choose a file first".to_string()));
    }

    let output = backend.encode_file(data).await.map_err(ToolError::Backend)?;
    record(history, HistoryKind::Base64FileEncode, file_name, &output);
    Ok(output)
}

pub fn validate_image_request(request: &ImageRequest) -> Result<(), ToolError> {
    if request.data.is_empty() {
        return Err(ToolError::Validation("Please choose an image first".to_string()));
    }
    if request.width == 0 || request.height == 0 {
        return Err(ToolError::Validation("Width and height must be positive".to_string()));
    }
    if request.width > MAX_IMAGE_SIZE || request.height > MAX_IMAGE_SIZE {
        return Err(ToolError::Validation(format!(
            "Width and height are limited to {0}x{0}",
            MAX_IMAGE_SIZE
        )));
    }
    if request.format == ImageFormat::Ico && (request.width > ICO_MAX_SIZE || request.height > ICO_MAX_SIZE) {
        return Err(ToolError::Validation(format!(
            "ICO images are limited to {0}x{0}",
            ICO_MAX_SIZE
        )));
    }
    Ok(())
}

pub fn conversion_summary(request: &ImageRequest, output_len: usize) -> String {
    format!(
        "{} {}x{}, {} bytes",
        request.format.tag(),
        request.width,
        request.height,
        output_len
    )
}

pub async fn convert_image<B, S>(backend: &B, history: &HistoryStore<S>, request: &ImageRequest) -> Result<Vec<u8>, ToolError>
where
    B: TransformBackend,
    S: StoragePort,
{
    validate_image_request(request)?;

    let output = backend.convert_image(request).await.map_err(ToolError::Backend)?;
    record(
        history,
        HistoryKind::ImageConvert,
        &request.file_name,
        &conversion_summary(request, output.len()),
    );
    Ok(output)
}

/// Hands a converted image to the native save dialog. Not logged to history.
pub async fn save_image<B: TransformBackend>(backend: &B, data: &[u8], file_name: &str, format: ImageFormat) -> Result<Option<String>, ToolError> {
    if data.is_empty() {
        return Err(ToolError::Validation("Convert an image first".to_string()));
    }
    backend
        .save_image(data, file_name, format)
        .await
        .map_err(ToolError::Backend)
}

pub async fn greet<B: TransformBackend>(backend: &B, name: &str) -> Result<String, ToolError> {
    backend.greet(name).await.map_err(ToolError::Backend)
}

pub fn format_json<S: StoragePort>(history: &HistoryStore<S>, input: &str, indent: usize, sort_keys: bool) -> Result<String, ToolError> {
    if input.trim().is_empty() {
        return Err(ToolError::Validation("Please paste some JSON first".to_string()));
    }
    let output = json_format::format_json(input, indent, sort_keys)?;
    record(history, HistoryKind::JsonFormat, input, &output);
    Ok(output)
}

pub fn minify_json<S: StoragePort>(history: &HistoryStore<S>, input: &str) -> Result<String, ToolError> {
    if input.trim().is_empty() {
        return Err(ToolError::Validation("Please paste some JSON first".to_string()));
    }
    let output = json_format::minify_json(input)?;
    record(history, HistoryKind::JsonMinify, input, &output);
    Ok(output)
}
