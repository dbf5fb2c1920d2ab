use serde::{Serialize, Serializer};
use thiserror::Error;

/// Failure of a transform command.
///
/// Commands hand this back to the webview, which only ever sees the display
/// string, so each variant's message is written for the user.
#[derive(Debug, Error)]
pub enum ToolboxError {
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open file: {0}")]
    Open(String),
}

impl ToolboxError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl Serialize for ToolboxError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<base64::DecodeError> for ToolboxError {
    fn from(err: base64::DecodeError) -> Self {
        ToolboxError::decode(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ToolboxError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ToolboxError::decode(format!("result is not valid UTF-8 ({})", err))
    }
}

pub type Result<T> = std::result::Result<T, ToolboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_message() {
        let err = ToolboxError::invalid_input("width must be positive");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"invalid input: width must be positive\"");
    }

    #[test]
    fn base64_errors_map_to_decode() {
        let err: ToolboxError = base64::DecodeError::InvalidLength(3).into();
        assert!(matches!(err, ToolboxError::Decode(_)));
    }

    #[test]
    fn io_errors_keep_their_message() {
        let err: ToolboxError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        assert_eq!(err.to_string(), "file error: read-only");
    }

    #[test]
    fn utf8_errors_mention_utf8() {
        let err: ToolboxError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(err.to_string().contains("UTF-8"));
    }
}
