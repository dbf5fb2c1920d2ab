use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_SIZE: u32 = 128;
pub const ICO_MAX_SIZE: u32 = 256;
pub const MAX_IMAGE_SIZE: u32 = 8192;

/// Operation tag stored with every history entry.
///
/// Serialized as its kebab-case tag. Legacy underscore tags (`url_encode`)
/// are accepted on read and unknown tags survive as `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HistoryKind {
    UrlEncode,
    UrlDecode,
    Base64Encode,
    Base64Decode,
    Base64FileEncode,
    UnicodeEncode,
    UnicodeDecode,
    HtmlEncode,
    HtmlDecode,
    JsonFormat,
    JsonMinify,
    ImageConvert,
    Other(String),
}

impl HistoryKind {
    pub fn tag(&self) -> &str {
        match self {
            HistoryKind::UrlEncode => "url-encode",
            HistoryKind::UrlDecode => "url-decode",
            HistoryKind::Base64Encode => "base64-encode",
            HistoryKind::Base64Decode => "base64-decode",
            HistoryKind::Base64FileEncode => "base64-file-encode",
            HistoryKind::UnicodeEncode => "unicode-encode",
            HistoryKind::UnicodeDecode => "unicode-decode",
            HistoryKind::HtmlEncode => "html-encode",
            HistoryKind::HtmlDecode => "html-decode",
            HistoryKind::JsonFormat => "json-format",
            HistoryKind::JsonMinify => "json-minify",
            HistoryKind::ImageConvert => "image-convert",
            HistoryKind::Other(tag) => tag.as_str(),
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag.replace('_', "-").as_str() {
            "url-encode" => HistoryKind::UrlEncode,
            "url-decode" => HistoryKind::UrlDecode,
            "base64-encode" => HistoryKind::Base64Encode,
            "base64-decode" => HistoryKind::Base64Decode,
            "base64-file-encode" => HistoryKind::Base64FileEncode,
            "unicode-encode" => HistoryKind::UnicodeEncode,
            "unicode-decode" => HistoryKind::UnicodeDecode,
            "html-encode" => HistoryKind::HtmlEncode,
            "html-decode" => HistoryKind::HtmlDecode,
            "json-format" => HistoryKind::JsonFormat,
            "json-minify" => HistoryKind::JsonMinify,
            "image-convert" => HistoryKind::ImageConvert,
            _ => HistoryKind::Other(tag.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            HistoryKind::UrlEncode => "URL encode",
            HistoryKind::UrlDecode => "URL decode",
            HistoryKind::Base64Encode => "Base64 encode",
            HistoryKind::Base64Decode => "Base64 decode",
            HistoryKind::Base64FileEncode => "Base64 file",
            HistoryKind::UnicodeEncode => "Unicode encode",
            HistoryKind::UnicodeDecode => "Unicode decode",
            HistoryKind::HtmlEncode => "HTML encode",
            HistoryKind::HtmlDecode => "HTML decode",
            HistoryKind::JsonFormat => "JSON format",
            HistoryKind::JsonMinify => "JSON minify",
            HistoryKind::ImageConvert => "Image convert",
            HistoryKind::Other(tag) => tag.as_str(),
        }
    }

    /// Badge color for the history table.
    pub fn color(&self) -> &'static str {
        match self {
            HistoryKind::UrlEncode | HistoryKind::UrlDecode => "#44aadd",
            HistoryKind::Base64Encode | HistoryKind::Base64Decode | HistoryKind::Base64FileEncode => "#44dd66",
            HistoryKind::UnicodeEncode | HistoryKind::UnicodeDecode => "#ddaa44",
            HistoryKind::HtmlEncode | HistoryKind::HtmlDecode => "#dd6644",
            HistoryKind::JsonFormat | HistoryKind::JsonMinify => "#aa66dd",
            HistoryKind::ImageConvert => "#dd44aa",
            HistoryKind::Other(_) => "#888888",
        }
    }
}

impl From<String> for HistoryKind {
    fn from(tag: String) -> Self {
        HistoryKind::from_tag(&tag)
    }
}

impl From<HistoryKind> for String {
    fn from(kind: HistoryKind) -> Self {
        kind.tag().to_string()
    }
}

/// One logged operation. Field names match the persisted record layout.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub input: String,
    pub output: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// Sidebar destinations, addressed by the location hash (`#/encoder`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Encoder,
    Json,
    Image,
    History,
    NotFound(String),
}

impl Route {
    pub const NAV: [Route; 5] = [Route::Home, Route::Encoder, Route::Json, Route::Image, Route::History];

    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Route::Home,
            "/encoder" => Route::Encoder,
            "/json" => Route::Json,
            "/image" => Route::Image,
            "/history" => Route::History,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Encoder => "/encoder",
            Route::Json => "/json",
            Route::Image => "/image",
            Route::History => "/history",
            Route::NotFound(path) => path.as_str(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    pub fn label(&self) -> &str {
        match self {
            Route::Home => "Home",
            Route::Encoder => "Encode / Decode",
            Route::Json => "JSON Formatter",
            Route::Image => "Image Converter",
            Route::History => "History",
            Route::NotFound(_) => "Not Found",
        }
    }
}

/// Output formats offered by the image converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpg,
    Ico,
    Svg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 4] = [ImageFormat::Png, ImageFormat::Jpg, ImageFormat::Ico, ImageFormat::Svg];

    pub fn tag(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Ico => "ico",
            ImageFormat::Svg => "svg",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpg),
            "ico" => Some(ImageFormat::Ico),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpg => "JPEG/JPG",
            ImageFormat::Ico => "ICO",
            ImageFormat::Svg => "SVG",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpg => "image/jpeg",
            ImageFormat::Ico => "image/x-icon",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

/// First `max` characters of `text`, with an ellipsis when anything was cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Swaps the extension of `file_name` for the target format's tag.
pub fn converted_file_name(file_name: &str, format: ImageFormat) -> String {
    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(dot) => &file_name[..dot],
    };
    let stem = if stem.is_empty() { "image" } else { stem };
    format!("{}.{}", stem, format.tag())
}
