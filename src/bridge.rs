//! Calls into the native side.
//!
//! Pages talk to a [`TransformBackend`] rather than to Tauri directly, so the
//! controllers can be driven by a fake in tests.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::state::{HistoryKind, ImageFormat};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

pub fn is_tauri() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("__TAURI__")).ok())
        .map(|v| !v.is_undefined())
        .unwrap_or(false)
}

/// Text transforms exposed by the native side, one per command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextOp {
    UrlEncode,
    UrlDecode,
    UnicodeEncode,
    UnicodeDecode,
    Base64Encode,
    Base64Decode,
    HtmlEncode,
    HtmlDecode,
}

impl TextOp {
    pub fn command(&self) -> &'static str {
        match self {
            TextOp::UrlEncode => "encode_url",
            TextOp::UrlDecode => "decode_url",
            TextOp::UnicodeEncode => "encode_unicode",
            TextOp::UnicodeDecode => "decode_unicode",
            TextOp::Base64Encode => "encode_base64",
            TextOp::Base64Decode => "decode_base64",
            TextOp::HtmlEncode => "encode_html",
            TextOp::HtmlDecode => "decode_html",
        }
    }

    pub fn kind(&self) -> HistoryKind {
        match self {
            TextOp::UrlEncode => HistoryKind::UrlEncode,
            TextOp::UrlDecode => HistoryKind::UrlDecode,
            TextOp::UnicodeEncode => HistoryKind::UnicodeEncode,
            TextOp::UnicodeDecode => HistoryKind::UnicodeDecode,
            TextOp::Base64Encode => HistoryKind::Base64Encode,
            TextOp::Base64Decode => HistoryKind::Base64Decode,
            TextOp::HtmlEncode => HistoryKind::HtmlEncode,
            TextOp::HtmlDecode => HistoryKind::HtmlDecode,
        }
    }

    pub fn is_encode(&self) -> bool {
        matches!(
            self,
            TextOp::UrlEncode | TextOp::UnicodeEncode | TextOp::Base64Encode | TextOp::HtmlEncode
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageRequest {
    pub file_name: String,
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

#[allow(async_fn_in_trait)]
pub trait TransformBackend {
    async fn text(&self, op: TextOp, text: &str) -> Result<String, String>;
    async fn encode_file(&self, data: &[u8]) -> Result<String, String>;
    async fn convert_image(&self, request: &ImageRequest) -> Result<Vec<u8>, String>;
    async fn greet(&self, name: &str) -> Result<String, String>;
    /// Lets the user pick a destination for `data`. `Ok(None)` means cancelled.
    async fn save_image(&self, data: &[u8], file_name: &str, format: ImageFormat) -> Result<Option<String>, String>;
}

#[derive(Serialize)]
struct TextArgs<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct FileArgs<'a> {
    data: &'a [u8],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConvertImageArgs<'a> {
    image_data: &'a [u8],
    format: &'a str,
    width: u32,
    height: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveImageArgs<'a> {
    data: &'a [u8],
    file_name: &'a str,
    format: &'a str,
}

#[derive(Serialize)]
struct GreetArgs<'a> {
    name: &'a str,
}

/// `window.__TAURI__.core.invoke`. Outside the desktop shell every call fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct TauriBackend;

impl TauriBackend {
    async fn call<A: Serialize>(&self, cmd: &str, args: &A) -> Result<JsValue, String> {
        if !is_tauri() {
            return Err("backend unavailable: not running inside the desktop shell".to_string());
        }
        let args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
        log::debug!("invoke {}", cmd);
        invoke(cmd, args).await.map_err(|e| {
            let msg = e.as_string().unwrap_or_else(|| format!("{:?}", e));
            log::warn!("{} failed: {}", cmd, msg);
            msg
        })
    }

    async fn call_string<A: Serialize>(&self, cmd: &str, args: &A) -> Result<String, String> {
        let value = self.call(cmd, args).await?;
        value
            .as_string()
            .ok_or_else(|| format!("{} returned a non-string value", cmd))
    }
}

impl TransformBackend for TauriBackend {
    async fn text(&self, op: TextOp, text: &str) -> Result<String, String> {
        self.call_string(op.command(), &TextArgs { text }).await
    }

    async fn encode_file(&self, data: &[u8]) -> Result<String, String> {
        self.call_string("encode_base64_file", &FileArgs { data }).await
    }

    async fn convert_image(&self, request: &ImageRequest) -> Result<Vec<u8>, String> {
        let args = ConvertImageArgs {
            image_data: &request.data,
            format: request.format.tag(),
            width: request.width,
            height: request.height,
        };
        let value = self.call("convert_image", &args).await?;
        serde_wasm_bindgen::from_value::<Vec<u8>>(value).map_err(|e| e.to_string())
    }

    async fn greet(&self, name: &str) -> Result<String, String> {
        self.call_string("greet", &GreetArgs { name }).await
    }

    async fn save_image(&self, data: &[u8], file_name: &str, format: ImageFormat) -> Result<Option<String>, String> {
        let args = SaveImageArgs {
            data,
            file_name,
            format: format.tag(),
        };
        let value = self.call("save_image", &args).await?;
        serde_wasm_bindgen::from_value::<Option<String>>(value).map_err(|e| e.to_string())
    }
}
