use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{BUTTON, BUTTON_PRIMARY, ERROR_TEXT, INPUT, LABEL, PAGE_TITLE, PANEL};
use crate::app::ToolboxCtx;
use crate::bridge::{is_tauri, ImageRequest};
use crate::controller;
use crate::state::{converted_file_name, ImageFormat, DEFAULT_IMAGE_SIZE, MAX_IMAGE_SIZE};
use crate::web::{download, first_file, object_url_for_bytes, object_url_for_file, read_file_bytes, revoke_object_url};

#[derive(Clone, Debug, PartialEq)]
struct SourceImage {
    name: String,
    data: Vec<u8>,
    preview_url: String,
}

#[derive(Clone, Debug, PartialEq)]
struct ConvertedImage {
    url: String,
    file_name: String,
    format: ImageFormat,
    data: Vec<u8>,
}

const PREVIEW: &str = "max-width: 100%; max-height: 240px; object-fit: contain; \
                       border: 1px solid #33aa55; background: \
                       repeating-conic-gradient(#0a1a0a 0% 25%, #040804 0% 50%) 50% / 16px 16px;";

fn parse_dimension(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

#[component]
pub fn ImageConverter() -> impl IntoView {
    let ctx = expect_context::<ToolboxCtx>();
    let (source, set_source) = signal::<Option<SourceImage>>(None);
    let (converted, set_converted) = signal::<Option<ConvertedImage>>(None);
    let (format, set_format) = signal(ImageFormat::Png);
    let (width, set_width) = signal(DEFAULT_IMAGE_SIZE);
    let (height, set_height) = signal(DEFAULT_IMAGE_SIZE);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saved_to, set_saved_to) = signal::<Option<String>>(None);

    let clear_converted = move || {
        if let Some(old) = converted.get_untracked() {
            revoke_object_url(&old.url);
        }
        set_converted.set(None);
        set_saved_to.set(None);
    };

    let clear_selection = move || {
        clear_converted();
        if let Some(old) = source.get_untracked() {
            revoke_object_url(&old.preview_url);
        }
        set_source.set(None);
        set_error.set(None);
    };

    let on_pick = move |ev: web_sys::Event| {
        clear_selection();
        let Some(file) = first_file(&ev) else {
            return;
        };
        if !file.type_().starts_with("image/") {
            set_error.set(Some(format!("{} is not an image", file.name())));
            return;
        }
        spawn_local(async move {
            let loaded = match read_file_bytes(&file).await {
                Ok(data) => object_url_for_file(&file).map(|preview_url| SourceImage {
                    name: file.name(),
                    data,
                    preview_url,
                }),
                Err(e) => Err(e),
            };
            match loaded {
                Ok(image) => set_source.set(Some(image)),
                Err(e) => set_error.set(Some(format!("Could not read image: {}", e))),
            }
        });
    };

    let on_convert = move |_: web_sys::MouseEvent| {
        let Some(image) = source.get_untracked() else {
            set_error.set(Some("Please choose an image first".to_string()));
            return;
        };
        let request = ImageRequest {
            file_name: image.name,
            data: image.data,
            format: format.get_untracked(),
            width: width.get_untracked(),
            height: height.get_untracked(),
        };

        clear_converted();
        set_error.set(None);
        set_loading.set(true);
        spawn_local(async move {
            let outcome = controller::convert_image(&ctx.backend, &ctx.history, &request)
                .await
                .map_err(|e| e.to_string())
                .and_then(|bytes| {
                    object_url_for_bytes(&bytes, request.format.mime_type()).map(|url| ConvertedImage {
                        url,
                        file_name: converted_file_name(&request.file_name, request.format),
                        format: request.format,
                        data: bytes,
                    })
                });
            match outcome {
                Ok(image) => set_converted.set(Some(image)),
                Err(e) => set_error.set(Some(format!("Conversion failed: {}", e))),
            }
            set_loading.set(false);
        });
    };

    let on_save = move |_: web_sys::MouseEvent| {
        let Some(image) = converted.get_untracked() else {
            return;
        };
        set_saved_to.set(None);
        if !is_tauri() {
            if let Err(e) = download(&image.url, &image.file_name) {
                set_error.set(Some(format!("Download failed: {}", e)));
            }
            return;
        }
        spawn_local(async move {
            match controller::save_image(&ctx.backend, &image.data, &image.file_name, image.format).await {
                Ok(Some(path)) => set_saved_to.set(Some(path)),
                Ok(None) => {}
                Err(e) => set_error.set(Some(format!("Save failed: {}", e))),
            }
        });
    };

    let format_options = ImageFormat::ALL
        .into_iter()
        .map(|f| {
            view! {
                <label style="display: flex; gap: 6px; align-items: center; cursor: pointer; font-size: 12px;">
                    <input
                        type="radio"
                        name="image-format"
                        prop:checked=move || format.get() == f
                        on:change=move |_| set_format.set(f)
                    />
                    {f.label()}
                </label>
            }
        })
        .collect_view();

    view! {
        <div>
            <h1 style=PAGE_TITLE>"Image Converter"</h1>
            <div style="display: flex; gap: 16px; flex-wrap: wrap; align-items: flex-start;">
                <div style=format!("{} flex: 1; min-width: 280px;", PANEL)>
                    <label style=LABEL>"SOURCE IMAGE"</label>
                    <input
                        type="file"
                        accept="image/png,image/jpeg,image/gif,image/bmp,image/webp,image/x-icon"
                        style="color: #ccffdd; font-family: inherit;"
                        on:change=on_pick
                    />
                    {move || source.get().map(|image| view! {
                        <div style="margin-top: 12px;">
                            <img src=image.preview_url style=PREVIEW />
                            <p style="margin: 8px 0; color: #66cc88; font-size: 12px;">
                                {image.name} " (" {image.data.len()} " bytes)"
                            </p>
                            <button style=BUTTON on:click=move |_| clear_selection()>"Clear"</button>
                        </div>
                    })}
                </div>
                <div style=format!("{} flex: 1; min-width: 280px;", PANEL)>
                    <label style=LABEL>"OUTPUT FORMAT"</label>
                    <div style="display: flex; gap: 16px; margin-bottom: 12px;">{format_options}</div>
                    <div style="display: flex; gap: 8px; margin-bottom: 12px;">
                        <div style="flex: 1;">
                            <label style=LABEL>"WIDTH"</label>
                            <input
                                type="number"
                                min="1"
                                max=MAX_IMAGE_SIZE.to_string()
                                style=INPUT
                                prop:value=move || width.get().to_string()
                                on:input=move |ev| set_width.set(parse_dimension(&event_target_value(&ev)))
                            />
                        </div>
                        <div style="flex: 1;">
                            <label style=LABEL>"HEIGHT"</label>
                            <input
                                type="number"
                                min="1"
                                max=MAX_IMAGE_SIZE.to_string()
                                style=INPUT
                                prop:value=move || height.get().to_string()
                                on:input=move |ev| set_height.set(parse_dimension(&event_target_value(&ev)))
                            />
                        </div>
                    </div>
                    <button
                        style=BUTTON_PRIMARY
                        disabled=move || loading.get() || source.with(|s| s.is_none())
                        on:click=on_convert
                    >
                        {move || if loading.get() { "Converting..." } else { "Convert" }}
                    </button>
                    {move || error.get().map(|msg| view! { <p style=ERROR_TEXT>{msg}</p> })}
                    {move || converted.get().map(|image| view! {
                        <div style="margin-top: 12px;">
                            <img src=image.url.clone() style=PREVIEW />
                            <p style="margin: 8px 0; color: #66cc88; font-size: 12px;">
                                {image.file_name.clone()} " (" {image.data.len()} " bytes)"
                            </p>
                            <button style=BUTTON_PRIMARY on:click=on_save>"Save"</button>
                            {move || saved_to.get().map(|path| view! {
                                <p style="margin: 8px 0 0 0; color: #66cc88; font-size: 12px;">"Saved to " {path}</p>
                            })}
                        </div>
                    })}
                </div>
            </div>
        </div>
    }
}
