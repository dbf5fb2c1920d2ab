use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{CopyButton, BUTTON, BUTTON_PRIMARY, DIVIDER, ERROR_TEXT, LABEL, PAGE_TITLE, PANEL, TEXTAREA};
use crate::app::ToolboxCtx;
use crate::bridge::TextOp;
use crate::controller::{self, ToolError};
use crate::web::{first_file, read_file_bytes};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Url,
    Unicode,
    Base64,
    Base64File,
    Html,
}

impl Tab {
    const ALL: [Tab; 5] = [Tab::Url, Tab::Unicode, Tab::Base64, Tab::Base64File, Tab::Html];

    fn label(&self) -> &'static str {
        match self {
            Tab::Url => "URL",
            Tab::Unicode => "Unicode",
            Tab::Base64 => "Base64",
            Tab::Base64File => "Base64 File",
            Tab::Html => "HTML Entities",
        }
    }
}

fn tab_style(active: bool) -> &'static str {
    if active {
        "background: #44dd66; color: #020202; border: 1px solid #44dd66; padding: 8px 16px; \
         cursor: pointer; font-family: inherit; font-size: 12px; font-weight: bold;"
    } else {
        "background: transparent; color: #66cc88; border: 1px solid #33aa55; padding: 8px 16px; \
         cursor: pointer; font-family: inherit; font-size: 12px;"
    }
}

/// Validation messages are shown as they are; backend failures get a prefix.
fn error_message(op: TextOp, err: &ToolError) -> String {
    match err {
        ToolError::Validation(msg) => msg.clone(),
        other => {
            let verb = if op.is_encode() { "Encoding" } else { "Decoding" };
            format!("{} failed: {}", verb, other)
        }
    }
}

#[component]
pub fn EncoderDecoder() -> impl IntoView {
    let (tab, set_tab) = signal(Tab::Url);

    view! {
        <div>
            <h1 style=PAGE_TITLE>"Encode / Decode"</h1>
            <div style="display: flex; gap: 4px; margin-bottom: 16px; flex-wrap: wrap;">
                {Tab::ALL
                    .into_iter()
                    .map(|t| view! {
                        <button style=move || tab_style(tab.get() == t) on:click=move |_| set_tab.set(t)>
                            {t.label()}
                        </button>
                    })
                    .collect_view()}
            </div>
            {move || match tab.get() {
                Tab::Url => view! {
                    <TextCodecPanel
                        encode=TextOp::UrlEncode
                        decode=TextOp::UrlDecode
                        placeholder="https://example.com/?q=summer toolbox"
                    />
                }.into_any(),
                Tab::Unicode => view! {
                    <TextCodecPanel
                        encode=TextOp::UnicodeEncode
                        decode=TextOp::UnicodeDecode
                        placeholder="Text, or escapes like \\u4F60\\u597D"
                    />
                }.into_any(),
                Tab::Base64 => view! {
                    <TextCodecPanel
                        encode=TextOp::Base64Encode
                        decode=TextOp::Base64Decode
                        placeholder="Text, or a Base64 string to decode"
                    />
                }.into_any(),
                Tab::Base64File => view! { <FileEncodePanel /> }.into_any(),
                Tab::Html => view! {
                    <TextCodecPanel
                        encode=TextOp::HtmlEncode
                        decode=TextOp::HtmlDecode
                        placeholder="<p>Fish & Chips</p>"
                    />
                }.into_any(),
            }}
        </div>
    }
}

/// Input box, encode/decode buttons and the result for one text codec.
#[component]
fn TextCodecPanel(encode: TextOp, decode: TextOp, #[prop(into)] placeholder: String) -> impl IntoView {
    let ctx = expect_context::<ToolboxCtx>();
    let (input, set_input) = signal(String::new());
    let (result, set_result) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let run = move |op: TextOp| {
        let text = input.get_untracked();
        spawn_local(async move {
            match controller::run_text_op(&ctx.backend, &ctx.history, op, &text).await {
                Ok(output) => {
                    set_error.set(None);
                    set_result.set(output);
                }
                Err(e) => {
                    set_result.set(String::new());
                    set_error.set(Some(error_message(op, &e)));
                }
            }
        });
    };

    view! {
        <div style=PANEL>
            <label style=LABEL>"INPUT"</label>
            <textarea
                style=TEXTAREA
                placeholder=placeholder
                prop:value=move || input.get()
                on:input=move |ev| set_input.set(event_target_value(&ev))
            />
            <div style="display: flex; gap: 8px; margin-top: 8px;">
                <button style=BUTTON_PRIMARY on:click=move |_| run(encode)>"Encode"</button>
                <button style=BUTTON on:click=move |_| run(decode)>"Decode"</button>
            </div>
            {move || error.get().map(|msg| view! { <p style=ERROR_TEXT>{msg}</p> })}
            <hr style=DIVIDER />
            <div style="display: flex; justify-content: space-between; align-items: center;">
                <label style=LABEL>"RESULT"</label>
                <CopyButton value=result />
            </div>
            <textarea style=TEXTAREA readonly=true prop:value=move || result.get() />
        </div>
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PickedFile {
    name: String,
    data: Vec<u8>,
}

#[component]
fn FileEncodePanel() -> impl IntoView {
    let ctx = expect_context::<ToolboxCtx>();
    let (picked, set_picked) = signal::<Option<PickedFile>>(None);
    let (result, set_result) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_change = move |ev: web_sys::Event| {
        set_result.set(String::new());
        set_error.set(None);
        let Some(file) = first_file(&ev) else {
            set_picked.set(None);
            return;
        };
        spawn_local(async move {
            match read_file_bytes(&file).await {
                Ok(data) => set_picked.set(Some(PickedFile { name: file.name(), data })),
                Err(e) => {
                    set_picked.set(None);
                    set_error.set(Some(format!("Could not read file: {}", e)));
                }
            }
        });
    };

    let on_encode = move |_: web_sys::MouseEvent| {
        let (name, data) = picked
            .get_untracked()
            .map(|f| (f.name, f.data))
            .unwrap_or_default();
        spawn_local(async move {
            match controller::encode_file(&ctx.backend, &ctx.history, &name, &data).await {
                Ok(output) => {
                    set_error.set(None);
                    set_result.set(output);
                }
                Err(e) => {
                    set_result.set(String::new());
                    set_error.set(Some(error_message(TextOp::Base64Encode, &e)));
                }
            }
        });
    };

    view! {
        <div style=PANEL>
            <label style=LABEL>"FILE"</label>
            <input type="file" style="color: #ccffdd; font-family: inherit;" on:change=on_change />
            {move || picked.get().map(|f| view! {
                <p style="margin: 8px 0 0 0; color: #66cc88; font-size: 12px;">
                    {f.name} " (" {f.data.len()} " bytes)"
                </p>
            })}
            <div style="margin-top: 8px;">
                <button
                    style=BUTTON_PRIMARY
                    disabled=move || picked.with(|p| p.is_none())
                    on:click=on_encode
                >
                    "Encode to Base64"
                </button>
            </div>
            {move || error.get().map(|msg| view! { <p style=ERROR_TEXT>{msg}</p> })}
            <hr style=DIVIDER />
            <div style="display: flex; justify-content: space-between; align-items: center;">
                <label style=LABEL>"RESULT"</label>
                <CopyButton value=result />
            </div>
            <textarea style=TEXTAREA readonly=true prop:value=move || result.get() />
        </div>
    }
}
