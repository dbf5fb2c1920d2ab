use leptos::prelude::*;

use super::{CopyButton, BUTTON, BUTTON_PRIMARY, DIVIDER, ERROR_TEXT, INPUT, LABEL, PAGE_TITLE, PANEL, TEXTAREA};
use crate::app::ToolboxCtx;
use crate::controller;
use crate::json_format::{DEFAULT_INDENT, MAX_INDENT};

#[component]
pub fn JsonFormatter() -> impl IntoView {
    let ctx = expect_context::<ToolboxCtx>();
    let (input, set_input) = signal(String::new());
    let (output, set_output) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (indent, set_indent) = signal(DEFAULT_INDENT);
    let (sort_keys, set_sort_keys) = signal(false);

    let show = move |result: Result<String, controller::ToolError>, action: &str| match result {
        Ok(text) => {
            set_error.set(None);
            set_output.set(text);
        }
        Err(e) => {
            log::debug!("{} failed: {}", action, e);
            set_output.set(String::new());
            set_error.set(Some(format!("{} error: {}", action, e)));
        }
    };

    let on_format = move |_: web_sys::MouseEvent| {
        let result = controller::format_json(&ctx.history, &input.get_untracked(), indent.get_untracked(), sort_keys.get_untracked());
        show(result, "Format");
    };

    let on_minify = move |_: web_sys::MouseEvent| {
        let result = controller::minify_json(&ctx.history, &input.get_untracked());
        show(result, "Minify");
    };

    view! {
        <div>
            <h1 style=PAGE_TITLE>"JSON Formatter"</h1>
            <div style=PANEL>
                <label style=LABEL>"JSON"</label>
                <textarea
                    style=format!("{} min-height: 220px;", TEXTAREA)
                    placeholder="{\"paste\": \"your JSON here\"}"
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                />
                <div style="display: flex; gap: 16px; align-items: flex-end; margin-top: 8px; flex-wrap: wrap;">
                    <button style=BUTTON_PRIMARY on:click=on_format>"Format"</button>
                    <button style=BUTTON on:click=on_minify>"Minify"</button>
                    <div style="width: 120px;">
                        <label style=LABEL>"INDENT"</label>
                        <input
                            type="number"
                            min="0"
                            max=MAX_INDENT.to_string()
                            style=INPUT
                            prop:value=move || indent.get().to_string()
                            on:input=move |ev| {
                                if let Ok(n) = event_target_value(&ev).trim().parse::<usize>() {
                                    set_indent.set(n.min(MAX_INDENT));
                                }
                            }
                        />
                    </div>
                    <label style="color: #66cc88; font-size: 12px; display: flex; gap: 6px; align-items: center; cursor: pointer;">
                        <input
                            type="checkbox"
                            prop:checked=move || sort_keys.get()
                            on:change=move |ev| set_sort_keys.set(event_target_checked(&ev))
                        />
                        "Sort keys"
                    </label>
                </div>
                {move || error.get().map(|msg| view! { <p style=ERROR_TEXT>{msg}</p> })}
                <hr style=DIVIDER />
                <div style="display: flex; justify-content: space-between; align-items: center;">
                    <label style=LABEL>"RESULT"</label>
                    <CopyButton value=output />
                </div>
                <textarea
                    style=format!("{} min-height: 220px;", TEXTAREA)
                    readonly=true
                    prop:value=move || output.get()
                />
            </div>
        </div>
    }
}
