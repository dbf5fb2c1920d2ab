use leptos::prelude::*;

use super::{CopyButton, BUTTON, BUTTON_DANGER, ERROR_TEXT, LABEL, MODAL_BACKDROP, MODAL_BODY, PAGE_TITLE, PANEL, TEXTAREA};
use crate::app::ToolboxCtx;
use crate::state::{truncate_chars, HistoryEntry};
use crate::web::format_timestamp;

const PREVIEW_CHARS: usize = 40;

const CELL: &str = "padding: 8px; border-bottom: 1px solid #1a3a1a; vertical-align: top; \
                    word-break: break-all; font-size: 12px;";

const HEADER_CELL: &str = "padding: 8px; text-align: left; color: #66cc88; font-size: 11px; \
                           letter-spacing: 0.5px; border-bottom: 1px solid #33aa55;";

fn badge_style(color: &str) -> String {
    format!(
        "display: inline-block; padding: 2px 8px; border: 1px solid {0}; color: {0}; \
         font-size: 11px; white-space: nowrap;",
        color
    )
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let ctx = expect_context::<ToolboxCtx>();
    let (entries, set_entries) = signal(Vec::<HistoryEntry>::new());
    let (selected, set_selected) = signal::<Option<HistoryEntry>>(None);
    let (confirm_clear, set_confirm_clear) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let reload = move || set_entries.set(ctx.history.list());

    Effect::new(move || reload());

    let delete = move |id: String| {
        match ctx.history.delete_by_id(&id) {
            Ok(()) => set_error.set(None),
            Err(e) => set_error.set(Some(format!("Could not delete entry: {}", e))),
        }
        if selected.with_untracked(|s| s.as_ref().is_some_and(|entry| entry.id == id)) {
            set_selected.set(None);
        }
        reload();
    };

    let clear_all = move |_: web_sys::MouseEvent| {
        match ctx.history.clear() {
            Ok(()) => set_error.set(None),
            Err(e) => set_error.set(Some(format!("Could not clear history: {}", e))),
        }
        set_confirm_clear.set(false);
        set_selected.set(None);
        reload();
    };

    view! {
        <div>
            <div style="display: flex; justify-content: space-between; align-items: center;">
                <h1 style=PAGE_TITLE>"History"</h1>
                <button
                    style=BUTTON_DANGER
                    disabled=move || entries.with(|e| e.is_empty())
                    on:click=move |_| set_confirm_clear.set(true)
                >
                    "Clear all"
                </button>
            </div>
            {move || error.get().map(|msg| view! { <p style=ERROR_TEXT>{msg}</p> })}
            <div style=PANEL>
                <Show
                    when=move || entries.with(|e| !e.is_empty())
                    fallback=|| view! {
                        <p style="color: #66cc88; margin: 0;">"No history yet. Operations you run will show up here."</p>
                    }
                >
                    <table style="width: 100%; border-collapse: collapse;">
                        <thead>
                            <tr>
                                <th style=HEADER_CELL>"TYPE"</th>
                                <th style=HEADER_CELL>"INPUT"</th>
                                <th style=HEADER_CELL>"OUTPUT"</th>
                                <th style=HEADER_CELL>"TIME"</th>
                                <th style=HEADER_CELL></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || entries.get()
                                key=|entry| entry.id.clone()
                                children=move |entry| {
                                    let id = entry.id.clone();
                                    let for_detail = entry.clone();
                                    view! {
                                        <tr>
                                            <td style=CELL>
                                                <span style=badge_style(entry.kind.color())>{entry.kind.label().to_string()}</span>
                                            </td>
                                            <td style=CELL>{truncate_chars(&entry.input, PREVIEW_CHARS)}</td>
                                            <td style=CELL>{truncate_chars(&entry.output, PREVIEW_CHARS)}</td>
                                            <td style=format!("{} white-space: nowrap;", CELL)>{format_timestamp(entry.timestamp)}</td>
                                            <td style=format!("{} white-space: nowrap; text-align: right;", CELL)>
                                                <button
                                                    style=BUTTON
                                                    on:click=move |_| set_selected.set(Some(for_detail.clone()))
                                                >
                                                    "View"
                                                </button>
                                                " "
                                                <button
                                                    style=BUTTON_DANGER
                                                    on:click=move |_| delete(id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </div>

            {move || selected.get().map(|entry| view! {
                <EntryDetail entry=entry on_close=move || set_selected.set(None) />
            })}

            <Show when=move || confirm_clear.get()>
                <div style=MODAL_BACKDROP on:click=move |_| set_confirm_clear.set(false)>
                    <div style=MODAL_BODY on:click=|ev| ev.stop_propagation()>
                        <p style="margin-top: 0;">"Delete all history entries? This cannot be undone."</p>
                        <div style="display: flex; gap: 8px; justify-content: flex-end;">
                            <button style=BUTTON on:click=move |_| set_confirm_clear.set(false)>"Cancel"</button>
                            <button style=BUTTON_DANGER on:click=clear_all>"Clear all"</button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

/// Full input and output of one entry in a modal.
#[component]
fn EntryDetail(entry: HistoryEntry, on_close: impl Fn() + Copy + Send + Sync + 'static) -> impl IntoView {
    let input = entry.input.clone();
    let output = entry.output.clone();

    view! {
        <div style=MODAL_BACKDROP on:click=move |_| on_close()>
            <div style=MODAL_BODY on:click=|ev| ev.stop_propagation()>
                <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;">
                    <span style=badge_style(entry.kind.color())>{entry.kind.label().to_string()}</span>
                    <span style="color: #66cc88; font-size: 12px;">{format_timestamp(entry.timestamp)}</span>
                </div>
                <div style="display: flex; justify-content: space-between; align-items: center;">
                    <label style=LABEL>"INPUT"</label>
                    <CopyButton value=Signal::derive(move || input.clone()) />
                </div>
                <textarea style=TEXTAREA readonly=true prop:value=entry.input.clone() />
                <div style="display: flex; justify-content: space-between; align-items: center; margin-top: 12px;">
                    <label style=LABEL>"OUTPUT"</label>
                    <CopyButton value=Signal::derive(move || output.clone()) />
                </div>
                <textarea style=TEXTAREA readonly=true prop:value=entry.output.clone() />
                <div style="display: flex; justify-content: flex-end; margin-top: 16px;">
                    <button style=BUTTON on:click=move |_| on_close()>"Close"</button>
                </div>
            </div>
        </div>
    }
}
