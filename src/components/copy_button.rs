use leptos::prelude::*;
use leptos::task::spawn_local;

use super::BUTTON;
use crate::web::copy_to_clipboard;

const COPIED_RESET_MS: u32 = 2000;

#[component]
pub fn CopyButton(#[prop(into)] value: Signal<String>) -> impl IntoView {
    let (copied, set_copied) = signal(false);

    let on_click = move |_: web_sys::MouseEvent| {
        let text = value.get_untracked();
        if text.is_empty() {
            return;
        }
        spawn_local(async move {
            match copy_to_clipboard(&text).await {
                Ok(()) => {
                    set_copied.set(true);
                    gloo_timers::future::TimeoutFuture::new(COPIED_RESET_MS).await;
                    set_copied.set(false);
                }
                Err(e) => log::warn!("clipboard write failed: {}", e),
            }
        });
    };

    view! {
        <button
            style=BUTTON
            disabled=move || value.get().is_empty()
            on:click=on_click
        >
            {move || if copied.get() { "Copied" } else { "Copy" }}
        </button>
    }
}
