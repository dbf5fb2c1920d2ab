use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{BUTTON_PRIMARY, ERROR_TEXT, INPUT, PAGE_TITLE, PANEL};
use crate::app::ToolboxCtx;
use crate::controller;

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<ToolboxCtx>();
    let (name, set_name) = signal(String::new());
    let (greeting, set_greeting) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let greet = move || {
        let name = name.get_untracked();
        spawn_local(async move {
            match controller::greet(&ctx.backend, &name).await {
                Ok(message) => {
                    set_error.set(None);
                    set_greeting.set(message);
                }
                Err(e) => {
                    set_greeting.set(String::new());
                    set_error.set(Some(format!("Failed to call the native backend: {}", e)));
                }
            }
        });
    };

    view! {
        <div>
            <h1 style=PAGE_TITLE>"Welcome to Summer Toolbox"</h1>
            <div style=PANEL>
                <p style="margin: 0;">"A small toolbox for everyday encoding, JSON and image chores."</p>
                <p style="margin: 12px 0 0 0; color: #66cc88;">"Pick a tool from the sidebar to get started."</p>
            </div>
            <div style=PANEL>
                <h3 style="margin: 0 0 12px 0; font-size: 14px; color: #aaffbb;">"Say hello to the backend"</h3>
                <div style="display: flex; gap: 8px; max-width: 480px;">
                    <input
                        type="text"
                        placeholder="Your name"
                        style=INPUT
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                greet();
                            }
                        }
                    />
                    <button style=BUTTON_PRIMARY on:click=move |_| greet()>"Greet"</button>
                </div>
                <Show when=move || !greeting.get().is_empty()>
                    <p style="margin: 12px 0 0 0; font-weight: bold;">{move || greeting.get()}</p>
                </Show>
                {move || error.get().map(|msg| view! { <p style=ERROR_TEXT>{msg}</p> })}
            </div>
        </div>
    }
}
