use leptos::prelude::*;

use super::{PAGE_TITLE, PANEL};

#[component]
pub fn SimplePage(
    #[prop(into)] title: String,
    #[prop(optional, into)] detail: Option<String>,
) -> impl IntoView {
    view! {
        <div>
            <h1 style=PAGE_TITLE>{title}</h1>
            <div style=PANEL>
                <p style="margin: 0;">"Nothing lives here."</p>
                {detail.map(|path| view! {
                    <p style="margin: 12px 0 0 0; color: #66cc88; font-size: 12px;">"Requested path: " {path}</p>
                })}
                <p style="margin: 12px 0 0 0;">
                    <a href="#/" style="color: #aaffbb;">"Back to home"</a>
                </p>
            </div>
        </div>
    }
}
