use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::bridge::TauriBackend;
use crate::components::{EncoderDecoder, HistoryPage, HomePage, ImageConverter, JsonFormatter, SimplePage, FONT};
use crate::history::HistoryStore;
use crate::state::Route;
use crate::storage::LocalStorage;
use crate::web::current_hash;

/// Shared handles every page reaches through `expect_context`.
#[derive(Clone, Copy)]
pub struct ToolboxCtx {
    pub history: HistoryStore<LocalStorage>,
    pub backend: TauriBackend,
}

impl ToolboxCtx {
    pub fn new() -> Self {
        Self {
            history: HistoryStore::new(LocalStorage),
            backend: TauriBackend,
        }
    }
}

impl Default for ToolboxCtx {
    fn default() -> Self {
        Self::new()
    }
}

fn nav_link_style(active: bool) -> &'static str {
    if active {
        "display: block; padding: 10px 16px; color: #020202; background: #44dd66; \
         text-decoration: none; font-size: 13px; font-weight: bold;"
    } else {
        "display: block; padding: 10px 16px; color: #66cc88; background: transparent; \
         text-decoration: none; font-size: 13px;"
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(ToolboxCtx::new());

    let (route, set_route) = signal(Route::from_path(&current_hash()));

    // Follow the location hash
    Effect::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handler = Closure::<dyn Fn()>::new(move || {
            let next = Route::from_path(&current_hash());
            log::debug!("navigate to {}", next.path());
            set_route.set(next);
        });
        if let Err(e) = window.add_event_listener_with_callback("hashchange", handler.as_ref().unchecked_ref()) {
            log::warn!("could not listen for hashchange: {:?}", e);
        }
        handler.forget();
    });

    view! {
        <div style=format!(
            "display: flex; flex-direction: column; height: 100vh; background: #020202; \
             color: #ccffdd; font-family: {};",
            FONT
        )>
            <header style="padding: 14px 20px; border-bottom: 1px solid #44dd66; \
                           box-shadow: 0 0 12px rgba(68, 221, 102, 0.15);">
                <span style="font-size: 18px; font-weight: bold; color: #aaffbb; \
                             text-shadow: 0 0 6px #44dd66; letter-spacing: 1px;">
                    "Summer Toolbox"
                </span>
            </header>
            <div style="display: flex; flex: 1; min-height: 0;">
                <nav style="width: 250px; flex-shrink: 0; display: flex; flex-direction: column; \
                            border-right: 1px solid #33aa55; background: #040804;">
                    <div style="flex: 1; padding-top: 8px;">
                        {Route::NAV
                            .into_iter()
                            .map(|target| {
                                let href = target.href();
                                let label = target.label().to_string();
                                view! {
                                    <a
                                        href=href
                                        style=move || nav_link_style(route.with(|r| *r == target))
                                    >
                                        {label}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div style="padding: 12px 16px; border-top: 1px dashed #33aa55; \
                                color: #33aa55; font-size: 11px;">
                        {format!("Summer Toolbox v{}", env!("CARGO_PKG_VERSION"))}
                    </div>
                </nav>
                <main style="flex: 1; overflow-y: auto; padding: 24px;">
                    {move || match route.get() {
                        Route::Home => view! { <HomePage /> }.into_any(),
                        Route::Encoder => view! { <EncoderDecoder /> }.into_any(),
                        Route::Json => view! { <JsonFormatter /> }.into_any(),
                        Route::Image => view! { <ImageConverter /> }.into_any(),
                        Route::History => view! { <HistoryPage /> }.into_any(),
                        Route::NotFound(path) => view! {
                            <SimplePage
                                title="Page not found".to_string()
                                detail=path
                            />
                        }.into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}
