//! Freya / Alice Frontend Entry Point
//!
//! Mounts the story tool when the page lives under `/alice`, otherwise the
//! planning tool.

mod api;
mod charts;
mod components;
mod config;
mod context;
mod error;
mod filters;
mod forms;
mod graph;
mod kanban;
mod loader;
mod markdown;
mod models;
mod nav;
mod store;
mod views;

use components::{AliceApp, FreyaApp};
use config::AppConfig;
use leptos::prelude::*;

fn current_path() -> String {
    web_sys::window()
        .and_then(|win| win.location().pathname().ok())
        .unwrap_or_default()
}

fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    let config = AppConfig::load();
    let path = current_path();
    let is_alice = config.serves_alice(&path);
    tracing::info!(path = %path, alice = is_alice, "mounting frontend");

    if is_alice {
        mount_to_body(move || view! { <AliceApp config=config /> });
    } else {
        mount_to_body(move || view! { <FreyaApp config=config /> });
    }
}
