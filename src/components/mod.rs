//! UI Components
//!
//! Leptos components for both tools. Each section renders from the store;
//! logic lives in the view-model and controller modules.

mod alice_app;
mod characters;
mod chart;
mod dashboard;
mod diagrams;
mod docs;
mod filter_bar;
mod freya_app;
mod graph_view;
mod ideas;
mod images;
mod modal;
mod notifications;
mod sidebar;
mod story_dashboard;
mod story_list;
mod story_modal;
mod tasks;

pub use alice_app::AliceApp;
pub use freya_app::FreyaApp;
