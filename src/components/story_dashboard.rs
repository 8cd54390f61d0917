//! Story Dashboard
//!
//! Collection counts, recent characters and locations, and the character
//! relationship graph.

use leptos::prelude::*;

use super::graph_view::RelationshipGraphView;
use crate::context::use_app_context;
use crate::store::use_alice_store;
use crate::views::{alice_dashboard, format_date, initials, or_default, string_to_color, NO_CHARACTERS, NO_LOCATIONS};

#[component]
pub fn StoryDashboardView() -> impl IntoView {
    let limit = use_app_context().config().dashboard_limit;
    let store = use_alice_store();
    let dashboard = Memo::new(move |_| alice_dashboard(&store.read(), limit));

    view! {
        <h2>"Story Dashboard"</h2>
        <div class="stats-grid">
            {move || {
                dashboard
                    .with(|d| d.counts.clone())
                    .into_iter()
                    .map(|(label, count)| {
                        view! {
                            <div class="stat-card">
                                <div class="stat-value">{count}</div>
                                <div class="stat-label">{label}</div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>

        <RelationshipGraphView />

        <div class="dashboard-columns">
            <div class="dashboard-panel">
                <h3>"Recent Characters"</h3>
                {move || {
                    let characters = dashboard.with(|d| d.recent_characters.clone());
                    if characters.is_empty() {
                        return view! { <p class="empty-state">{NO_CHARACTERS}</p> }.into_any();
                    }
                    view! {
                        <ul class="recent-list">
                            {characters
                                .into_iter()
                                .map(|character| {
                                    view! {
                                        <li class="recent-item">
                                            <span
                                                class="avatar small"
                                                style=format!("background-color: {};", string_to_color(&character.name))
                                            >
                                                {initials(&character.name)}
                                            </span>
                                            <span class="recent-title">{character.name.clone()}</span>
                                            <span class="faction">{or_default(&character.faction, "Unaligned").to_string()}</span>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }}
            </div>
            <div class="dashboard-panel">
                <h3>"Recent Locations"</h3>
                {move || {
                    let locations = dashboard.with(|d| d.recent_locations.clone());
                    if locations.is_empty() {
                        return view! { <p class="empty-state">{NO_LOCATIONS}</p> }.into_any();
                    }
                    view! {
                        <ul class="recent-list">
                            {locations
                                .into_iter()
                                .map(|location| {
                                    let region = location.region().unwrap_or_default().to_string();
                                    view! {
                                        <li class="recent-item">
                                            <span class="recent-title">{location.name.clone()}</span>
                                            <span class="region">{region}</span>
                                            <span class="date">{format_date(&location.modified)}</span>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}
