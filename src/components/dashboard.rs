//! Freya Dashboard
//!
//! Stat cards, the progress chart, recent ideas and tasks in progress.

use leptos::prelude::*;

use super::chart::ProgressChart;
use super::diagrams::DiagramModal;
use super::ideas::IdeaModal;
use super::tasks::TaskModal;
use crate::context::use_app_context;
use crate::forms::{DiagramForm, IdeaForm, TaskForm};
use crate::models::{Idea, Task};
use crate::store::use_freya_store;
use crate::views::{
    format_date, freya_dashboard, FreyaDashboard, or_default, status_class, task_priority_class, truncate_text, NO_IDEAS,
    NO_TASKS_IN_PROGRESS,
};

#[component]
fn StatCard(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-value">{move || value.get()}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}

#[component]
fn RecentIdea(idea: Idea, preview_chars: usize) -> impl IntoView {
    view! {
        <li class="recent-item">
            <div class="recent-title">{idea.title.clone()}</div>
            <div class="recent-summary">{truncate_text(or_default(&idea.summary, &idea.description), preview_chars)}</div>
            <div class="recent-meta">
                <span class=status_class(&idea.status)>{idea.status.clone()}</span>
                <span class="score-total">{format!("Score {}", idea.score.total())}</span>
                <span class="date">{format_date(&idea.modified)}</span>
            </div>
        </li>
    }
}

#[component]
fn ActiveTask(task: Task) -> impl IntoView {
    view! {
        <li class="recent-item">
            <div class="recent-title">{task.title.clone()}</div>
            <div class="recent-meta">
                <span class=task_priority_class(&task.priority)>{or_default(&task.priority, "No priority").to_string()}</span>
                <span class="milestone">{task.milestone.clone()}</span>
                <span class="date">{format_date(&task.modified)}</span>
            </div>
        </li>
    }
}

#[component]
pub fn FreyaDashboardView() -> impl IntoView {
    let config = use_app_context().config();
    let store = use_freya_store();
    let limit = config.dashboard_limit;
    let preview_chars = config.preview_chars;

    let dashboard = Memo::new(move |_| freya_dashboard(&store.read(), limit));

    let stat = move |f: fn(&FreyaDashboard) -> String| Signal::derive(move || dashboard.with(f));

    let new_idea = RwSignal::new(false);
    let new_task = RwSignal::new(false);
    let new_diagram = RwSignal::new(false);

    view! {
        <div class="section-header">
            <h2>"Dashboard"</h2>
            <div class="quick-actions">
                <button class="btn primary" on:click=move |_| new_idea.set(true)>"New Idea"</button>
                <button class="btn primary" on:click=move |_| new_task.set(true)>"New Task"</button>
                <button class="btn primary" on:click=move |_| new_diagram.set(true)>"New Diagram"</button>
            </div>
        </div>
        <div class="stats-grid">
            <StatCard label="Ideas" value=stat(|d| d.total_ideas.to_string()) />
            <StatCard label="Tasks" value=stat(|d| d.total_tasks.to_string()) />
            <StatCard label="Completed" value=stat(|d| d.done_tasks.to_string()) />
            <StatCard label="Progress" value=stat(|d| format!("{}%", d.progress)) />
            <StatCard label="Story Elements" value=stat(|d| d.story_elements.to_string()) />
        </div>

        <ProgressChart />

        <div class="dashboard-columns">
            <div class="dashboard-panel">
                <h3>"Recent Ideas"</h3>
                {move || {
                    let ideas = dashboard.with(|d| d.recent_ideas.clone());
                    if ideas.is_empty() {
                        view! { <p class="empty-state">{NO_IDEAS}</p> }.into_any()
                    } else {
                        view! {
                            <ul class="recent-list">
                                {ideas
                                    .into_iter()
                                    .map(|idea| view! { <RecentIdea idea=idea preview_chars=preview_chars /> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }
                }}
            </div>
            <div class="dashboard-panel">
                <h3>"In Progress"</h3>
                {move || {
                    let tasks = dashboard.with(|d| d.in_progress.clone());
                    if tasks.is_empty() {
                        view! { <p class="empty-state">{NO_TASKS_IN_PROGRESS}</p> }.into_any()
                    } else {
                        view! {
                            <ul class="recent-list">
                                {tasks.into_iter().map(|task| view! { <ActiveTask task=task /> }).collect_view()}
                            </ul>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>

        <Show when=move || new_idea.get()>
            <IdeaModal initial=IdeaForm::blank() on_close=Callback::new(move |_: ()| new_idea.set(false)) />
        </Show>
        <Show when=move || new_task.get()>
            <TaskModal initial=TaskForm::blank() on_close=Callback::new(move |_: ()| new_task.set(false)) />
        </Show>
        <Show when=move || new_diagram.get()>
            <DiagramModal initial=DiagramForm::blank() on_close=Callback::new(move |_: ()| new_diagram.set(false)) />
        </Show>
    }
}
