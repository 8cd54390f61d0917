//! Tasks Section
//!
//! Kanban board with mouse drag-and-drop between status columns, task
//! filters and the create/edit modal.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_mouseup, make_on_mousedown, make_on_mouseleave, make_on_target_mouseenter, DndSignals};

use super::filter_bar::{FilterSelect, SearchInput};
use super::modal::{field_binding, plain_options, spawn_submit, Field, FormActions, Modal, SelectField};
use crate::context::{use_app_context, NoticeKind};
use crate::filters::distinct_values;
use crate::forms::{EntityForm, TaskForm, TASK_PRIORITIES, TASK_TYPES};
use crate::kanban::drop_task;
use crate::models::{Task, TaskStatus};
use crate::store::{store_apply_freya, store_set_task_status, use_freya_store, FreyaStateStoreFields};
use crate::views::{group_by_status, or_default, task_priority_class, truncate_text};

type TaskDnd = DndSignals<String, TaskStatus>;

#[component]
fn TaskCard(task: Task, dnd: TaskDnd, preview_chars: usize, on_open: Callback<Task>) -> impl IntoView {
    let id = task.id.clone().unwrap_or_default();
    let dragged_id = id.clone();
    let data_id = id.clone();
    let title = task.title.clone();
    let task_type = task.task_type.clone();
    let milestone = task.milestone.clone();
    let estimate = task.estimated_time.clone();
    let priority_class = format!("priority-badge {}", task_priority_class(&task.priority));
    let priority = or_default(&task.priority, "None").to_string();
    let description = truncate_text(&task.description, preview_chars);

    view! {
        <div
            class=move || if dnd.is_dragging(&dragged_id) { "card task-card dragging" } else { "card task-card" }
            data-task-id=data_id
            on:mousedown=make_on_mousedown(dnd, id)
            on:click=move |_| {
                if !dnd.just_dropped() {
                    on_open.run(task.clone());
                }
            }
        >
            <div class="card-header">
                <h4 class="card-title">{title}</h4>
                <span class=priority_class>{priority}</span>
            </div>
            <p class="card-summary">{description}</p>
            <div class="card-meta">
                <span class="task-type">{task_type}</span>
                <span class="milestone">{milestone}</span>
                <span class="estimate">{estimate}</span>
            </div>
        </div>
    }
}

#[component]
fn KanbanColumn(
    status: TaskStatus,
    dnd: TaskDnd,
    #[prop(into)] cards: Signal<Vec<Task>>,
    preview_chars: usize,
    on_open: Callback<Task>,
) -> impl IntoView {
    view! {
        <div
            class=move || if dnd.is_target(&status) { "kanban-column drop-target" } else { "kanban-column" }
            data-status=status.as_str()
            on:mouseenter=make_on_target_mouseenter(dnd, status)
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <div class="column-header">
                <h3>{status.label()}</h3>
                <span class="column-count">{move || cards.with(Vec::len)}</span>
            </div>
            <div class="column-cards">
                <For
                    each=move || cards.get()
                    key=|task| (task.id.clone(), task.status.clone(), task.modified.clone(), task.title.clone())
                    children=move |task| {
                        view! { <TaskCard task=task dnd=dnd preview_chars=preview_chars on_open=on_open /> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
pub fn TasksView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_freya_store();
    let preview_chars = ctx.config().preview_chars;
    let modal = RwSignal::new(None::<TaskForm>);
    let dnd = TaskDnd::new();

    // Optimistic move, then one PUT and a reload whatever it answered
    bind_global_mouseup(dnd, move |task_id: String, status: TaskStatus| {
        store_set_task_status(&store, &task_id, status);
        let api = ctx.api();
        spawn_local(async move {
            let dropped = drop_task(&api, &task_id, status).await;
            for loaded in dropped.reloaded {
                store_apply_freya(&store, loaded);
            }
            let kind = if dropped.notice.is_error() { NoticeKind::Error } else { NoticeKind::Success };
            ctx.notify(kind, dropped.notice.message());
        });
    });

    let columns = Memo::new(move |_| {
        let filter = store.task_filter().get();
        store.tasks().with(|tasks| group_by_status(filter.apply(tasks)))
    });
    let types = Signal::derive(move || store.tasks().with(|tasks| distinct_values(tasks, |t| t.task_type.as_str())));
    let milestones = Signal::derive(move || store.tasks().with(|tasks| distinct_values(tasks, |t| t.milestone.as_str())));

    let on_open = Callback::new(move |task: Task| modal.set(Some(TaskForm::from_entity(&task))));
    let on_close = Callback::new(move |_: ()| modal.set(None));

    view! {
        <div class="section-header">
            <h2>"Tasks"</h2>
            <button class="btn primary" on:click=move |_| modal.set(Some(TaskForm::blank()))>"New Task"</button>
        </div>
        <div class="filter-bar">
            <SearchInput
                placeholder="Search tasks..."
                value=Signal::derive(move || store.task_filter().with(|f| f.search.clone()))
                on_input=Callback::new(move |v| store.task_filter().write().search = v)
            />
            <FilterSelect
                all_label="All types"
                options=types
                value=Signal::derive(move || store.task_filter().with(|f| f.task_type.clone()))
                on_change=Callback::new(move |v| store.task_filter().write().task_type = v)
            />
            <FilterSelect
                all_label="All milestones"
                options=milestones
                value=Signal::derive(move || store.task_filter().with(|f| f.milestone.clone()))
                on_change=Callback::new(move |v| store.task_filter().write().milestone = v)
            />
        </div>
        <div class=move || if dnd.is_active() { "kanban-board dragging" } else { "kanban-board" }>
            {TaskStatus::ALL
                .into_iter()
                .map(|status| {
                    let cards = Signal::derive(move || {
                        columns.with(|cols| {
                            cols.iter().find(|(s, _)| *s == status).map(|(_, cards)| cards.clone()).unwrap_or_default()
                        })
                    });
                    view! {
                        <KanbanColumn status=status dnd=dnd cards=cards preview_chars=preview_chars on_open=on_open />
                    }
                })
                .collect_view()}
        </div>
        {move || modal.get().map(|initial| view! { <TaskModal initial=initial on_close=on_close /> })}
    }
}

#[component]
pub(super) fn TaskModal(initial: TaskForm, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_freya_store();
    let heading = initial.heading();
    let submit_label = if initial.is_edit() { "Update Task" } else { "Create Task" };
    let form = RwSignal::new(initial);

    let (title, set_title) = field_binding!(form.title);
    let (task_type, set_task_type) = field_binding!(form.task_type);
    let (estimated_time, set_estimated_time) = field_binding!(form.estimated_time);
    let (milestone, set_milestone) = field_binding!(form.milestone);
    let (priority, set_priority) = field_binding!(form.priority);
    let (status, set_status) = field_binding!(form.status);
    let (description, set_description) = field_binding!(form.description);
    let (objective, set_objective) = field_binding!(form.objective);
    let (acceptance_criteria, set_acceptance_criteria) = field_binding!(form.acceptance_criteria);
    let (implementation_notes, set_implementation_notes) = field_binding!(form.implementation_notes);
    let (dependencies, set_dependencies) = field_binding!(form.dependencies);
    let (testing_plan, set_testing_plan) = field_binding!(form.testing_plan);
    let (next_steps, set_next_steps) = field_binding!(form.next_steps);

    let mut status_options = vec![(String::new(), "Backlog (default)".to_string())];
    status_options.extend(TaskStatus::ALL.iter().map(|s| (s.as_str().to_string(), s.label().to_string())));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_submit(ctx, form.get_untracked(), move |loaded| store_apply_freya(&store, loaded), on_close);
    };

    view! {
        <Modal title=heading on_close=on_close wide=true>
            <form class="entity-form" on:submit=on_submit>
                <Field label="Title" value=title on_input=set_title required=true />
                <div class="form-row">
                    <SelectField label="Type" options=plain_options(TASK_TYPES) value=task_type on_change=set_task_type />
                    <SelectField label="Priority" options=plain_options(TASK_PRIORITIES) value=priority on_change=set_priority />
                    <SelectField label="Status" options=status_options value=status on_change=set_status />
                </div>
                <div class="form-row">
                    <Field label="Milestone" value=milestone on_input=set_milestone />
                    <Field label="Estimated Time" value=estimated_time on_input=set_estimated_time placeholder="e.g. 2 days" />
                </div>
                <Field label="Description" value=description on_input=set_description rows=3 />
                <Field label="Objective" value=objective on_input=set_objective rows=2 />
                <Field label="Acceptance Criteria" value=acceptance_criteria on_input=set_acceptance_criteria rows=3 />
                <Field label="Implementation Notes" value=implementation_notes on_input=set_implementation_notes rows=3 />
                <Field label="Dependencies" value=dependencies on_input=set_dependencies rows=2 />
                <Field label="Testing Plan" value=testing_plan on_input=set_testing_plan rows=2 />
                <Field label="Next Steps" value=next_steps on_input=set_next_steps rows=2 />
                <FormActions on_cancel=on_close submit_label=submit_label.to_string() />
            </form>
        </Modal>
    }
}
