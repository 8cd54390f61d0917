//! Ideas Section
//!
//! Filterable idea cards and the create/edit modal with score sliders.

use leptos::prelude::*;

use super::filter_bar::{FilterSelect, SearchInput};
use super::modal::{field_binding, plain_options, spawn_submit, Field, FormActions, Modal, SelectField};
use crate::context::use_app_context;
use crate::filters::distinct_values;
use crate::forms::{EntityForm, IdeaForm, IDEA_CATEGORIES, IDEA_STATUSES};
use crate::models::{Idea, IdeaScore};
use crate::store::{store_apply_freya, use_freya_store, FreyaStateStoreFields};
use crate::views::{
    format_date, or_default, priority_band, priority_band_class, status_class, truncate_text, NO_IDEAS, NO_MATCHES,
};

#[component]
fn IdeaCard(idea: Idea, preview_chars: usize, on_open: Callback<Idea>) -> impl IntoView {
    let total = idea.score.total();
    let tags = idea.tags.clone();
    let summary = truncate_text(or_default(&idea.summary, &idea.description), preview_chars);
    let title = idea.title.clone();
    let status = idea.status.clone();
    let category = idea.category.clone();
    let modified = format_date(&idea.modified);

    view! {
        <div class="card idea-card" on:click=move |_| on_open.run(idea.clone())>
            <div class="card-header">
                <h3 class="card-title">{title}</h3>
                <span class=format!("score-badge {}", priority_band_class(total))>{total}</span>
            </div>
            <div class="card-meta">
                <span class=status_class(&status)>{or_default(&status, "No status").to_string()}</span>
                <span class="category">{category}</span>
            </div>
            <p class="card-summary">{summary}</p>
            <div class="tag-list">
                {tags.into_iter().map(|tag| view! { <span class="tag">{tag}</span> }).collect_view()}
            </div>
            <div class="card-footer">{modified}</div>
        </div>
    }
}

#[component]
pub fn IdeasView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_freya_store();
    let preview_chars = ctx.config().preview_chars;
    let modal = RwSignal::new(None::<IdeaForm>);

    let filtered = Memo::new(move |_| {
        let filter = store.idea_filter().get();
        store.ideas().with(|ideas| filter.apply(ideas).into_iter().cloned().collect::<Vec<_>>())
    });
    let categories = Signal::derive(move || store.ideas().with(|ideas| distinct_values(ideas, |i| i.category.as_str())));
    let statuses = Signal::derive(move || store.ideas().with(|ideas| distinct_values(ideas, |i| i.status.as_str())));

    let on_open = Callback::new(move |idea: Idea| modal.set(Some(IdeaForm::from_entity(&idea))));
    let on_close = Callback::new(move |_: ()| modal.set(None));

    view! {
        <div class="section-header">
            <h2>"Ideas"</h2>
            <button class="btn primary" on:click=move |_| modal.set(Some(IdeaForm::blank()))>"New Idea"</button>
        </div>
        <div class="filter-bar">
            <SearchInput
                placeholder="Search ideas..."
                value=Signal::derive(move || store.idea_filter().with(|f| f.search.clone()))
                on_input=Callback::new(move |v| store.idea_filter().write().search = v)
            />
            <FilterSelect
                all_label="All categories"
                options=categories
                value=Signal::derive(move || store.idea_filter().with(|f| f.category.clone()))
                on_change=Callback::new(move |v| store.idea_filter().write().category = v)
            />
            <FilterSelect
                all_label="All statuses"
                options=statuses
                value=Signal::derive(move || store.idea_filter().with(|f| f.status.clone()))
                on_change=Callback::new(move |v| store.idea_filter().write().status = v)
            />
        </div>
        {move || {
            if store.ideas().with(Vec::is_empty) {
                return view! { <p class="empty-state">{NO_IDEAS}</p> }.into_any();
            }
            let ideas = filtered.get();
            if ideas.is_empty() {
                return view! { <p class="empty-state">{NO_MATCHES}</p> }.into_any();
            }
            view! {
                <div class="card-grid">
                    {ideas
                        .into_iter()
                        .map(|idea| view! { <IdeaCard idea=idea preview_chars=preview_chars on_open=on_open /> })
                        .collect_view()}
                </div>
            }
            .into_any()
        }}
        {move || modal.get().map(|initial| view! { <IdeaModal initial=initial on_close=on_close /> })}
    }
}

#[component]
fn ScoreSlider(label: &'static str, form: RwSignal<IdeaForm>, field: fn(&mut IdeaScore) -> &mut u8) -> impl IntoView {
    let value = move || {
        form.with(|f| {
            let mut score = f.score;
            *field(&mut score)
        })
    };

    view! {
        <label class="score-slider">
            <span class="form-label">{label}</span>
            <input
                type="range"
                min="0"
                max=IdeaScore::MAX.to_string()
                step="1"
                prop:value=move || value().to_string()
                on:input=move |ev| {
                    if let Ok(v) = event_target_value(&ev).parse::<u8>() {
                        form.update(|f| *field(&mut f.score) = v.min(IdeaScore::MAX));
                    }
                }
            />
            <span class="score-value">{value}</span>
        </label>
    }
}

#[component]
pub(super) fn IdeaModal(initial: IdeaForm, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_freya_store();
    let heading = initial.heading();
    let submit_label = if initial.is_edit() { "Update Idea" } else { "Create Idea" };
    let form = RwSignal::new(initial);

    let (title, set_title) = field_binding!(form.title);
    let (summary, set_summary) = field_binding!(form.summary);
    let (description, set_description) = field_binding!(form.description);
    let (category, set_category) = field_binding!(form.category);
    let (tags, set_tags) = field_binding!(form.tags);
    let (status, set_status) = field_binding!(form.status);
    let (notes, set_notes) = field_binding!(form.notes);

    let sliders: [(&'static str, fn(&mut IdeaScore) -> &mut u8); 5] = [
        ("Impact", |s| &mut s.impact),
        ("Feasibility", |s| &mut s.feasibility),
        ("Originality", |s| &mut s.originality),
        ("Player Value", |s| &mut s.player_value),
        ("Alignment", |s| &mut s.alignment),
    ];
    let total = move || form.with(|f| f.score.total());

    let mut category_options = vec![(String::new(), "Select category".to_string())];
    category_options.extend(plain_options(IDEA_CATEGORIES));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_submit(ctx, form.get_untracked(), move |loaded| store_apply_freya(&store, loaded), on_close);
    };

    view! {
        <Modal title=heading on_close=on_close wide=true>
            <form class="entity-form" on:submit=on_submit>
                <Field label="Title" value=title on_input=set_title required=true />
                <Field label="Summary" value=summary on_input=set_summary />
                <Field label="Description" value=description on_input=set_description rows=4 />
                <div class="form-row">
                    <SelectField label="Category" options=category_options value=category on_change=set_category />
                    <SelectField label="Status" options=plain_options(IDEA_STATUSES) value=status on_change=set_status />
                </div>
                <Field label="Tags" value=tags on_input=set_tags placeholder="Comma separated" />
                <fieldset class="score-group">
                    <legend>"Score"</legend>
                    {sliders
                        .into_iter()
                        .map(|(label, field)| view! { <ScoreSlider label=label form=form field=field /> })
                        .collect_view()}
                    <div class="score-summary">
                        <span class="score-total">{move || format!("Total: {}", total())}</span>
                        <span class=move || priority_band_class(total())>{move || priority_band(total())}</span>
                    </div>
                </fieldset>
                <Field label="Notes" value=notes on_input=set_notes rows=3 />
                <FormActions on_cancel=on_close submit_label=submit_label.to_string() />
            </form>
        </Modal>
    }
}
