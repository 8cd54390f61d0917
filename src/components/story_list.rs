//! Story Element Lists
//!
//! Locations, quests, dialogues and story arcs share one searchable list.

use leptos::prelude::*;

use super::filter_bar::SearchInput;
use super::story_modal::StoryModal;
use crate::api::StoryKind;
use crate::context::use_app_context;
use crate::forms::{EntityForm, StoryForm};
use crate::models::StoryElement;
use crate::store::{use_alice_store, AliceStateStoreFields};
use crate::views::{empty_story_message, format_date, truncate_text, NO_MATCHES};

#[component]
fn StoryCard(element: StoryElement, preview_chars: usize, on_open: Callback<StoryElement>) -> impl IntoView {
    let name = element.name.clone();
    let region = element.region().map(str::to_string);
    let description = truncate_text(&element.description, preview_chars);
    let modified = format_date(&element.modified);

    view! {
        <div class="card story-card" on:click=move |_| on_open.run(element.clone())>
            <h3 class="card-title">{name}</h3>
            {region.map(|region| view! { <span class="region">{region}</span> })}
            <p class="card-summary">{description}</p>
            <div class="card-footer">{modified}</div>
        </div>
    }
}

#[component]
pub fn StoryListView(kind: StoryKind) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_alice_store();
    let preview_chars = ctx.config().preview_chars;
    let modal = RwSignal::new(None::<StoryForm>);

    let filtered = Memo::new(move |_| {
        let filter = store.story_filter().get();
        let state = store.read();
        state.elements(kind).iter().filter(|e| filter.matches(e)).cloned().collect::<Vec<_>>()
    });
    let is_empty = Memo::new(move |_| store.read().elements(kind).is_empty());

    let on_open = Callback::new(move |element: StoryElement| modal.set(Some(StoryForm::from_element(kind, &element))));
    let on_close = Callback::new(move |_: ()| modal.set(None));

    view! {
        <div class="section-header">
            <h2>{kind.plural_title()}</h2>
            <button class="btn primary" on:click=move |_| modal.set(Some(StoryForm::blank(kind)))>
                {StoryForm::blank(kind).heading()}
            </button>
        </div>
        <div class="filter-bar">
            <SearchInput
                placeholder="Search..."
                value=Signal::derive(move || store.story_filter().with(|f| f.search.clone()))
                on_input=Callback::new(move |v| store.story_filter().write().search = v)
            />
        </div>
        {move || {
            if is_empty.get() {
                return view! { <p class="empty-state">{empty_story_message(kind)}</p> }.into_any();
            }
            let elements = filtered.get();
            if elements.is_empty() {
                return view! { <p class="empty-state">{NO_MATCHES}</p> }.into_any();
            }
            view! {
                <div class="card-grid">
                    {elements
                        .into_iter()
                        .map(|element| view! { <StoryCard element=element preview_chars=preview_chars on_open=on_open /> })
                        .collect_view()}
                </div>
            }
            .into_any()
        }}
        {move || modal.get().map(|initial| view! { <StoryModal initial=initial on_close=on_close /> })}
    }
}
