//! Characters Section

use leptos::prelude::*;

use super::filter_bar::{FilterSelect, SearchInput};
use super::story_modal::StoryModal;
use crate::api::StoryKind;
use crate::context::use_app_context;
use crate::filters::distinct_values;
use crate::forms::StoryForm;
use crate::models::Character;
use crate::store::{use_alice_store, AliceStateStoreFields};
use crate::views::{initials, or_default, string_to_color, truncate_text, NO_CHARACTERS, NO_MATCHES};

#[component]
fn CharacterCard(character: Character, preview_chars: usize, on_open: Callback<Character>) -> impl IntoView {
    let name = character.name.clone();
    let avatar_style = format!("background-color: {};", string_to_color(&character.name));
    let avatar = initials(&character.name);
    let faction = or_default(&character.faction, "Unaligned").to_string();
    let description = truncate_text(&character.description, preview_chars);

    view! {
        <div class="card character-card" on:click=move |_| on_open.run(character.clone())>
            <div class="avatar" style=avatar_style>{avatar}</div>
            <div class="character-info">
                <h3 class="card-title">{name}</h3>
                <span class="faction">{faction}</span>
                <p class="card-summary">{description}</p>
            </div>
        </div>
    }
}

#[component]
pub fn CharactersView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_alice_store();
    let preview_chars = ctx.config().preview_chars;
    let modal = RwSignal::new(None::<StoryForm>);

    let filtered = Memo::new(move |_| {
        let filter = store.character_filter().get();
        store.characters().with(|all| all.iter().filter(|c| filter.matches(c)).cloned().collect::<Vec<_>>())
    });
    let factions =
        Signal::derive(move || store.characters().with(|all| distinct_values(all, |c| c.faction.as_str())));

    let on_open = Callback::new(move |character: Character| modal.set(Some(StoryForm::from_character(&character))));
    let on_close = Callback::new(move |_: ()| modal.set(None));

    view! {
        <div class="section-header">
            <h2>"Characters"</h2>
            <button class="btn primary" on:click=move |_| modal.set(Some(StoryForm::blank(StoryKind::Character)))>
                "New Character"
            </button>
        </div>
        <div class="filter-bar">
            <SearchInput
                placeholder="Search characters..."
                value=Signal::derive(move || store.character_filter().with(|f| f.search.clone()))
                on_input=Callback::new(move |v| store.character_filter().write().search = v)
            />
            <FilterSelect
                all_label="All factions"
                options=factions
                value=Signal::derive(move || store.character_filter().with(|f| f.faction.clone()))
                on_change=Callback::new(move |v| store.character_filter().write().faction = v)
            />
        </div>
        {move || {
            if store.characters().with(Vec::is_empty) {
                return view! { <p class="empty-state">{NO_CHARACTERS}</p> }.into_any();
            }
            let characters = filtered.get();
            if characters.is_empty() {
                return view! { <p class="empty-state">{NO_MATCHES}</p> }.into_any();
            }
            view! {
                <div class="card-grid">
                    {characters
                        .into_iter()
                        .map(|character| {
                            view! { <CharacterCard character=character preview_chars=preview_chars on_open=on_open /> }
                        })
                        .collect_view()}
                </div>
            }
            .into_any()
        }}
        {move || modal.get().map(|initial| view! { <StoryModal initial=initial on_close=on_close /> })}
    }
}
