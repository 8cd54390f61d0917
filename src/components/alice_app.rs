//! Alice App
//!
//! Root component for the story tool, mounted under `/alice`.

use leptos::prelude::*;
use reactive_stores::Store;

use super::characters::CharactersView;
use super::notifications::Notifications;
use super::sidebar::{section_from_hash, set_document_title, SectionPanel, Sidebar};
use super::story_dashboard::StoryDashboardView;
use super::story_list::StoryListView;
use crate::api::StoryKind;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::loader::Collection;
use crate::nav::{navigate, page_title, AliceSection, Section};
use crate::store::{store_apply_alice, AliceState, AliceStateStoreFields};

const INITIAL_LOAD: &[Collection] = &[
    Collection::Characters,
    Collection::Locations,
    Collection::Quests,
    Collection::Dialogues,
    Collection::StoryArcs,
    Collection::RelationshipGraph,
];

#[component]
pub fn AliceApp(config: AppConfig) -> impl IntoView {
    let freya_href = format!("{}/", config.api_base);
    let ctx = AppContext::new(config);
    let store = Store::new(AliceState { section: section_from_hash().unwrap_or_default(), ..Default::default() });
    provide_context(ctx);
    provide_context(store);

    ctx.refresh(INITIAL_LOAD, move |loaded| store_apply_alice(&store, loaded));

    Effect::new(move |_| set_document_title(&page_title("Alice", store.section().get())));

    let active = Signal::derive(move || store.section().get());
    let on_select = Callback::new(move |target: AliceSection| {
        let collections = navigate(&mut *store.section().write(), target);
        tracing::debug!(section = target.id(), "navigate");
        ctx.refresh(collections, move |loaded| store_apply_alice(&store, loaded));
    });

    view! {
        <div class="app-layout alice">
            <Sidebar brand="Alice" active=active on_select=on_select switch_to=("Planning Tool (Freya)", freya_href) />
            <main class="main-content">
                <SectionPanel section=AliceSection::Dashboard active=active>
                    <StoryDashboardView />
                </SectionPanel>
                <SectionPanel section=AliceSection::Characters active=active>
                    <CharactersView />
                </SectionPanel>
                <SectionPanel section=AliceSection::Locations active=active>
                    <StoryListView kind=StoryKind::Location />
                </SectionPanel>
                <SectionPanel section=AliceSection::Quests active=active>
                    <StoryListView kind=StoryKind::Quest />
                </SectionPanel>
                <SectionPanel section=AliceSection::Dialogues active=active>
                    <StoryListView kind=StoryKind::Dialogue />
                </SectionPanel>
                <SectionPanel section=AliceSection::StoryArcs active=active>
                    <StoryListView kind=StoryKind::StoryArc />
                </SectionPanel>
            </main>
            <Notifications />
        </div>
    }
}
