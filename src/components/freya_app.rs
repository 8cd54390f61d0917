//! Freya App
//!
//! Root component for the planning tool: provides the store and context,
//! loads every collection once, then refreshes per section on navigation.

use leptos::prelude::*;
use reactive_stores::Store;

use super::dashboard::FreyaDashboardView;
use super::diagrams::DiagramsView;
use super::docs::DocsView;
use super::ideas::IdeasView;
use super::images::ImagesView;
use super::notifications::Notifications;
use super::sidebar::{section_from_hash, set_document_title, SectionPanel, Sidebar};
use super::tasks::TasksView;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::loader::Collection;
use crate::nav::{navigate, page_title, FreyaSection, Section};
use crate::store::{store_apply_freya, FreyaState, FreyaStateStoreFields};

const INITIAL_LOAD: &[Collection] = &[
    Collection::Ideas,
    Collection::Tasks,
    Collection::TaskMetrics,
    Collection::Characters,
    Collection::PrdDocs,
    Collection::Diagrams,
    Collection::Images,
];

#[component]
pub fn FreyaApp(config: AppConfig) -> impl IntoView {
    let alice_href = format!("{}/", config.alice_base);
    let ctx = AppContext::new(config);
    let store = Store::new(FreyaState { section: section_from_hash().unwrap_or_default(), ..Default::default() });
    provide_context(ctx);
    provide_context(store);

    ctx.refresh(INITIAL_LOAD, move |loaded| store_apply_freya(&store, loaded));

    Effect::new(move |_| set_document_title(&page_title("Freya", store.section().get())));

    let active = Signal::derive(move || store.section().get());
    let on_select = Callback::new(move |target: FreyaSection| {
        let collections = navigate(&mut *store.section().write(), target);
        tracing::debug!(section = target.id(), "navigate");
        ctx.refresh(collections, move |loaded| store_apply_freya(&store, loaded));
    });

    view! {
        <div class="app-layout freya">
            <Sidebar brand="Freya" active=active on_select=on_select switch_to=("Story Tool (Alice)", alice_href) />
            <main class="main-content">
                <SectionPanel section=FreyaSection::Dashboard active=active>
                    <FreyaDashboardView />
                </SectionPanel>
                <SectionPanel section=FreyaSection::Ideas active=active>
                    <IdeasView />
                </SectionPanel>
                <SectionPanel section=FreyaSection::Tasks active=active>
                    <TasksView />
                </SectionPanel>
                <SectionPanel section=FreyaSection::Docs active=active>
                    <DocsView />
                </SectionPanel>
                <SectionPanel section=FreyaSection::Diagrams active=active>
                    <DiagramsView />
                </SectionPanel>
                <SectionPanel section=FreyaSection::Images active=active>
                    <ImagesView />
                </SectionPanel>
            </main>
            <Notifications />
        </div>
    }
}
