//! Documentation Section
//!
//! PRD document list with search, and a reader panel for the open document.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::filter_bar::SearchInput;
use crate::context::use_app_context;
use crate::markdown::load_document;
use crate::models::PrdDocument;
use crate::store::{use_freya_store, DocView, FreyaStateStoreFields};
use crate::views::{format_date, or_default, sort_by_modified, truncate_text, NO_DOCS, NO_MATCHES};

#[component]
fn DocCard(doc: PrdDocument, preview_chars: usize, on_open: Callback<PrdDocument>) -> impl IntoView {
    let title = doc.title.clone();
    let path = doc.file_path.clone();
    let summary = truncate_text(or_default(&doc.summary, "No description"), preview_chars);
    let modified = format_date(&doc.modified);

    view! {
        <div class="card doc-card" on:click=move |_| on_open.run(doc.clone())>
            <h3 class="card-title">{title}</h3>
            <p class="card-summary">{summary}</p>
            <div class="card-meta">
                <span class="doc-path">{path}</span>
                <span class="date">{modified}</span>
            </div>
        </div>
    }
}

#[component]
fn DocReader(open: DocView, on_close: Callback<()>) -> impl IntoView {
    let DocView { doc, html } = open;

    view! {
        <div class="doc-reader">
            <div class="doc-reader-header">
                <button class="btn secondary" on:click=move |_| on_close.run(())>"← Back"</button>
                <h2>{doc.title}</h2>
            </div>
            {match html {
                Some(html) => view! { <article class="doc-content markdown-body" inner_html=html></article> }.into_any(),
                None => view! { <p class="loading">"Loading document..."</p> }.into_any(),
            }}
        </div>
    }
}

#[component]
pub fn DocsView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_freya_store();
    let preview_chars = ctx.config().preview_chars;

    let filtered = Memo::new(move |_| {
        let filter = store.doc_filter().get();
        store.prd_docs().with(|docs| sort_by_modified(docs.iter().filter(|d| filter.matches(d))))
    });

    let on_open = Callback::new(move |doc: PrdDocument| {
        *store.open_doc().write() = Some(DocView { doc: doc.clone(), html: None });
        let api = ctx.api();
        spawn_local(async move {
            match load_document(&api, doc).await {
                Ok(loaded) => *store.open_doc().write() = Some(loaded),
                Err(message) => {
                    *store.open_doc().write() = None;
                    ctx.alert(&message);
                }
            }
        });
    });
    let on_close = Callback::new(move |_: ()| *store.open_doc().write() = None);

    view! {
        {move || match store.open_doc().get() {
            Some(open) => view! { <DocReader open=open on_close=on_close /> }.into_any(),
            None => {
                view! {
                    <div class="section-header">
                        <h2>"Documentation"</h2>
                    </div>
                    <div class="filter-bar">
                        <SearchInput
                            placeholder="Search documents..."
                            value=Signal::derive(move || store.doc_filter().with(|f| f.search.clone()))
                            on_input=Callback::new(move |v| store.doc_filter().write().search = v)
                        />
                    </div>
                    {move || {
                        if store.prd_docs().with(Vec::is_empty) {
                            return view! { <p class="empty-state">{NO_DOCS}</p> }.into_any();
                        }
                        let docs = filtered.get();
                        if docs.is_empty() {
                            return view! { <p class="empty-state">{NO_MATCHES}</p> }.into_any();
                        }
                        view! {
                            <div class="card-grid">
                                {docs
                                    .into_iter()
                                    .map(|doc| view! { <DocCard doc=doc preview_chars=preview_chars on_open=on_open /> })
                                    .collect_view()}
                            </div>
                        }
                        .into_any()
                    }}
                }
                .into_any()
            }
        }}
    }
}
