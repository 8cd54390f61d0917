//! Sidebar Component
//!
//! Section links for either tool, the mobile toggle and a link across to
//! the other tool.

use leptos::prelude::*;

use crate::nav::{section_classes, Section};

/// Section named by the URL hash (`#tasks`), if any
pub fn section_from_hash<S: Section>() -> Option<S> {
    let hash = web_sys::window()?.location().hash().ok()?;
    S::from_id(hash.trim_start_matches('#'))
}

/// Set the browser tab title
pub fn set_document_title(title: &str) {
    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        doc.set_title(title);
    }
}

#[component]
pub fn Sidebar<S: Section>(
    brand: &'static str,
    #[prop(into)] active: Signal<S>,
    on_select: Callback<S>,
    /// (label, href) of the other tool
    switch_to: (&'static str, String),
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (switch_label, switch_href) = switch_to;

    view! {
        <button
            class="sidebar-toggle"
            aria-label="Toggle navigation"
            on:click=move |_| set_open.update(|v| *v = !*v)
        >
            "☰"
        </button>
        <nav class=move || if open.get() { "sidebar open" } else { "sidebar" }>
            <div class="sidebar-brand">{brand}</div>
            <ul class="sidebar-links">
                {S::ALL
                    .iter()
                    .copied()
                    .map(|section| {
                        view! {
                            <li>
                                <a
                                    href=format!("#{}", section.id())
                                    data-section=section.id()
                                    class=move || section_classes(section, active.get()).0
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        set_open.set(false);
                                        on_select.run(section);
                                    }
                                >
                                    {section.title()}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <a class="sidebar-switch" href=switch_href>{switch_label}</a>
        </nav>
    }
}

/// Content area for one section; all sections stay mounted and only the
/// active one is shown
#[component]
pub fn SectionPanel<S: Section>(section: S, #[prop(into)] active: Signal<S>, children: Children) -> impl IntoView {
    view! {
        <section
            id=section.id()
            class=move || section_classes(section, active.get()).1
        >
            {children()}
        </section>
    }
}
