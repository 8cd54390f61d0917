//! Diagrams Section
//!
//! Mermaid diagram cards and the create modal. Rendered diagrams are shown
//! from their server URL; the source is shown when there is none.

use leptos::prelude::*;

use super::modal::{field_binding, spawn_submit, Field, FormActions, Modal, SelectField};
use crate::context::use_app_context;
use crate::forms::{DiagramForm, EntityForm, DIAGRAM_TYPES};
use crate::models::Diagram;
use crate::store::{store_apply_freya, use_freya_store, FreyaStateStoreFields};
use crate::views::{format_date, or_default};

fn type_label(value: &str) -> String {
    DIAGRAM_TYPES
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| or_default(value, "Diagram").to_string())
}

#[component]
fn DiagramCard(diagram: Diagram, on_open: Callback<Diagram>) -> impl IntoView {
    let name = diagram.name.clone();
    let kind = type_label(&diagram.diagram_type);
    let modified = format_date(&diagram.modified);
    let tags = diagram.tags.clone();
    let preview = if diagram.url.is_empty() {
        view! { <pre class="diagram-code">{diagram.code.clone()}</pre> }.into_any()
    } else {
        view! { <img class="diagram-image" src=diagram.url.clone() alt=diagram.name.clone() /> }.into_any()
    };

    view! {
        <div class="card diagram-card" on:click=move |_| on_open.run(diagram.clone())>
            <div class="card-header">
                <h3 class="card-title">{name}</h3>
                <span class="diagram-type">{kind}</span>
            </div>
            <div class="diagram-preview">{preview}</div>
            <div class="tag-list">
                {tags.into_iter().map(|tag| view! { <span class="tag">{tag}</span> }).collect_view()}
            </div>
            <div class="card-footer">{modified}</div>
        </div>
    }
}

#[component]
pub fn DiagramsView() -> impl IntoView {
    let store = use_freya_store();
    let modal = RwSignal::new(None::<DiagramForm>);
    let on_open = Callback::new(move |diagram: Diagram| modal.set(Some(DiagramForm::from_entity(&diagram))));
    let on_close = Callback::new(move |_: ()| modal.set(None));

    view! {
        <div class="section-header">
            <h2>"Diagrams"</h2>
            <button class="btn primary" on:click=move |_| modal.set(Some(DiagramForm::blank()))>"New Diagram"</button>
        </div>
        {move || {
            let diagrams = store.diagrams().get();
            if diagrams.is_empty() {
                return view! { <p class="empty-state">"No diagrams yet. Create your first diagram!"</p> }.into_any();
            }
            view! {
                <div class="card-grid">
                    {diagrams
                        .into_iter()
                        .map(|diagram| view! { <DiagramCard diagram=diagram on_open=on_open /> })
                        .collect_view()}
                </div>
            }
            .into_any()
        }}
        {move || modal.get().map(|initial| view! { <DiagramModal initial=initial on_close=on_close /> })}
    }
}

#[component]
pub(super) fn DiagramModal(initial: DiagramForm, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_freya_store();
    let heading = initial.heading();
    let form = RwSignal::new(initial);

    let (name, set_name) = field_binding!(form.name);
    let (diagram_type, set_diagram_type) = field_binding!(form.diagram_type);
    let (code, set_code) = field_binding!(form.code);
    let (tags, set_tags) = field_binding!(form.tags);

    let type_options = DIAGRAM_TYPES.iter().map(|(value, label)| (value.to_string(), label.to_string())).collect();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_submit(ctx, form.get_untracked(), move |loaded| store_apply_freya(&store, loaded), on_close);
    };

    view! {
        <Modal title=heading on_close=on_close wide=true>
            <form class="entity-form" on:submit=on_submit>
                <div class="form-row">
                    <Field label="Name" value=name on_input=set_name required=true />
                    <SelectField label="Type" options=type_options value=diagram_type on_change=set_diagram_type />
                </div>
                <Field label="Mermaid Code" value=code on_input=set_code rows=12 placeholder="graph TD; A-->B;" />
                <Field label="Tags" value=tags on_input=set_tags placeholder="Comma separated" />
                <FormActions on_cancel=on_close submit_label="Save Diagram".to_string() />
            </form>
        </Modal>
    }
}
