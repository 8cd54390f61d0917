//! Story Element Modal
//!
//! One create/edit form for characters, locations, quests, dialogues and
//! story arcs. Characters also carry a faction, locations a region.

use leptos::prelude::*;

use super::modal::{field_binding, spawn_submit, Field, FormActions, Modal};
use crate::api::StoryKind;
use crate::context::use_app_context;
use crate::forms::{EntityForm, StoryForm};
use crate::store::{store_apply_alice, use_alice_store};

fn detail_label(kind: StoryKind) -> Option<&'static str> {
    match kind {
        StoryKind::Character => Some("Faction"),
        StoryKind::Location => Some("Region"),
        _ => None,
    }
}

#[component]
pub fn StoryModal(initial: StoryForm, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_alice_store();
    let heading = initial.heading();
    let submit_label = format!("Save {}", initial.kind.noun());
    let detail = detail_label(initial.kind);
    let form = RwSignal::new(initial);

    let (name, set_name) = field_binding!(form.name);
    let (description, set_description) = field_binding!(form.description);
    let (detail_value, set_detail) = field_binding!(form.detail);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_submit(ctx, form.get_untracked(), move |loaded| store_apply_alice(&store, loaded), on_close);
    };

    view! {
        <Modal title=heading on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <Field label="Name" value=name on_input=set_name required=true />
                {detail.map(|label| view! { <Field label=label value=detail_value on_input=set_detail /> })}
                <Field label="Description" value=description on_input=set_description rows=5 />
                <FormActions on_cancel=on_close submit_label=submit_label />
            </form>
        </Modal>
    }
}
