//! Modal Frame and Form Fields
//!
//! The modal closes on its close button, a backdrop click or Escape.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{AppContext, NoticeKind};
use crate::forms::{submit, EntityForm, SubmitOutcome};
use crate::loader::Loaded;

/// `(value, on_input)` pair bound to one String field of a form signal
macro_rules! field_binding {
    ($form:ident . $field:ident) => {
        (
            Signal::derive(move || $form.with(|f| f.$field.clone())),
            Callback::new(move |value: String| $form.update(|f| f.$field = value)),
        )
    };
}
pub(crate) use field_binding;

#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    let escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || escape.remove());

    view! {
        <div
            class="modal-backdrop"
            on:click=move |ev| {
                // Only clicks on the backdrop itself, not bubbling from the dialog
                if ev.target() == ev.current_target() {
                    on_close.run(());
                }
            }
        >
            <div class=if wide { "modal-dialog wide" } else { "modal-dialog" }>
                <div class="modal-header">
                    <h3>{move || title.get()}</h3>
                    <button type="button" class="close-modal" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}

/// Labelled text input or textarea
#[component]
pub fn Field(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] rows: Option<u32>,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let input = match rows {
        Some(rows) => view! {
            <textarea
                rows=rows
                placeholder=placeholder
                required=required
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        None => view! {
            <input
                type="text"
                placeholder=placeholder
                required=required
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            {input}
        </label>
    }
}

/// Labelled select over (value, label) pairs
#[component]
pub fn SelectField(
    label: &'static str,
    options: Vec<(String, String)>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(option, text)| {
                        let current = option.clone();
                        view! {
                            <option value=option selected=move || value.get() == current>
                                {text}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Options where value and label are the same
pub fn plain_options(values: &[&str]) -> Vec<(String, String)> {
    values.iter().map(|v| (v.to_string(), v.to_string())).collect()
}

/// Cancel and submit buttons at the bottom of a form
#[component]
pub fn FormActions(on_cancel: Callback<()>, #[prop(into)] submit_label: Signal<String>) -> impl IntoView {
    view! {
        <div class="form-actions">
            <button type="button" class="btn secondary" on:click=move |_| on_cancel.run(())>"Cancel"</button>
            <button type="submit" class="btn primary">{move || submit_label.get()}</button>
        </div>
    }
}

/// Submit a form in the background: alert on failure, else apply the
/// reloaded collections, notify and close
pub fn spawn_submit<F, A>(ctx: AppContext, form: F, apply: A, on_saved: Callback<()>)
where
    F: EntityForm + 'static,
    A: Fn(Loaded) + 'static,
{
    let api = ctx.api();
    spawn_local(async move {
        let submitted = submit(&api, &form).await;
        match submitted.outcome {
            SubmitOutcome::Saved(message) => {
                on_saved.run(());
                for loaded in submitted.reloaded {
                    apply(loaded);
                }
                ctx.notify(NoticeKind::Success, message);
            }
            SubmitOutcome::Invalid(message) | SubmitOutcome::Failed(message) => ctx.alert(&message),
        }
    });
}
