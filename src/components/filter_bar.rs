//! Filter Widgets
//!
//! Search box and select used above every filterable list. Each event
//! writes the filter straight into the store, so lists recompute at once.

use leptos::prelude::*;

use crate::filters::ALL;

#[component]
pub fn SearchInput(
    placeholder: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <input
            type="search"
            class="filter-search"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        />
    }
}

/// Select with an "all" entry followed by the values present in the data
#[component]
pub fn FilterSelect(
    all_label: &'static str,
    #[prop(into)] options: Signal<Vec<String>>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <select
            class="filter-select"
            prop:value=move || value.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value=ALL>{all_label}</option>
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|option| {
                        let selected = value.with(|v| *v == option);
                        let label = option.clone();
                        view! { <option value=option selected=selected>{label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}
