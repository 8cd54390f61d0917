//! Toast notifications

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Notifications() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="notification-stack">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class()>
                            <span class="notification-icon">{notice.kind.icon()}</span>
                            <div class="notification-message">{notice.message}</div>
                            <button class="notification-close" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
