//! Application Context
//!
//! Shared handles provided via Leptos Context API: the HTTP backend, page
//! config and the notification list.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpBackend;
use crate::config::AppConfig;
use crate::loader::{load_all, Collection, Loaded};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notification success",
            NoticeKind::Error => "notification error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NoticeKind::Success => "✔",
            NoticeKind::Error => "✖",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<HttpBackend>,
    config: StoredValue<AppConfig>,
    /// Toasts currently on screen
    pub notices: RwSignal<Vec<Notice>>,
    next_notice: StoredValue<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            api: StoredValue::new(HttpBackend::new(&config)),
            config: StoredValue::new(config),
            notices: RwSignal::new(Vec::new()),
            next_notice: StoredValue::new(0),
        }
    }

    /// Backend handle for spawned requests
    pub fn api(&self) -> HttpBackend {
        self.api.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Load collections in the background and hand each result to `apply`
    pub fn refresh<A>(&self, collections: &'static [Collection], apply: A)
    where
        A: Fn(Loaded) + 'static,
    {
        if collections.is_empty() {
            return;
        }
        let api = self.api();
        spawn_local(async move {
            for loaded in load_all(&api, collections).await {
                apply(loaded);
            }
        });
    }

    /// Show a toast that removes itself after the configured delay
    pub fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        let id = self.next_notice.get_value();
        self.next_notice.set_value(id.wrapping_add(1));
        self.notices.update(|list| list.push(Notice { id, kind, message: message.into() }));

        let notices = self.notices;
        let delay = self.config.with_value(|c| c.notification_ms);
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            notices.update(|list| list.retain(|n| n.id != id));
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }

    /// Blocking browser alert
    pub fn alert(&self, message: &str) {
        tracing::warn!(message, "alert");
        gloo::dialogs::alert(message);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
