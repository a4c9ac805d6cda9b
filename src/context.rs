//! Application Context
//!
//! Page configuration and the toast queue, provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use healthtant_feed::{FeedError, PageConfig};

/// How long a toast stays on screen
const NOTICE_MS: u32 = 3_000;

/// Transient, non-blocking message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub message: String,
}

/// App-wide state provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Server-embedded page settings (replaces templated `window` globals)
    config: StoredValue<PageConfig>,
    /// Toasts currently shown - read
    pub notices: ReadSignal<Vec<Notice>>,
    /// Toasts currently shown - write
    set_notices: WriteSignal<Vec<Notice>>,
    next_notice_id: StoredValue<u32>,
}

impl AppContext {
    pub fn new(config: PageConfig) -> Self {
        let (notices, set_notices) = signal(Vec::<Notice>::new());
        Self {
            config: StoredValue::new(config),
            notices,
            set_notices,
            next_notice_id: StoredValue::new(0),
        }
    }

    pub fn config(&self) -> PageConfig {
        self.config.get_value()
    }

    /// Show a toast that removes itself after a few seconds
    pub fn notify(&self, message: impl Into<String>) {
        let id = self.next_notice_id.get_value();
        self.next_notice_id.update_value(|v| *v = v.wrapping_add(1));
        let message = message.into();
        self.set_notices.update(|n| n.push(Notice { id, message }));

        let set_notices = self.set_notices;
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_MS).await;
            set_notices.update(|n| n.retain(|notice| notice.id != id));
        });
    }

    /// Log an error and surface it as a toast
    pub fn report(&self, err: &FeedError) {
        if err.is_validation() {
            log::info!("[APP] Rejected input: {}", err);
        } else {
            log::error!("[APP] {}", err);
        }
        self.notify(err.user_message());
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
