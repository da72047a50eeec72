//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::{ApiError, AppClient};
use crate::store::{store_reset_session, store_set_error, AppStore};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload data from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload data from the backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Whether a usable access token is stored - read
    pub signed_in: ReadSignal<bool>,
    /// Whether a usable access token is stored - write
    set_signed_in: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        signed_in: (ReadSignal<bool>, WriteSignal<bool>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            signed_in: signed_in.0,
            set_signed_in: signed_in.1,
        }
    }

    /// Trigger a reload of projects and issues
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn set_signed_in(&self, value: bool) {
        self.set_signed_in.set(value);
    }

    /// Show a failed action to the user; a lost session sends them back to login
    pub fn report(&self, store: &AppStore, action: &str, error: ApiError) {
        if error.is_unauthorized() {
            store_reset_session(store);
            self.set_signed_in(false);
        }
        store_set_error(store, format!("{}: {}", action, error));
    }
}

/// Get the API client from context
pub fn use_api() -> AppClient {
    expect_context::<AppClient>()
}
