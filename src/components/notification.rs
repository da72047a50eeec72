//! Notification Component
//!
//! Banner for the store's error slot. Dismisses itself after a few seconds.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::store::{store_clear_error, use_app_store, AppStateStoreFields};

const DISMISS_AFTER_MS: u32 = 5_000;

#[component]
pub fn Notification() -> impl IntoView {
    let store = use_app_store();

    Effect::new(move |_| {
        let Some(shown) = store.error().get() else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            // A newer message gets its own full timeout
            if store.error().get_untracked().as_deref() == Some(shown.as_str()) {
                store_clear_error(&store);
            }
        });
    });

    view! {
        {move || store.error().get().map(|message| view! {
            <div class="notification error" on:click=move |_| store_clear_error(&store)>
                {message}
            </div>
        })}
    }
}
