//! Delete Confirm Button Component
//!
//! Two-step delete for cards and list rows: the first click arms the
//! button, the second runs the action. Moving the pointer away disarms it.

use leptos::prelude::*;

#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
    /// Shown next to the armed button
    #[prop(optional, into)]
    prompt: Option<String>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let prompt = prompt.unwrap_or_else(|| "Excluir?".to_string());

    let class = move || {
        if armed.get() {
            format!("{} armed", button_class)
        } else {
            button_class.clone()
        }
    };

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if armed.get_untracked() {
            armed.set(false);
            on_confirm.run(());
        } else {
            armed.set(true);
        }
    };

    // Lives inside draggable cards; a press here must not start a drag
    view! {
        <span
            class="delete-confirm"
            on:mousedown=|ev: web_sys::MouseEvent| ev.stop_propagation()
            on:mouseleave=move |_| armed.set(false)
        >
            <Show when=move || armed.get()>
                <span class="delete-confirm-text">{prompt.clone()}</span>
            </Show>
            <button class=class on:click=on_click>
                {move || if armed.get() { "✓" } else { "×" }}
            </button>
        </span>
    }
}
