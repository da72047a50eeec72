//! Login Form Component
//!
//! Sign in, or register a new account, and open a session.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::{use_api, AppContext};
use crate::models::{LoginRequest, RegisterRequest};
use crate::store::{store_clear_error, store_set_error, use_app_store};

fn input_value(ev: &web_sys::Event) -> Option<String> {
    ev.target()?
        .dyn_ref::<web_sys::HtmlInputElement>()
        .map(|input| input.value())
}

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let api = use_api();

    let (registering, set_registering) = signal(false);
    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = email.get().trim().to_string();
        let password = password.get();
        if email.is_empty() || password.is_empty() {
            store_set_error(&store, "Informe e-mail e senha");
            return;
        }
        let register = registering.get();
        let full_name = full_name.get().trim().to_string();
        let api = api.clone();

        set_busy.set(true);
        spawn_local(async move {
            let result = if register {
                api.register(&RegisterRequest { full_name, email, password }).await
            } else {
                api.login(&LoginRequest { email, password }).await
            };
            set_busy.set(false);
            match result {
                Ok(_) => {
                    store_clear_error(&store);
                    set_password.set(String::new());
                    ctx.set_signed_in(true);
                    ctx.reload();
                }
                Err(e) => {
                    let action = if register { "Erro ao cadastrar" } else { "Erro ao entrar" };
                    store_set_error(&store, format!("{}: {}", action, e));
                }
            }
        });
    };

    view! {
        <form class="login-form" on:submit=on_submit>
            <h2>{move || if registering.get() { "Criar conta" } else { "Entrar" }}</h2>
            <Show when=move || registering.get()>
                <input
                    type="text"
                    placeholder="Nome completo"
                    prop:value=move || full_name.get()
                    on:input=move |ev| {
                        if let Some(v) = input_value(&ev) { set_full_name.set(v); }
                    }
                />
            </Show>
            <input
                type="email"
                placeholder="E-mail"
                prop:value=move || email.get()
                on:input=move |ev| {
                    if let Some(v) = input_value(&ev) { set_email.set(v); }
                }
            />
            <input
                type="password"
                placeholder="Senha"
                prop:value=move || password.get()
                on:input=move |ev| {
                    if let Some(v) = input_value(&ev) { set_password.set(v); }
                }
            />
            <button type="submit" disabled=move || busy.get()>
                {move || if registering.get() { "Cadastrar" } else { "Entrar" }}
            </button>
            <button
                type="button"
                class="link-btn"
                on:click=move |_| set_registering.update(|r| *r = !*r)
            >
                {move || if registering.get() { "Já tenho conta" } else { "Criar uma conta" }}
            </button>
        </form>
    }
}
