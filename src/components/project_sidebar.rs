//! Project Sidebar Component
//!
//! Left column: signed-in user, project list with add/delete, logout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::DeleteConfirmButton;
use crate::context::{use_api, AppContext};
use crate::models::ProjectRequest;
use crate::store::{
    store_remove_project, store_reset_session, store_upsert_project, use_app_store, AppStateStoreFields,
};

/// Project add input
#[component]
fn ProjectAddInput() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let api = use_api();

    let (new_name, set_new_name) = signal(String::new());

    let add_project = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get().trim().to_string();
        if name.is_empty() { return; }
        let api = api.clone();

        spawn_local(async move {
            let request = ProjectRequest { name, ..Default::default() };
            match api.create_project(&request).await {
                Ok(project) => {
                    let id = project.id;
                    set_new_name.set(String::new());
                    store_upsert_project(&store, project);
                    store.selected_project().set(Some(id));
                }
                Err(e) => ctx.report(&store, "Erro ao criar projeto", e),
            }
        });
    };

    view! {
        <form class="project-add-form" on:submit=add_project>
            <input
                type="text"
                placeholder="Novo projeto..."
                prop:value=move || new_name.get()
                on:input=move |ev| set_new_name.set(event_target_value(&ev))
            />
            <button type="submit">"+"</button>
        </form>
    }
}

/// Recent log lines, read when opened
#[component]
fn LogPanel() -> impl IntoView {
    let (lines, set_lines) = signal(Vec::<String>::new());

    view! {
        <details class="log-panel">
            <summary on:click=move |_| {
                set_lines.set(rolling_logger::recent().iter().rev().take(50).map(|l| l.format()).collect());
            }>
                "Diagnóstico"
            </summary>
            <pre class="log-lines">{move || lines.get().join("\n")}</pre>
        </details>
    }
}

#[component]
pub fn ProjectSidebar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let api = use_api();

    let user_name = move || store.user().get().map(|u| u.full_name).unwrap_or_default();

    let logout = {
        let api = api.clone();
        move |_| {
            api.logout();
            store_reset_session(&store);
            ctx.set_signed_in(false);
        }
    };

    view! {
        <aside class="project-sidebar">
            <div class="sidebar-user">
                <span class="user-name">{user_name}</span>
                <button class="logout-btn" on:click=logout>"Sair"</button>
            </div>
            <h3>"Projetos"</h3>
            <For
                each=move || store.projects().get()
                key=|project| (project.id, project.name.clone())
                children=move |project| {
                    let id = project.id;
                    let api = api.clone();
                    let is_selected = move || store.selected_project().get() == Some(id);
                    let on_delete = move |_: ()| {
                        let api = api.clone();
                        spawn_local(async move {
                            match api.delete_project(id).await {
                                Ok(()) => store_remove_project(&store, id),
                                Err(e) => ctx.report(&store, "Erro ao excluir projeto", e),
                            }
                        });
                    };
                    view! {
                        <div
                            class=move || if is_selected() { "project-item selected" } else { "project-item" }
                            on:click=move |_| store.selected_project().set(Some(id))
                        >
                            <span class="project-name">{project.name.clone()}</span>
                            <DeleteConfirmButton button_class="project-delete-btn" prompt="Excluir projeto?" on_confirm=on_delete />
                        </div>
                    }
                }
            />
            <ProjectAddInput />
            <LogPanel />
        </aside>
    }
}
