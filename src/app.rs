//! Taskboard Frontend App
//!
//! Root component: login screen, or sidebar plus board once signed in.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::{AppClient, ProjectFilter};
use crate::components::{BoardView, LoginForm, NewTaskForm, Notification, ProjectSidebar, TaskStatsPanel};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{store_set_issues, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    log::info!("[APP] API base URL: {}", config.api_base_url);
    let api = AppClient::from_config(&config);

    let store = Store::new(AppState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (signed_in, set_signed_in) = signal(api.has_session());
    let ctx = AppContext::new((reload_trigger, set_reload_trigger), (signed_in, set_signed_in));

    // Provide context to all children
    provide_context(store);
    provide_context(api.clone());
    provide_context(ctx);

    // Session data: profile, projects, tags, categories
    let session_api = api.clone();
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        if !signed_in.get() {
            return;
        }
        let api = session_api.clone();
        log::debug!("[APP] loading session data, trigger={}", trigger);
        spawn_local(async move {
            match api.profile().await {
                Ok(user) => store.user().set(Some(user)),
                Err(e) => {
                    ctx.report(&store, "Erro ao carregar perfil", e);
                    return;
                }
            }
            match api.list_projects(&ProjectFilter::default()).await {
                Ok(projects) => {
                    log::debug!("[APP] loaded {} projects", projects.len());
                    let selected = store.selected_project().get_untracked();
                    if selected.map_or(true, |id| !projects.iter().any(|p| p.id == id)) {
                        store.selected_project().set(projects.first().map(|p| p.id));
                    }
                    store.projects().set(projects);
                }
                Err(e) => ctx.report(&store, "Erro ao carregar projetos", e),
            }
            match api.list_tags().await {
                Ok(tags) => store.tags().set(tags),
                Err(e) => log::warn!("[APP] tags unavailable: {}", e),
            }
            match api.list_categories().await {
                Ok(categories) => store.categories().set(categories),
                Err(e) => log::warn!("[APP] categories unavailable: {}", e),
            }
        });
    });

    // Issues and milestones of the selected project
    let project_api = api.clone();
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        let Some(project_id) = store.selected_project().get() else {
            return;
        };
        let api = project_api.clone();
        spawn_local(async move {
            match api.list_issues(project_id).await {
                Ok(issues) => {
                    log::debug!("[APP] loaded {} issues for project {}", issues.len(), project_id);
                    store_set_issues(&store, project_id, issues);
                }
                Err(e) => ctx.report(&store, "Erro ao carregar tarefas", e),
            }
            match api.list_milestones(project_id).await {
                Ok(milestones) => store.milestones().set(milestones),
                Err(e) => log::warn!("[APP] milestones unavailable: {}", e),
            }
        });
    });

    view! {
        <Notification />
        <Show
            when=move || signed_in.get()
            fallback=|| view! { <div class="login-layout"><LoginForm /></div> }
        >
            <div class="app-layout">
                <ProjectSidebar />
                <main class="main-content">
                    <Show
                        when=move || store.selected_project().get().is_some()
                        fallback=|| view! { <p class="empty-state">"Selecione um projeto"</p> }
                    >
                        <NewTaskForm />
                        <BoardView />
                    </Show>
                </main>
                <aside class="right-sidebar">
                    <TaskStatsPanel />
                </aside>
            </div>
        </Show>
    }
}
