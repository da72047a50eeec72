//! New Task Form Component
//!
//! Quick-add for the selected project; new tasks start in "A Fazer".

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_api, AppContext};
use crate::models::{IssuePriority, IssueRequest, IssueStatus, IssueType};
use crate::store::{store_upsert_issue, use_app_store, AppStateStoreFields};

const PRIORITIES: [IssuePriority; 3] = [IssuePriority::Baixa, IssuePriority::Media, IssuePriority::Alta];

#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let api = use_api();

    let (title, set_title) = signal(String::new());
    let (priority, set_priority) = signal(IssuePriority::Media);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get().trim().to_string();
        if text.is_empty() { return; }
        let Some(project_id) = store.selected_project().get_untracked() else {
            return;
        };
        let request = IssueRequest {
            title: text,
            description: None,
            status: IssueStatus::AFazer,
            project_id,
            priority: priority.get(),
            issue_type: IssueType::Task,
            due_date: None,
            milestone_id: None,
        };
        let api = api.clone();

        spawn_local(async move {
            match api.create_issue(&request).await {
                Ok(issue) => {
                    log::info!("[BOARD] created issue {}", issue.id);
                    set_title.set(String::new());
                    store_upsert_issue(&store, issue);
                }
                Err(e) => ctx.report(&store, "Erro ao criar tarefa", e),
            }
        });
    };

    view! {
        <form class="new-task-form" on:submit=create_task>
            <input
                type="text"
                placeholder="Nova tarefa..."
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <div class="priority-selector">
                {PRIORITIES.iter().map(|p| {
                    let p = *p;
                    view! {
                        <button
                            type="button"
                            class=move || if priority.get() == p { "priority-btn active" } else { "priority-btn" }
                            on:click=move |_| set_priority.set(p)
                        >
                            {p.label()}
                        </button>
                    }
                }).collect_view()}
            </div>
            <button type="submit">"Adicionar"</button>
        </form>
    }
}
