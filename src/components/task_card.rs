//! Task Card Component
//!
//! One draggable issue on the board: title, priority, type and due date.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::components::DeleteConfirmButton;
use crate::context::{use_api, AppContext};
use crate::due::due_message;
use crate::models::{Issue, IssuePriority};
use crate::store::{store_remove_issue, use_app_store};

fn priority_class(priority: IssuePriority) -> &'static str {
    match priority {
        IssuePriority::Baixa => "priority priority-low",
        IssuePriority::Media => "priority priority-medium",
        IssuePriority::Alta => "priority priority-high",
    }
}

#[component]
pub fn TaskCard(task: Issue, column: usize, dnd: DndSignals) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let api = use_api();

    let id = task.id;
    let due = due_message(task.due_date, &task.title, Local::now().naive_local());

    let on_mousedown = make_on_card_mousedown(dnd, id);
    let on_mouseenter = make_on_card_mouseenter(dnd, id);
    let on_mouseleave = make_on_card_mouseleave(dnd, column);

    let card_class = move || {
        let mut c = String::from("task-card");
        if dnd.dragging_id_read.get() == Some(id) { c.push_str(" dragging"); }
        if dnd.drop_target_read.get() == Some(DropTarget::Card(id)) { c.push_str(" drop-target"); }
        c
    };

    let on_delete = move |_: ()| {
        let api = api.clone();
        spawn_local(async move {
            match api.delete_issue(id).await {
                Ok(()) => store_remove_issue(&store, id),
                Err(e) => ctx.report(&store, "Erro ao excluir tarefa", e),
            }
        });
    };

    view! {
        <div
            class=card_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div class="task-card-header">
                <span class={priority_class(task.priority)}>{task.priority.label()}</span>
                <span class="task-type">{task.issue_type.label()}</span>
                <DeleteConfirmButton button_class="task-delete-btn" prompt="Excluir tarefa?" on_confirm=on_delete />
            </div>
            <div class="task-title">{task.title.clone()}</div>
            {task.description.clone().filter(|d| !d.trim().is_empty()).map(|d| view! {
                <p class="task-description">{d}</p>
            })}
            <div class={format!("task-due {}", due.severity.css_class())} title={due.full_date.clone().unwrap_or_default()}>
                {due.message.clone()}
            </div>
            {task.assignee.clone().map(|user| view! {
                <span class="task-assignee">{user.full_name}</span>
            })}
        </div>
    }
}
