//! Board Column Component
//!
//! One status column; the column body is itself a drop target.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::TaskCard;
use crate::models::Issue;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoardColumn(column: usize, dnd: DndSignals) -> impl IntoView {
    let store = use_app_store();

    let name = move || store.board().with(|b| b.boards().get(column).map(|board| board.name.clone()).unwrap_or_default());
    let tasks = move || store.board().with(|b| b.tasks_in(column).into_iter().cloned().collect::<Vec<Issue>>());
    let count = move || store.board().with(|b| b.tasks_in(column).len());

    let on_mouseenter = make_on_column_mouseenter(dnd, column);
    let on_mouseleave = make_on_column_mouseleave(dnd);

    let column_class = move || {
        let dragging_here = dnd.drop_target_read.get() == Some(DropTarget::Column(column));
        if dragging_here { "board-column drop-target" } else { "board-column" }
    };

    view! {
        <section class=column_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
            <header class="board-column-header">
                <span class="board-column-name">{name}</span>
                <span class="board-column-count">{count}</span>
            </header>
            <div class="board-column-body">
                <For
                    each=tasks
                    // Any field change must re-render the card
                    key=|task| (task.id, task.status, task.title.clone(), task.priority, task.due_date, task.updated_at)
                    children=move |task| view! { <TaskCard task=task column=column dnd=dnd /> }
                />
            </div>
        </section>
    }
}
