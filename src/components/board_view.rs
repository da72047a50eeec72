//! Board View Component
//!
//! The three status columns with drag-and-drop. Drops are resolved by the
//! pure reducer in `board`; a cross-column move is applied optimistically,
//! then confirmed or reverted once the status update comes back.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::board::{DropOutcome, DEFAULT_BOARDS};
use crate::components::BoardColumn;
use crate::context::{use_api, AppContext};
use crate::store::{store_upsert_issue, use_app_store, AppStateStoreFields};

#[component]
pub fn BoardView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let api = use_api();

    let dnd = create_dnd_signals();

    bind_global_handlers(
        dnd,
        move |task_id| store.board().update(|b| *b = b.drag_start(task_id)),
        move |task_id, target| {
            let (next, outcome) = store.board().with_untracked(|b| b.drag_end(task_id, target));
            store.board().set(next);

            let DropOutcome::Moved(change) = outcome else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                match api.update_issue_status(change.issue_id, change.status).await {
                    Ok(updated) => store_upsert_issue(&store, updated),
                    Err(e) => {
                        log::warn!("[BOARD] status update for issue {} failed, reverting", change.issue_id);
                        store.board().update(|b| *b = b.revert(&change));
                        ctx.report(&store, "Não foi possível mover a tarefa", e);
                    }
                }
            });
        },
    );

    view! {
        <div class="board">
            {(0..DEFAULT_BOARDS.len()).map(|column| view! {
                <BoardColumn column=column dnd=dnd />
            }).collect_view()}
        </div>
    }
}
