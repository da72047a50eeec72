//! Task Stats Component
//!
//! Per-status counters for the selected project.

use leptos::prelude::*;

use crate::board::TaskStats;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskStatsPanel() -> impl IntoView {
    let store = use_app_store();
    let stats = Memo::new(move |_| store.board().with(|b| TaskStats::from_issues(b.tasks())));

    let cards = [
        ("Total de Tasks", Signal::derive(move || stats.get().total)),
        ("A Fazer", Signal::derive(move || stats.get().to_do)),
        ("Em Progresso", Signal::derive(move || stats.get().in_progress)),
        ("Concluído", Signal::derive(move || stats.get().completed)),
    ];

    view! {
        <div class="task-stats">
            <span class="task-stats-title">"Tasks"</span>
            <div class="task-stats-grid">
                {cards.into_iter().map(|(label, value)| view! {
                    <div class="stat-card">
                        <span class="stat-label">{label.to_uppercase()}</span>
                        <span class="stat-value">{move || value.get()}</span>
                    </div>
                }).collect_view()}
            </div>
        </div>
    }
}
