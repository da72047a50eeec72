//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::BoardState;
use crate::models::{Category, Issue, Milestone, Project, Tag, User};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, once the profile has loaded
    pub user: Option<User>,
    pub projects: Vec<Project>,
    pub selected_project: Option<u32>,
    /// Issues of the selected project as last fetched
    pub issues: Vec<Issue>,
    /// Local board copy of `issues`, reordered and moved optimistically
    pub board: BoardState,
    pub tags: Vec<Tag>,
    pub categories: Vec<Category>,
    pub milestones: Vec<Milestone>,
    /// Last user-facing error; cleared by the notification banner
    pub error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Replace the entry with the same id, or append
fn upsert_by_id<T>(list: &mut Vec<T>, item: T, id: impl Fn(&T) -> u32) {
    let key = id(&item);
    match list.iter_mut().find(|existing| id(existing) == key) {
        Some(existing) => *existing = item,
        None => list.push(item),
    }
}

// ========================
// Store Helper Functions
// ========================

/// Surface an error message to the user
pub fn store_set_error(store: &AppStore, message: impl Into<String>) {
    let message = message.into();
    log::warn!("[APP] {}", message);
    store.error().set(Some(message));
}

pub fn store_clear_error(store: &AppStore) {
    store.error().set(None);
}

/// Add or replace an issue by ID
pub fn store_upsert_issue(store: &AppStore, issue: Issue) {
    store.board().update(|board| *board = board.upsert(issue.clone()));
    upsert_by_id(&mut *store.issues().write(), issue, |i| i.id);
}

/// Remove an issue by ID (from the issue list and the board)
pub fn store_remove_issue(store: &AppStore, issue_id: u32) {
    store.issues().write().retain(|issue| issue.id != issue_id);
    store.board().update(|board| *board = board.remove(issue_id));
}

/// Replace the fetched issues and rebuild the board from them
pub fn store_set_issues(store: &AppStore, project_id: u32, issues: Vec<Issue>) {
    store.board().set(BoardState::from_issues(project_id, &issues));
    store.issues().set(issues);
}

/// Add or replace a project by ID
pub fn store_upsert_project(store: &AppStore, project: Project) {
    upsert_by_id(&mut *store.projects().write(), project, |p| p.id);
}

/// Remove a project by ID, dropping the selection if it pointed there
pub fn store_remove_project(store: &AppStore, project_id: u32) {
    store.projects().write().retain(|project| project.id != project_id);
    if store.selected_project().get_untracked() == Some(project_id) {
        store.selected_project().set(None);
        store.issues().write().clear();
        store.board().set(BoardState::default());
    }
}

/// Forget everything tied to the signed-in user
pub fn store_reset_session(store: &AppStore) {
    *store.write() = AppState::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_or_appends() {
        let mut tags = vec![
            Tag { id: 1, name: "api".to_string() },
            Tag { id: 2, name: "ui".to_string() },
        ];

        upsert_by_id(&mut tags, Tag { id: 2, name: "frontend".to_string() }, |t| t.id);
        upsert_by_id(&mut tags, Tag { id: 3, name: "docs".to_string() }, |t| t.id);

        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["api", "frontend", "docs"]);
    }
}
