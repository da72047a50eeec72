//! Board Reconciliation
//!
//! Pure reducer over the three status boards. Task records live in an arena
//! keyed by id; each board only owns the display order of its ids. Every
//! operation returns a new `BoardState` and leaves `self` untouched.

use std::collections::BTreeMap;

use leptos_dragdrop::DropTarget;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Issue, IssueStatus};

/// (board id, display label) in column order
pub const DEFAULT_BOARDS: [(&str, &str); 3] = [
    ("board-1", "A Fazer"),
    ("board-2", "Em Progresso"),
    ("board-3", "Concluído"),
];

/// Display label to backend status string.
///
/// Strips diacritics, joins words with `_` and upper-cases, so
/// `"Concluído"` becomes `"CONCLUIDO"`. Applying it twice changes nothing.
pub fn status_from_label(label: &str) -> String {
    let stripped: String = label.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub id: String,
    pub name: String,
    /// Display order only; never persisted
    pub task_ids: Vec<u32>,
}

impl Board {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            task_ids: Vec::new(),
        }
    }

    /// The status a task takes when dropped here
    pub fn status(&self) -> Result<IssueStatus, String> {
        status_from_label(&self.name).parse()
    }
}

/// Server call owed after a cross-board drop, with enough to undo it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub issue_id: u32,
    pub status: IssueStatus,
    pub previous_status: IssueStatus,
    pub from_board: usize,
    pub from_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No usable target; nothing changed
    Aborted,
    /// Dropped where it already was
    Unchanged,
    /// Reordered inside one board; local only
    Reordered,
    /// Moved across boards; the status update must be sent
    Moved(StatusChange),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    tasks: BTreeMap<u32, Issue>,
    boards: Vec<Board>,
    active: Option<u32>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            boards: DEFAULT_BOARDS.iter().map(|(id, name)| Board::new(id, name)).collect(),
            active: None,
        }
    }
}

impl BoardState {
    /// Partition a project's issues across the boards by status.
    ///
    /// Issues tagged with another project are skipped; untagged ones are
    /// assumed to belong to the project they were fetched for.
    pub fn from_issues(project_id: u32, issues: &[Issue]) -> Self {
        let mut state = Self::default();
        let statuses: Vec<Option<IssueStatus>> = state.boards.iter().map(|b| b.status().ok()).collect();
        for issue in issues {
            if issue.project_id.is_some_and(|p| p != project_id) {
                continue;
            }
            let Some(column) = statuses.iter().position(|s| *s == Some(issue.status)) else {
                log::warn!("[BOARD] no board for status {}, skipping issue {}", issue.status, issue.id);
                continue;
            };
            if state.tasks.insert(issue.id, issue.clone()).is_none() {
                state.boards[column].task_ids.push(issue.id);
            }
        }
        state
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn task(&self, id: u32) -> Option<&Issue> {
        self.tasks.get(&id)
    }

    /// Tasks of one board in display order
    pub fn tasks_in(&self, column: usize) -> Vec<&Issue> {
        self.boards
            .get(column)
            .map(|b| b.task_ids.iter().filter_map(|id| self.tasks.get(id)).collect())
            .unwrap_or_default()
    }

    /// Every task, ordered by id
    pub fn tasks(&self) -> impl Iterator<Item = &Issue> {
        self.tasks.values()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Task being dragged, if any
    pub fn active(&self) -> Option<&Issue> {
        self.active.and_then(|id| self.tasks.get(&id))
    }

    /// (board index, position) of a task
    fn locate(&self, task_id: u32) -> Option<(usize, usize)> {
        self.boards
            .iter()
            .enumerate()
            .find_map(|(b, board)| board.task_ids.iter().position(|id| *id == task_id).map(|i| (b, i)))
    }

    pub fn drag_start(&self, task_id: u32) -> Self {
        let mut next = self.clone();
        next.active = self.tasks.contains_key(&task_id).then_some(task_id);
        next
    }

    /// Resolve a drop. The drag state is cleared in every outcome.
    pub fn drag_end(&self, active_id: u32, over: Option<DropTarget>) -> (Self, DropOutcome) {
        let mut next = self.clone();
        next.active = None;

        let Some(over) = over else {
            return (next, DropOutcome::Aborted);
        };
        let Some((from_board, from_index)) = self.locate(active_id) else {
            return (next, DropOutcome::Aborted);
        };
        let (to_board, to_index) = match over {
            DropTarget::Card(id) => match self.locate(id) {
                Some(found) => found,
                None => return (next, DropOutcome::Aborted),
            },
            DropTarget::Column(column) => match self.boards.get(column) {
                Some(board) => (column, board.task_ids.len().saturating_sub(1)),
                None => return (next, DropOutcome::Aborted),
            },
        };

        if to_board == from_board {
            if to_index == from_index {
                return (next, DropOutcome::Unchanged);
            }
            let order = &mut next.boards[from_board].task_ids;
            let id = order.remove(from_index);
            order.insert(to_index, id);
            return (next, DropOutcome::Reordered);
        }

        let status = match self.boards[to_board].status() {
            Ok(status) => status,
            Err(e) => {
                log::warn!("[BOARD] drop on '{}' aborted: {}", self.boards[to_board].name, e);
                return (next, DropOutcome::Aborted);
            }
        };
        let Some(task) = next.tasks.get_mut(&active_id) else {
            return (next, DropOutcome::Aborted);
        };
        let previous_status = task.status;
        task.status = status;
        next.boards[from_board].task_ids.remove(from_index);
        next.boards[to_board].task_ids.push(active_id);

        log::debug!(
            "[BOARD] issue {} moved {} -> {}",
            active_id,
            self.boards[from_board].id,
            self.boards[to_board].id
        );
        let change = StatusChange {
            issue_id: active_id,
            status,
            previous_status,
            from_board,
            from_index,
        };
        (next, DropOutcome::Moved(change))
    }

    /// Undo a cross-board move whose status update failed.
    ///
    /// A task that has since moved again is left where it is.
    pub fn revert(&self, change: &StatusChange) -> Self {
        let mut next = self.clone();
        if self.task(change.issue_id).is_some_and(|t| t.status != change.status) {
            return next;
        }
        for board in &mut next.boards {
            board.task_ids.retain(|id| *id != change.issue_id);
        }
        if let Some(task) = next.tasks.get_mut(&change.issue_id) {
            task.status = change.previous_status;
            if let Some(board) = next.boards.get_mut(change.from_board) {
                let index = change.from_index.min(board.task_ids.len());
                board.task_ids.insert(index, change.issue_id);
            }
        }
        next
    }

    /// Take the server's copy of a task.
    ///
    /// A known task keeps its position unless its status changed, in which
    /// case it moves to the end of the matching board. New tasks are appended.
    pub fn upsert(&self, issue: Issue) -> Self {
        let mut next = self.clone();
        let Some(column) = next.boards.iter().position(|b| b.status() == Ok(issue.status)) else {
            return next;
        };
        let id = issue.id;
        let placed = self.locate(id).map(|(board, _)| board);
        next.tasks.insert(id, issue);
        if placed != Some(column) {
            for board in &mut next.boards {
                board.task_ids.retain(|t| *t != id);
            }
            next.boards[column].task_ids.push(id);
        }
        next
    }

    pub fn remove(&self, task_id: u32) -> Self {
        let mut next = self.clone();
        next.tasks.remove(&task_id);
        for board in &mut next.boards {
            board.task_ids.retain(|id| *id != task_id);
        }
        if next.active == Some(task_id) {
            next.active = None;
        }
        next
    }
}

// ========================
// Statistics
// ========================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub to_do: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        issues.into_iter().fold(Self::default(), |mut stats, issue| {
            stats.total += 1;
            match issue.status {
                IssueStatus::AFazer => stats.to_do += 1,
                IssueStatus::EmProgresso => stats.in_progress += 1,
                IssueStatus::Concluido => stats.completed += 1,
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssuePriority, IssueType};

    fn make_issue(id: u32, status: IssueStatus) -> Issue {
        Issue {
            id,
            title: format!("Task {}", id),
            description: None,
            priority: IssuePriority::Media,
            issue_type: IssueType::Task,
            status,
            due_date: None,
            milestone: None,
            project_id: Some(1),
            tags: Vec::new(),
            assignee: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> BoardState {
        BoardState::from_issues(
            1,
            &[
                make_issue(1, IssueStatus::AFazer),
                make_issue(2, IssueStatus::AFazer),
                make_issue(3, IssueStatus::AFazer),
                make_issue(4, IssueStatus::EmProgresso),
                make_issue(5, IssueStatus::AFazer),
                make_issue(6, IssueStatus::Concluido),
            ],
        )
    }

    fn ids(state: &BoardState, column: usize) -> Vec<u32> {
        state.boards()[column].task_ids.clone()
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(status_from_label("A Fazer"), "A_FAZER");
        assert_eq!(status_from_label("Em Progresso"), "EM_PROGRESSO");
        assert_eq!(status_from_label("Concluído"), "CONCLUIDO");
        assert_eq!(status_from_label("Em Progresso"), status_from_label("Em Progresso"));
        for (_, label) in DEFAULT_BOARDS {
            let once = status_from_label(label);
            assert_eq!(status_from_label(&once), once);
        }
    }

    #[test]
    fn test_default_boards_cover_every_status() {
        let state = BoardState::default();
        let statuses: Vec<IssueStatus> = state.boards().iter().map(|b| b.status().unwrap()).collect();
        assert_eq!(statuses, IssueStatus::ALL.to_vec());
    }

    #[test]
    fn test_from_issues_partitions_by_status() {
        let mut other = make_issue(9, IssueStatus::AFazer);
        other.project_id = Some(2);
        let mut untagged = make_issue(10, IssueStatus::Concluido);
        untagged.project_id = None;
        let state = BoardState::from_issues(1, &[make_issue(1, IssueStatus::EmProgresso), other, untagged]);

        assert_eq!(ids(&state, 0), Vec::<u32>::new());
        assert_eq!(ids(&state, 1), vec![1]);
        assert_eq!(ids(&state, 2), vec![10]);
        assert_eq!(state.task_count(), 2);
    }

    #[test]
    fn test_cross_board_move() {
        let state = sample().drag_start(5);
        assert_eq!(state.active().map(|t| t.id), Some(5));

        let (next, outcome) = state.drag_end(5, Some(DropTarget::Column(2)));

        assert_eq!(
            outcome,
            DropOutcome::Moved(StatusChange {
                issue_id: 5,
                status: IssueStatus::Concluido,
                previous_status: IssueStatus::AFazer,
                from_board: 0,
                from_index: 3,
            })
        );
        assert!(!ids(&next, 0).contains(&5));
        assert_eq!(ids(&next, 2), vec![6, 5]);
        assert_eq!(next.task(5).unwrap().status, IssueStatus::Concluido);
        assert_eq!(next.task_count(), state.task_count());
        assert!(next.active().is_none());
        // the input state is not mutated
        assert_eq!(state.task(5).unwrap().status, IssueStatus::AFazer);
    }

    #[test]
    fn test_drop_on_card_in_other_board_appends() {
        let (next, outcome) = sample().drag_end(1, Some(DropTarget::Card(4)));
        assert!(matches!(outcome, DropOutcome::Moved(ref c) if c.status == IssueStatus::EmProgresso));
        assert_eq!(ids(&next, 1), vec![4, 1]);
    }

    #[test]
    fn test_same_board_reorder() {
        let (next, outcome) = sample().drag_end(1, Some(DropTarget::Card(3)));
        assert_eq!(outcome, DropOutcome::Reordered);
        assert_eq!(ids(&next, 0), vec![2, 3, 1, 5]);

        let (next, _) = next.drag_end(5, Some(DropTarget::Card(2)));
        assert_eq!(ids(&next, 0), vec![5, 2, 3, 1]);

        let mut sorted = ids(&next, 0);
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 5]);
        assert_eq!(next.task(1).unwrap().status, IssueStatus::AFazer);
    }

    #[test]
    fn test_drop_on_own_column_moves_to_end() {
        let (next, outcome) = sample().drag_end(2, Some(DropTarget::Column(0)));
        assert_eq!(outcome, DropOutcome::Reordered);
        assert_eq!(ids(&next, 0), vec![1, 3, 5, 2]);
    }

    #[test]
    fn test_noop_drops() {
        let state = sample();

        let (next, outcome) = state.drag_end(2, Some(DropTarget::Card(2)));
        assert_eq!(outcome, DropOutcome::Unchanged);
        assert_eq!(next, state);

        let (next, outcome) = state.drag_end(2, None);
        assert_eq!(outcome, DropOutcome::Aborted);
        assert_eq!(next, state);

        let (_, outcome) = state.drag_end(2, Some(DropTarget::Card(99)));
        assert_eq!(outcome, DropOutcome::Aborted);
        let (_, outcome) = state.drag_end(2, Some(DropTarget::Column(7)));
        assert_eq!(outcome, DropOutcome::Aborted);
        let (_, outcome) = state.drag_end(99, Some(DropTarget::Column(1)));
        assert_eq!(outcome, DropOutcome::Aborted);
    }

    #[test]
    fn test_revert_restores_position_and_status() {
        let state = sample();
        let (moved, outcome) = state.drag_end(2, Some(DropTarget::Column(1)));
        let DropOutcome::Moved(change) = outcome else {
            panic!("expected a cross-board move");
        };

        let reverted = moved.revert(&change);

        assert_eq!(reverted, state);
    }

    #[test]
    fn test_stale_revert_keeps_later_move() {
        let (first, outcome) = sample().drag_end(2, Some(DropTarget::Column(1)));
        let DropOutcome::Moved(earlier) = outcome else {
            panic!("expected a cross-board move");
        };
        let (second, outcome) = first.drag_end(2, Some(DropTarget::Column(2)));
        assert!(matches!(outcome, DropOutcome::Moved(_)));

        let reverted = second.revert(&earlier);

        assert_eq!(reverted, second);
        assert_eq!(reverted.task(2).unwrap().status, IssueStatus::Concluido);
        assert_eq!(ids(&reverted, 2), vec![6, 2]);
    }

    #[test]
    fn test_upsert_keeps_or_moves() {
        let mut renamed = make_issue(2, IssueStatus::AFazer);
        renamed.title = "Renamed".to_string();
        let next = sample().upsert(renamed);
        assert_eq!(next.task(2).unwrap().title, "Renamed");
        assert_eq!(ids(&next, 0), vec![1, 2, 3, 5]);

        let next = next.upsert(make_issue(3, IssueStatus::Concluido));
        assert_eq!(ids(&next, 0), vec![1, 2, 5]);
        assert_eq!(ids(&next, 2), vec![6, 3]);

        let next = next.upsert(make_issue(7, IssueStatus::EmProgresso));
        assert_eq!(ids(&next, 1), vec![4, 7]);
        assert_eq!(next.task_count(), 7);
    }

    #[test]
    fn test_remove() {
        let next = sample().drag_start(4).remove(4);
        assert!(next.task(4).is_none());
        assert!(ids(&next, 1).is_empty());
        assert!(next.active().is_none());
        assert_eq!(next.task_count(), 5);
    }

    #[test]
    fn test_task_stats() {
        let state = sample();
        let stats = TaskStats::from_issues(state.tasks());
        assert_eq!(
            stats,
            TaskStats {
                total: 6,
                to_do: 4,
                in_progress: 1,
                completed: 1,
            }
        );
    }
}
