//! UI Components
//!
//! Reusable Leptos components.

mod board_column;
mod board_view;
mod delete_confirm_button;
mod login_form;
mod new_task_form;
mod notification;
mod project_sidebar;
mod task_card;
mod task_stats;

pub use board_column::BoardColumn;
pub use board_view::BoardView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use login_form::LoginForm;
pub use new_task_form::NewTaskForm;
pub use notification::Notification;
pub use project_sidebar::ProjectSidebar;
pub use task_card::TaskCard;
pub use task_stats::TaskStatsPanel;
