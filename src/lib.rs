//! Taskboard Frontend
//!
//! Kanban board client for the project-management REST backend.

pub mod api;
pub mod app;
pub mod board;
pub mod components;
pub mod config;
pub mod context;
pub mod due;
pub mod models;
pub mod store;
