//! # Taskdeck Core Library
//!
//! In-memory task management: projects, tags and tasks held in a single
//! store object, with derived views computed on demand.
//!
//! ## Features
//!
//! - **Repository Store**: create, merge-update and delete tasks and projects;
//!   deleting a project removes its tasks in the same call
//! - **Query Layer**: lookups, per-attribute selection, overdue and due-today
//!   checks against the local calendar day, boolean filter queries
//! - **View Derivation**: status/priority list filters, stable sorting with a
//!   direction toggle, dashboard statistics
//! - **Deterministic Time**: every date-relative result goes through a
//!   [`clock::Clock`], so tests can pin "today"
//!
//! ## Core Modules
//!
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`query`]: Boolean filter queries
//! - [`view`]: Sorting, filtering and aggregate statistics
//! - [`display`]: Due-date labels and text truncation
//! - [`clock`] / [`timezone`]: Time source and timezone utilities
//! - [`seed`]: Built-in sample dataset
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use taskdeck_core::{
//!     clock::SystemClock,
//!     models::{NewTaskData, Priority, ProjectId},
//!     repository::{InMemoryRepository, ProjectRepository, TaskRepository},
//!     view::{SortKey, TaskListView},
//! };
//!
//! let mut repo = InMemoryRepository::seeded(SystemClock::local());
//! let work = ProjectId::from("project-2");
//!
//! let task = repo.add_task(NewTaskData {
//!     priority: Priority::High,
//!     ..NewTaskData::new("Prepare demo", work.clone())
//! });
//! assert!(repo.get_task(&task.id).is_some());
//!
//! let mut view = TaskListView::default();
//! view.sort.toggle(SortKey::Title);
//! let listed = view.render(repo.get_tasks_by_project(&work));
//! assert!(listed.iter().any(|t| t.id == task.id));
//!
//! let removal = repo.delete_project(&work).unwrap();
//! assert!(repo.get_tasks_by_project(&work).is_empty());
//! assert!(removal.removed_tasks >= 1);
//! ```

pub mod clock;
pub mod display;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod seed;
pub mod timezone;
pub mod view;
