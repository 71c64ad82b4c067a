//! # Taskboard Core
//!
//! Domain models and the kanban reordering engine for Taskboard task
//! tracking.
//!
//! The engine keeps tasks partitioned across board columns, turns drag
//! gestures into optimistic reorders, and reports each completed drop once.
//! Persistence is pluggable through the [`Storage`] trait.

pub mod domain;
pub mod error;
pub mod kanban;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{BoardConfig, CancelPolicy, Column, ColumnId},
    task::{ActivityLog, Priority, Task, TaskId},
};
pub use error::{Result, TaskboardError};
pub use kanban::{BoardState, DragEvent, KanbanBoard, MoveCommit, MoveSink, Outcome};
pub use storage::Storage;
