pub mod board;
pub mod task;

pub use board::{BoardConfig, CancelPolicy, Column, ColumnId};
pub use task::{ActivityLog, Priority, Task, TaskId};
