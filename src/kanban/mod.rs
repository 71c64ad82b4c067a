//! Kanban reordering engine.
//!
//! The board is a partition of task ids across a fixed set of columns. Drag
//! gestures arrive as [`DragEvent`]s; every hover re-lays the board out
//! optimistically and every resolved drop yields exactly one [`MoveCommit`].
//!
//! ```
//! use taskboard_core::domain::{BoardConfig, Task, TaskId};
//! use taskboard_core::kanban::{KanbanBoard, MoveCommit};
//!
//! let tasks = vec![
//!     Task::new(TaskId::from("A"), "Write docs".to_string()),
//!     Task::new(TaskId::from("B"), "Review".to_string()),
//! ];
//! let mut board = KanbanBoard::with_items(BoardConfig::default(), &tasks, Vec::<MoveCommit>::new()).unwrap();
//!
//! board.begin("A");
//! board.over("done", false);
//! board.end(Some("done"));
//!
//! assert_eq!(board.state().items("done").unwrap()[0].as_str(), "A");
//! assert_eq!(board.sink().len(), 1);
//! ```

pub mod commit;
pub mod engine;
pub mod reorder;
pub mod resolver;
pub mod session;
pub mod state;

pub use commit::{CommitEmitter, MoveCommit, MoveSink};
pub use engine::KanbanBoard;
pub use reorder::{ReorderPlan, ReorderRequest};
pub use resolver::{resolve, Resolved};
pub use session::{step, DragEvent, DragRejection, DragSession, Outcome, Step};
pub use state::{BoardItem, BoardState, ColumnSlot};
