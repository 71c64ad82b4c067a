use crate::{
    domain::{BoardConfig, Task, TaskId},
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod persist;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use persist::{MoveQueue, StatusPersister};

/// Storage trait for persisting tasks and board configuration
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves a task
    async fn save_task(&self, task: &Task) -> Result<()>;

    /// Loads a task by ID
    async fn load_task(&self, id: &TaskId) -> Result<Task>;

    /// Lists all tasks in board order: oldest first, ties broken by ID
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Deletes a task
    async fn delete_task(&self, id: &TaskId) -> Result<()>;

    /// Saves the board configuration
    async fn save_config(&self, config: &BoardConfig) -> Result<()>;

    /// Loads the board configuration
    async fn load_config(&self) -> Result<BoardConfig>;

    /// Checks if the board is initialized
    async fn is_initialized(&self) -> bool;
}
