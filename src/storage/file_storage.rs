use crate::{
    domain::{BoardConfig, Task, TaskId},
    error::{Result, TaskboardError},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage implementation
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const TASKBOARD_DIR: &'static str = ".taskboard";
    const TASKS_DIR: &'static str = "tasks";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::TASKBOARD_DIR),
        }
    }

    fn tasks_dir(&self) -> PathBuf {
        self.root_path.join(Self::TASKS_DIR)
    }

    fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    fn task_file(&self, id: &TaskId) -> Result<PathBuf> {
        let safe = id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(TaskboardError::StorageError(format!(
                "task ID {:?} cannot be used as a file name",
                id.as_str()
            )));
        }
        Ok(self.tasks_dir().join(format!("{}.json", id.as_str())))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.tasks_dir()).await?;

        if !self.config_file().exists() {
            self.save_config(&BoardConfig::default()).await?;
        }

        tracing::info!(path = %self.root_path.display(), "taskboard storage initialized");
        Ok(())
    }

    async fn save_task(&self, task: &Task) -> Result<()> {
        let file_path = self.task_file(&task.id)?;
        self.ensure_directory_exists(&self.tasks_dir()).await?;

        let json = serde_json::to_string_pretty(task)?;
        fs::write(file_path, json).await?;
        Ok(())
    }

    async fn load_task(&self, id: &TaskId) -> Result<Task> {
        let file_path = self.task_file(id)?;

        if !file_path.exists() {
            return Err(TaskboardError::TaskNotFound(id.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let task: Task = serde_json::from_str(&contents)?;

        Ok(task)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks_dir = self.tasks_dir();

        if !tasks_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&tasks_dir).await?;
        let mut tasks: Vec<Task> = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                let contents = fs::read_to_string(&path).await?;
                tasks.push(serde_json::from_str(&contents)?);
            }
        }

        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(tasks)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let file_path = self.task_file(id)?;

        if !file_path.exists() {
            return Err(TaskboardError::TaskNotFound(id.to_string()));
        }

        fs::remove_file(file_path).await?;
        Ok(())
    }

    async fn save_config(&self, config: &BoardConfig) -> Result<()> {
        config.validate()?;
        self.ensure_directory_exists(&self.root_path).await?;

        fs::write(self.config_file(), config.to_toml_string()?).await?;
        Ok(())
    }

    async fn load_config(&self) -> Result<BoardConfig> {
        let config_file = self.config_file();

        if !config_file.exists() {
            return Err(TaskboardError::BoardNotInitialized);
        }

        let contents = fs::read_to_string(&config_file).await?;
        BoardConfig::from_toml_str(&contents)
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.config_file().exists()
    }
}
