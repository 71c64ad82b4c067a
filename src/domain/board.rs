use crate::error::{Result, TaskboardError};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// Identifier of a board column; doubles as the status value of its tasks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match against a task status
    pub fn matches(&self, status: &str) -> bool {
        self.0.to_lowercase() == status.trim().to_lowercase()
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a kanban board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: ColumnId::from(id),
            title: title.to_string(),
        }
    }
}

/// What happens to the board when a drag is cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelPolicy {
    /// Leave the last optimistic layout in place
    #[default]
    Keep,
    /// Restore the layout captured when the drag began
    Restore,
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    /// Column receiving tasks whose status matches no column
    pub default_column: ColumnId,
    #[serde(default)]
    pub cancel_policy: CancelPolicy,
    pub columns: Vec<Column>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Default Board".to_string(),
            default_column: ColumnId::from("todo"),
            cancel_policy: CancelPolicy::Keep,
            columns: vec![
                Column::new("todo", "Todo"),
                Column::new("in_progress", "In Progress"),
                Column::new("done", "Completed"),
                Column::new("re_opened", "Re-opened"),
            ],
        }
    }
}

impl BoardConfig {
    /// Builds a board from `(id, title)` pairs; the first column is the default.
    pub fn with_columns(name: &str, columns: &[(&str, &str)]) -> Result<Self> {
        let columns: Vec<Column> = columns
            .iter()
            .map(|(id, title)| Column::new(id, title))
            .collect();
        let default_column = columns
            .first()
            .map(|c| c.id.clone())
            .ok_or_else(|| TaskboardError::ConfigError("board has no columns".to_string()))?;

        let config = Self {
            name: name.to_string(),
            columns,
            default_column,
            cancel_policy: CancelPolicy::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    /// Parses and validates a TOML board definition
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BoardConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(TaskboardError::ConfigError(
                "board has no columns".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.id.as_str().to_lowercase()) {
                return Err(TaskboardError::ConfigError(format!(
                    "duplicate column id '{}'",
                    column.id
                )));
            }
        }

        if self.column(self.default_column.as_str()).is_none() {
            return Err(TaskboardError::ConfigError(format!(
                "default column '{}' is not a board column",
                self.default_column
            )));
        }

        Ok(())
    }

    /// Finds the column a status belongs to (case-insensitive)
    pub fn column(&self, status: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.id.matches(status))
    }

    /// Column a task with the given status is placed in.
    ///
    /// Always returns the id as spelled in `columns`, including for the
    /// default column.
    pub fn column_for_status(&self, status: &str) -> &ColumnId {
        self.column(status)
            .or_else(|| self.column(self.default_column.as_str()))
            .map(|col| &col.id)
            .unwrap_or(&self.default_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board() {
        let config = BoardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.columns.len(), 4);
        assert_eq!(config.default_column.as_str(), "todo");
        assert_eq!(config.cancel_policy, CancelPolicy::Keep);
    }

    #[test]
    fn test_column_for_status_is_case_insensitive() {
        let config = BoardConfig::default();

        assert_eq!(config.column_for_status("IN_PROGRESS").as_str(), "in_progress");
        assert_eq!(config.column_for_status("Done").as_str(), "done");
        assert_eq!(config.column_for_status("blocked").as_str(), "todo");
        assert_eq!(config.column_for_status("").as_str(), "todo");
    }

    #[test]
    fn test_default_column_is_canonicalised() {
        let mut config = BoardConfig::default();
        config.default_column = ColumnId::from("DONE");
        assert!(config.validate().is_ok());

        assert_eq!(config.column_for_status("archived").as_str(), "done");
        assert_eq!(config.column_for_status("todo").as_str(), "todo");
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let result = BoardConfig::with_columns("b", &[("todo", "Todo"), ("TODO", "Again")]);
        assert!(matches!(result, Err(TaskboardError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_default() {
        let mut config = BoardConfig::default();
        config.default_column = ColumnId::from("backlog");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_columns_requires_columns() {
        assert!(BoardConfig::with_columns("empty", &[]).is_err());
    }

    #[test]
    fn test_toml_config() {
        let contents = r#"
name = "Sprint"
default_column = "backlog"
cancel_policy = "restore"

[[columns]]
id = "backlog"
title = "Backlog"

[[columns]]
id = "shipped"
title = "Shipped"
"#;

        let config = BoardConfig::from_toml_str(contents).unwrap();
        assert_eq!(config.name, "Sprint");
        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.cancel_policy, CancelPolicy::Restore);

        let written = config.to_toml_string().unwrap();
        assert_eq!(BoardConfig::from_toml_str(&written).unwrap(), config);
    }

    #[test]
    fn test_toml_cancel_policy_defaults_to_keep() {
        let contents = r#"
name = "Minimal"
default_column = "todo"

[[columns]]
id = "todo"
title = "Todo"
"#;

        let config = BoardConfig::from_toml_str(contents).unwrap();
        assert_eq!(config.cancel_policy, CancelPolicy::Keep);
    }
}
