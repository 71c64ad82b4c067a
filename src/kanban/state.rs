use crate::domain::{BoardConfig, ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::reorder::ReorderPlan;

/// Anything that can be placed on the board
pub trait BoardItem {
    fn item_id(&self) -> &TaskId;
    fn item_status(&self) -> &str;
}

impl BoardItem for Task {
    fn item_id(&self) -> &TaskId {
        &self.id
    }

    fn item_status(&self) -> &str {
        &self.status
    }
}

impl<T: BoardItem + ?Sized> BoardItem for &T {
    fn item_id(&self) -> &TaskId {
        (**self).item_id()
    }

    fn item_status(&self) -> &str {
        (**self).item_status()
    }
}

/// A column together with the ordered ids it currently holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSlot {
    pub id: ColumnId,
    pub title: String,
    items: Vec<TaskId>,
}

impl ColumnSlot {
    pub fn items(&self) -> &[TaskId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The partition of item ids across the board's columns.
///
/// Every id appears in exactly one column. The engine owns the only mutable
/// handle; renderers read it through [`BoardState::columns`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    columns: Vec<ColumnSlot>,
}

impl BoardState {
    /// Empty columns in configuration order
    pub fn empty(config: &BoardConfig) -> Self {
        Self {
            columns: config
                .columns
                .iter()
                .map(|col| ColumnSlot {
                    id: col.id.clone(),
                    title: col.title.clone(),
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    /// Partitions the upstream list by status, keeping upstream order inside
    /// each column. Repeated ids keep their first occurrence.
    pub fn build<I: BoardItem>(config: &BoardConfig, items: &[I]) -> Self {
        let mut state = Self::empty(config);
        let mut seen = HashSet::new();

        for item in items {
            let id = item.item_id();
            if !seen.insert(id.clone()) {
                tracing::warn!(item = %id, "duplicate item in upstream list; keeping first");
                continue;
            }
            if state.columns.iter().any(|slot| slot.id.as_str() == id.as_str()) {
                tracing::warn!(item = %id, "item id equals a column id; it cannot be dragged");
            }

            let column = config.column_for_status(item.item_status());
            // An unvalidated config may name a missing default; use the first column
            let slot = state
                .columns
                .iter()
                .position(|slot| &slot.id == column)
                .unwrap_or(0);
            if let Some(slot) = state.columns.get_mut(slot) {
                slot.items.push(id.clone());
            }
        }

        state
    }

    pub fn columns(&self) -> &[ColumnSlot] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&ColumnSlot> {
        self.columns.iter().find(|slot| &slot.id == id)
    }

    /// Ids held by the column with the given id
    pub fn items(&self, column: &str) -> Option<&[TaskId]> {
        self.columns
            .iter()
            .find(|slot| slot.id.as_str() == column)
            .map(ColumnSlot::items)
    }

    /// Column and index currently holding `item`
    pub fn position(&self, item: &TaskId) -> Option<(&ColumnId, usize)> {
        self.columns.iter().find_map(|slot| {
            slot.items
                .iter()
                .position(|id| id == item)
                .map(|index| (&slot.id, index))
        })
    }

    pub fn contains(&self, item: &TaskId) -> bool {
        self.position(item).is_some()
    }

    /// Total number of items on the board
    pub fn len(&self) -> usize {
        self.columns.iter().map(ColumnSlot::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All ids, column by column
    pub fn item_ids(&self) -> impl Iterator<Item = &TaskId> {
        self.columns.iter().flat_map(|slot| slot.items.iter())
    }

    /// Replaces the sequences of the columns a plan touches
    pub(crate) fn apply(&mut self, plan: ReorderPlan) {
        for (column, items) in plan.changes {
            if let Some(slot) = self.columns.iter_mut().find(|slot| slot.id == column) {
                slot.items = items;
            }
        }
    }
}
