use crate::domain::ColumnId;

use super::state::BoardState;

/// Where an event target lives on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The id names a column (empty space inside it)
    Column(&'a ColumnId),
    /// The id names an item held by `column` at `index`
    Item { column: &'a ColumnId, index: usize },
}

impl<'a> Resolved<'a> {
    pub fn column(&self) -> &'a ColumnId {
        match *self {
            Self::Column(column) => column,
            Self::Item { column, .. } => column,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

/// Finds the column currently holding `id`.
///
/// Column ids win over item ids. `None` means the id is unknown and the
/// caller should treat the event as a no-op.
pub fn resolve<'a>(board: &'a BoardState, id: &str) -> Option<Resolved<'a>> {
    if let Some(slot) = board.columns().iter().find(|slot| slot.id.as_str() == id) {
        return Some(Resolved::Column(&slot.id));
    }

    board.columns().iter().find_map(|slot| {
        slot.items()
            .iter()
            .position(|item| item.as_str() == id)
            .map(|index| Resolved::Item {
                column: &slot.id,
                index,
            })
    })
}
