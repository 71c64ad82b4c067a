//! Pure computation of the board layout produced by one hover or drop.

use crate::domain::{ColumnId, TaskId};

use super::state::BoardState;

/// A single relocation request
#[derive(Debug, Clone, Copy)]
pub struct ReorderRequest<'a> {
    /// The item being dragged
    pub active: &'a TaskId,
    /// Column under the pointer
    pub over_column: &'a ColumnId,
    /// Item under the pointer, `None` for empty column space
    pub over_item: Option<&'a TaskId>,
    /// The dragged box's top edge is below the hovered item's midpoint
    pub below: bool,
}

/// New sequences for the touched columns, plus where the item ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    pub changes: Vec<(ColumnId, Vec<TaskId>)>,
    pub column: ColumnId,
    pub index: usize,
}

/// Moves the element at `from` to `to`, shifting the ones in between by one slot.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

/// Index at which an item entering `target` is inserted.
///
/// Empty space and unknown hover items append; otherwise the item goes in
/// front of the hovered one, or after it when `below` is set.
pub fn insertion_index(target: &[TaskId], over_item: Option<&TaskId>, below: bool) -> usize {
    let len = target.len();
    match over_item.and_then(|over| target.iter().position(|id| id == over)) {
        Some(over_index) if below => (over_index + 1).min(len),
        Some(over_index) => over_index,
        None => len,
    }
}

/// Computes the layout for `request`, or `None` when nothing moves.
pub fn plan(board: &BoardState, request: &ReorderRequest<'_>) -> Option<ReorderPlan> {
    let (active_column, active_index) = board.position(request.active)?;

    if active_column == request.over_column {
        let over_item = request.over_item.filter(|id| *id != request.active)?;
        let items = board.column(active_column)?.items();
        let over_index = items.iter().position(|id| id == over_item)?;
        if over_index == active_index {
            return None;
        }

        let mut reordered = items.to_vec();
        array_move(&mut reordered, active_index, over_index);
        return Some(ReorderPlan {
            changes: vec![(active_column.clone(), reordered)],
            column: active_column.clone(),
            index: over_index,
        });
    }

    let source = board.column(active_column)?.items();
    let target = board.column(request.over_column)?.items();
    let index = insertion_index(target, request.over_item, request.below);

    let mut source_items = source.to_vec();
    source_items.remove(active_index);
    let mut target_items = target.to_vec();
    target_items.insert(index, request.active.clone());

    Some(ReorderPlan {
        changes: vec![
            (active_column.clone(), source_items),
            (request.over_column.clone(), target_items),
        ],
        column: request.over_column.clone(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardConfig, Task};

    fn board(layout: &[(&str, &[&str])]) -> BoardState {
        let config = BoardConfig::with_columns(
            "test",
            &[("todo", "Todo"), ("in_progress", "In Progress"), ("done", "Done")],
        )
        .unwrap();
        let tasks: Vec<Task> = layout
            .iter()
            .flat_map(|(status, ids)| {
                ids.iter().map(move |id| {
                    let mut task = Task::new(TaskId::from(*id), id.to_string());
                    task.set_status(status);
                    task
                })
            })
            .collect();
        BoardState::build(&config, &tasks)
    }

    fn ids(v: &[TaskId]) -> Vec<&str> {
        v.iter().map(TaskId::as_str).collect()
    }

    #[test]
    fn test_array_move_forward_and_back() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        array_move(&mut v, 0, 2);
        assert_eq!(v, vec!['b', 'c', 'a', 'd']);

        let mut v = vec!['a', 'b', 'c', 'd'];
        array_move(&mut v, 3, 1);
        assert_eq!(v, vec!['a', 'd', 'b', 'c']);

        let mut v = vec!['a', 'b', 'c'];
        array_move(&mut v, 1, 1);
        assert_eq!(v, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_array_move_out_of_range() {
        let mut v = vec![1, 2, 3];
        array_move(&mut v, 5, 0);
        assert_eq!(v, vec![1, 2, 3]);

        array_move(&mut v, 0, 10);
        assert_eq!(v, vec![2, 3, 1]);
    }

    #[test]
    fn test_insertion_index() {
        let target = vec![TaskId::from("X"), TaskId::from("Y")];
        let x = TaskId::from("X");
        let y = TaskId::from("Y");
        let gone = TaskId::from("Z");

        assert_eq!(insertion_index(&target, None, false), 2);
        assert_eq!(insertion_index(&target, Some(&x), false), 0);
        assert_eq!(insertion_index(&target, Some(&x), true), 1);
        assert_eq!(insertion_index(&target, Some(&y), true), 2);
        assert_eq!(insertion_index(&target, Some(&gone), false), 2);
        assert_eq!(insertion_index(&[], None, true), 0);
    }

    #[test]
    fn test_same_column_moves_forward() {
        let board = board(&[("todo", &["A", "B", "C"])]);
        let a = TaskId::from("A");
        let c = TaskId::from("C");
        let todo = ColumnId::from("todo");

        let plan = plan(
            &board,
            &ReorderRequest {
                active: &a,
                over_column: &todo,
                over_item: Some(&c),
                below: false,
            },
        )
        .unwrap();

        assert_eq!(plan.index, 2);
        assert_eq!(plan.changes.len(), 1);
        assert_eq!(ids(&plan.changes[0].1), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_same_column_moves_backward() {
        let board = board(&[("todo", &["A", "B", "C"])]);
        let a = TaskId::from("A");
        let c = TaskId::from("C");
        let todo = ColumnId::from("todo");

        let plan = plan(
            &board,
            &ReorderRequest {
                active: &c,
                over_column: &todo,
                over_item: Some(&a),
                below: true,
            },
        )
        .unwrap();

        assert_eq!(plan.index, 0);
        assert_eq!(ids(&plan.changes[0].1), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_same_column_noops() {
        let board = board(&[("todo", &["A", "B"])]);
        let a = TaskId::from("A");
        let todo = ColumnId::from("todo");

        // Hovering itself
        let request = ReorderRequest {
            active: &a,
            over_column: &todo,
            over_item: Some(&a),
            below: false,
        };
        assert!(plan(&board, &request).is_none());

        // Empty space of its own column
        let request = ReorderRequest {
            over_item: None,
            ..request
        };
        assert!(plan(&board, &request).is_none());
    }

    #[test]
    fn test_cross_column_into_empty_space_appends() {
        let board = board(&[("todo", &["A", "B"]), ("done", &["X"])]);
        let a = TaskId::from("A");
        let done = ColumnId::from("done");

        let plan = plan(
            &board,
            &ReorderRequest {
                active: &a,
                over_column: &done,
                over_item: None,
                below: false,
            },
        )
        .unwrap();

        assert_eq!(plan.column, done);
        assert_eq!(plan.index, 1);
        assert_eq!(ids(&plan.changes[0].1), vec!["B"]);
        assert_eq!(ids(&plan.changes[1].1), vec!["X", "A"]);
    }

    #[test]
    fn test_cross_column_respects_geometry() {
        let board = board(&[("todo", &["A"]), ("done", &["X", "Y"])]);
        let a = TaskId::from("A");
        let x = TaskId::from("X");
        let done = ColumnId::from("done");

        let above = ReorderRequest {
            active: &a,
            over_column: &done,
            over_item: Some(&x),
            below: false,
        };
        let plan_above = plan(&board, &above).unwrap();
        assert_eq!(plan_above.index, 0);
        assert_eq!(ids(&plan_above.changes[1].1), vec!["A", "X", "Y"]);

        let plan_below = plan(&board, &ReorderRequest { below: true, ..above }).unwrap();
        assert_eq!(plan_below.index, 1);
        assert_eq!(ids(&plan_below.changes[1].1), vec!["X", "A", "Y"]);
    }

    #[test]
    fn test_unknown_active_item_is_noop() {
        let board = board(&[("todo", &["A"])]);
        let ghost = TaskId::from("ghost");
        let todo = ColumnId::from("todo");

        let request = ReorderRequest {
            active: &ghost,
            over_column: &todo,
            over_item: None,
            below: false,
        };
        assert!(plan(&board, &request).is_none());
    }
}
