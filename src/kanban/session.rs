//! The drag session state machine.
//!
//! A session is a plain value. [`step`] consumes the current session, the
//! current board and one event, and returns the next session, the next board
//! and what happened. Nothing here touches the outside world, so gestures can
//! be replayed deterministically.

use crate::domain::{CancelPolicy, ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::commit::MoveCommit;
use super::reorder::{self, ReorderRequest};
use super::resolver::{resolve, Resolved};
use super::state::BoardState;

/// Input events, abstracted from whatever pointer or keyboard layer drives them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragEvent {
    Begin {
        item: String,
    },
    Over {
        target: String,
        #[serde(default)]
        below: bool,
    },
    End {
        target: Option<String>,
    },
    Cancel,
}

/// Last hover applied to the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hover {
    pub target: String,
    pub below: bool,
}

/// An in-flight drag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDrag {
    pub item: TaskId,
    /// Column the item was in when the drag began
    pub source: ColumnId,
    /// Column the item is in now
    pub target: ColumnId,
    /// Index the item is at now
    pub index: usize,
    pub last_hover: Option<Hover>,
    snapshot: BoardState,
}

impl ActiveDrag {
    /// Board layout captured when the drag began
    pub fn snapshot(&self) -> &BoardState {
        &self.snapshot
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragSession {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

impl DragSession {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match self {
            Self::Dragging(drag) => Some(drag),
            Self::Idle => None,
        }
    }

    /// Carries the session over to a freshly rebuilt board.
    ///
    /// The drag survives when its item is still on the board; the snapshot
    /// becomes the new board. Otherwise the session ends.
    pub fn rebase(self, board: &BoardState) -> Self {
        let Self::Dragging(mut drag) = self else {
            return Self::Idle;
        };
        let Some((column, index)) = board.position(&drag.item) else {
            return Self::Idle;
        };

        drag.target = column.clone();
        drag.index = index;
        drag.last_hover = None;
        drag.snapshot = board.clone();
        Self::Dragging(drag)
    }
}

/// Why an event left the board untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragRejection {
    #[error("a drag of '{0}' is already in progress")]
    AlreadyDragging(TaskId),

    #[error("no drag in progress")]
    NotDragging,

    #[error("'{0}' is not an item on the board")]
    NotAnItem(String),

    #[error("'{0}' matches no column or item")]
    UnresolvableTarget(String),

    #[error("drop had no target")]
    NoDropTarget,
}

/// What a single event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Started {
        item: TaskId,
        column: ColumnId,
        index: usize,
    },
    Moved {
        column: ColumnId,
        index: usize,
    },
    /// A hover that changed nothing
    Unchanged,
    Dropped(MoveCommit),
    /// The drop could not be resolved; the session ended without a commit
    Abandoned(DragRejection),
    Cancelled {
        restored: bool,
    },
    /// The event was rejected; session and board are as they were
    Ignored(DragRejection),
}

impl Outcome {
    pub fn commit(&self) -> Option<&MoveCommit> {
        match self {
            Self::Dropped(commit) => Some(commit),
            _ => None,
        }
    }
}

/// Result of one transition
#[derive(Debug, Clone)]
pub struct Step {
    pub session: DragSession,
    pub board: BoardState,
    pub outcome: Outcome,
}

impl Step {
    fn new(session: DragSession, board: BoardState, outcome: Outcome) -> Self {
        Self {
            session,
            board,
            outcome,
        }
    }
}

/// `(session, board, event) -> (session', board', outcome)`
pub fn step(
    session: DragSession,
    board: BoardState,
    event: DragEvent,
    cancel_policy: CancelPolicy,
) -> Step {
    match (session, event) {
        (DragSession::Idle, DragEvent::Begin { item }) => begin(board, item),
        (DragSession::Idle, _) => Step::new(
            DragSession::Idle,
            board,
            Outcome::Ignored(DragRejection::NotDragging),
        ),
        (DragSession::Dragging(drag), DragEvent::Begin { .. }) => {
            let rejection = DragRejection::AlreadyDragging(drag.item.clone());
            Step::new(
                DragSession::Dragging(drag),
                board,
                Outcome::Ignored(rejection),
            )
        }
        (DragSession::Dragging(drag), DragEvent::Over { target, below }) => {
            over(drag, board, Hover { target, below })
        }
        (DragSession::Dragging(drag), DragEvent::End { target }) => end(drag, board, target),
        (DragSession::Dragging(drag), DragEvent::Cancel) => cancel(drag, board, cancel_policy),
    }
}

fn begin(board: BoardState, item: String) -> Step {
    let start = match resolve(&board, &item) {
        Some(Resolved::Item { column, index }) => Some((column.clone(), index)),
        _ => None,
    };
    let Some((column, index)) = start else {
        return Step::new(
            DragSession::Idle,
            board,
            Outcome::Ignored(DragRejection::NotAnItem(item)),
        );
    };

    let item = TaskId::from(item.as_str());
    let drag = ActiveDrag {
        item: item.clone(),
        source: column.clone(),
        target: column.clone(),
        index,
        last_hover: None,
        snapshot: board.clone(),
    };
    Step::new(
        DragSession::Dragging(drag),
        board,
        Outcome::Started {
            item,
            column,
            index,
        },
    )
}

/// Resolves `target` and applies the resulting plan.
///
/// Returns `false` when the target is unknown.
fn relocate(board: &mut BoardState, item: &TaskId, target: &str, below: bool) -> bool {
    let plan = {
        let Some(resolved) = resolve(board, target) else {
            return false;
        };
        let over_item = match resolved {
            Resolved::Item { .. } => Some(TaskId::from(target)),
            Resolved::Column(_) => None,
        };
        reorder::plan(
            board,
            &ReorderRequest {
                active: item,
                over_column: resolved.column(),
                over_item: over_item.as_ref(),
                below,
            },
        )
    };

    if let Some(plan) = plan {
        board.apply(plan);
    }
    true
}

fn over(mut drag: ActiveDrag, mut board: BoardState, hover: Hover) -> Step {
    // Pointer jitter over the same target must not re-apply the move
    if drag.last_hover.as_ref() == Some(&hover) {
        return Step::new(DragSession::Dragging(drag), board, Outcome::Unchanged);
    }

    if !relocate(&mut board, &drag.item, &hover.target, hover.below) {
        let rejection = DragRejection::UnresolvableTarget(hover.target);
        return Step::new(
            DragSession::Dragging(drag),
            board,
            Outcome::Ignored(rejection),
        );
    }

    let outcome = match board.position(&drag.item) {
        Some((column, index)) if *column != drag.target || index != drag.index => {
            drag.target = column.clone();
            drag.index = index;
            Outcome::Moved {
                column: column.clone(),
                index,
            }
        }
        _ => Outcome::Unchanged,
    };
    drag.last_hover = Some(hover);
    Step::new(DragSession::Dragging(drag), board, outcome)
}

fn end(drag: ActiveDrag, mut board: BoardState, target: Option<String>) -> Step {
    let Some(target) = target else {
        return Step::new(
            DragSession::Idle,
            board,
            Outcome::Abandoned(DragRejection::NoDropTarget),
        );
    };

    // The last hover already laid the board out for this target
    let applied = drag
        .last_hover
        .as_ref()
        .is_some_and(|hover| hover.target == target);

    if !applied && !relocate(&mut board, &drag.item, &target, false) {
        return Step::new(
            DragSession::Idle,
            board,
            Outcome::Abandoned(DragRejection::UnresolvableTarget(target)),
        );
    }

    let (column, index) = match board.position(&drag.item) {
        Some((column, index)) => (column.clone(), index),
        None => (drag.target, drag.index),
    };
    let commit = MoveCommit {
        item: drag.item,
        column,
        index,
    };
    Step::new(DragSession::Idle, board, Outcome::Dropped(commit))
}

fn cancel(drag: ActiveDrag, board: BoardState, policy: CancelPolicy) -> Step {
    match policy {
        CancelPolicy::Restore => Step::new(
            DragSession::Idle,
            drag.snapshot,
            Outcome::Cancelled { restored: true },
        ),
        CancelPolicy::Keep => Step::new(
            DragSession::Idle,
            board,
            Outcome::Cancelled { restored: false },
        ),
    }
}
