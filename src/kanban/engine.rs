use crate::domain::BoardConfig;
use crate::error::Result;

use super::commit::{CommitEmitter, MoveSink};
use super::session::{self, DragEvent, DragSession, Outcome};
use super::state::{BoardItem, BoardState};

/// A kanban board that accepts drag gestures.
///
/// Owns the board layout and the drag session. Every event is handled
/// synchronously; completed drops are handed to the sink exactly once.
pub struct KanbanBoard<S> {
    config: BoardConfig,
    state: BoardState,
    session: DragSession,
    emitter: CommitEmitter<S>,
}

impl<S: MoveSink> KanbanBoard<S> {
    /// Creates an empty board after validating its configuration
    pub fn new(config: BoardConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: BoardState::empty(&config),
            config,
            session: DragSession::Idle,
            emitter: CommitEmitter::new(sink),
        })
    }

    pub fn with_items<I: BoardItem>(config: BoardConfig, items: &[I], sink: S) -> Result<Self> {
        let mut board = Self::new(config, sink)?;
        board.sync(items);
        Ok(board)
    }

    /// Rebuilds the layout from a fresh upstream list.
    ///
    /// Local ordering is discarded. A drag in progress continues if its item
    /// is still present.
    pub fn sync<I: BoardItem>(&mut self, items: &[I]) {
        self.state = BoardState::build(&self.config, items);
        let was_dragging = self.session.is_dragging();
        self.session = std::mem::take(&mut self.session).rebase(&self.state);
        if was_dragging && !self.session.is_dragging() {
            tracing::debug!("dragged item vanished after refresh; drag ended");
        }
        tracing::debug!(items = self.state.len(), "board rebuilt");
    }

    pub fn begin(&mut self, item: &str) -> Outcome {
        self.dispatch(DragEvent::Begin {
            item: item.to_string(),
        })
    }

    pub fn over(&mut self, target: &str, below: bool) -> Outcome {
        self.dispatch(DragEvent::Over {
            target: target.to_string(),
            below,
        })
    }

    pub fn end(&mut self, target: Option<&str>) -> Outcome {
        self.dispatch(DragEvent::End {
            target: target.map(str::to_string),
        })
    }

    pub fn cancel(&mut self) -> Outcome {
        self.dispatch(DragEvent::Cancel)
    }

    /// Runs one event through the session state machine
    pub fn dispatch(&mut self, event: DragEvent) -> Outcome {
        let session = std::mem::take(&mut self.session);
        let board = std::mem::take(&mut self.state);
        let step = session::step(session, board, event, self.config.cancel_policy);
        self.session = step.session;
        self.state = step.board;

        match &step.outcome {
            Outcome::Started {
                item,
                column,
                index,
            } => tracing::debug!(item = %item, column = %column, index, "drag started"),
            Outcome::Moved { column, index } => {
                tracing::debug!(column = %column, index, "drag moved")
            }
            Outcome::Unchanged => {}
            Outcome::Dropped(commit) => self.emitter.emit(commit),
            Outcome::Abandoned(reason) => tracing::debug!(%reason, "drop abandoned"),
            Outcome::Cancelled { restored } => tracing::debug!(restored, "drag cancelled"),
            Outcome::Ignored(reason) => tracing::debug!(%reason, "drag event ignored"),
        }

        step.outcome
    }

    /// Read-only layout for rendering
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Number of completed drops
    pub fn commits(&self) -> u64 {
        self.emitter.emitted()
    }

    pub fn sink(&self) -> &S {
        self.emitter.sink()
    }

    pub fn into_sink(self) -> S {
        self.emitter.into_sink()
    }
}
