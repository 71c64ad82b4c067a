//! Fire-and-forget persistence of completed drops.
//!
//! The board hands commits to a [`MoveQueue`]; a [`StatusPersister`] drains
//! the queue on the async side and writes the new status of each moved task.
//! Failures are logged and never reach the board: the caller decides whether
//! to re-sync from storage.

use crate::{
    domain::Task,
    error::Result,
    kanban::{MoveCommit, MoveSink},
    storage::Storage,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A [`MoveSink`] that forwards commits over an unbounded channel
#[derive(Clone)]
pub struct MoveQueue {
    sender: UnboundedSender<MoveCommit>,
}

impl MoveQueue {
    pub fn channel() -> (Self, UnboundedReceiver<MoveCommit>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl MoveSink for MoveQueue {
    fn on_move(&mut self, commit: &MoveCommit) {
        if self.sender.send(commit.clone()).is_err() {
            tracing::warn!(item = %commit.item, "move queue closed; commit dropped");
        }
    }
}

/// Writes column membership of moved tasks back to storage.
///
/// Only the status is persisted; in-column order is not.
pub struct StatusPersister<S> {
    storage: S,
}

impl<S: Storage> StatusPersister<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Applies one commit, returning the task as stored afterwards
    pub async fn apply(&self, commit: &MoveCommit) -> Result<Task> {
        let mut task = self.storage.load_task(&commit.item).await?;
        if task.set_status(commit.column.as_str()) {
            self.storage.save_task(&task).await?;
        }
        Ok(task)
    }

    /// Drains the queue until every sender is gone.
    ///
    /// Returns how many commits were applied successfully.
    pub async fn run(self, mut receiver: UnboundedReceiver<MoveCommit>) -> usize {
        let mut applied = 0;
        while let Some(commit) = receiver.recv().await {
            match self.apply(&commit).await {
                Ok(_) => applied += 1,
                Err(e) => tracing::warn!(
                    item = %commit.item,
                    column = %commit.column,
                    error = %e,
                    "failed to persist move"
                ),
            }
        }
        applied
    }

    pub fn into_inner(self) -> S {
        self.storage
    }
}
