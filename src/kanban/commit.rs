use crate::domain::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// The single notification sent for a completed drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommit {
    pub item: TaskId,
    /// New column, which is also the item's new status
    pub column: ColumnId,
    /// Final position inside the column; informational only
    pub index: usize,
}

/// Receiver of move notifications.
///
/// Implementations must not block: persistence happens elsewhere and its
/// outcome is never reported back to the board.
pub trait MoveSink {
    fn on_move(&mut self, commit: &MoveCommit);
}

impl<F> MoveSink for F
where
    F: FnMut(&MoveCommit),
{
    fn on_move(&mut self, commit: &MoveCommit) {
        self(commit)
    }
}

impl MoveSink for Vec<MoveCommit> {
    fn on_move(&mut self, commit: &MoveCommit) {
        self.push(commit.clone());
    }
}

/// Hands finished drops to a [`MoveSink`], once each
pub struct CommitEmitter<S> {
    sink: S,
    emitted: u64,
}

impl<S: MoveSink> CommitEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, emitted: 0 }
    }

    pub fn emit(&mut self, commit: &MoveCommit) {
        tracing::info!(
            item = %commit.item,
            column = %commit.column,
            index = commit.index,
            "committing move"
        );
        self.sink.on_move(commit);
        self.emitted += 1;
    }

    /// Number of commits emitted so far
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(item: &str, column: &str, index: usize) -> MoveCommit {
        MoveCommit {
            item: TaskId::from(item),
            column: ColumnId::from(column),
            index,
        }
    }

    #[test]
    fn test_emitter_forwards_to_closure() {
        let mut seen = Vec::new();
        {
            let mut emitter = CommitEmitter::new(|c: &MoveCommit| seen.push(c.item.to_string()));
            emitter.emit(&commit("A", "done", 0));
            emitter.emit(&commit("B", "todo", 2));
            assert_eq!(emitter.emitted(), 2);
        }
        assert_eq!(seen, vec!["A", "B"]);
    }

    #[test]
    fn test_vec_sink_collects_commits() {
        let mut emitter = CommitEmitter::new(Vec::new());
        emitter.emit(&commit("A", "in_progress", 1));

        assert_eq!(emitter.sink().len(), 1);
        assert_eq!(emitter.into_sink()[0], commit("A", "in_progress", 1));
    }

    #[test]
    fn test_commit_serialization() {
        let json = serde_json::to_string(&commit("A", "done", 3)).unwrap();
        assert_eq!(json, r#"{"item":"A","column":"done","index":3}"#);
    }
}
