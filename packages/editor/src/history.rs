//! # Undo/Redo History
//!
//! One linear history for the whole session, not per node.
//!
//! ## Design
//!
//! - Each command records both sides (`from` and `to`) when it is pushed
//! - Undo re-applies `from` of the newest live command and moves the cursor back
//! - Redo re-applies `to` and moves the cursor forward
//! - Pushing after an undo drops the redo tail
//! - Bounded: the oldest entry is dropped past the limit
//!
//! The history only records; the session applies.

use serde::{Deserialize, Serialize};
use storefront_content::{ElementId, Offset};

/// A reversible user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    Move { id: ElementId, from: Offset, to: Offset },
    Text { id: ElementId, from: String, to: String },
}

impl Command {
    pub fn id(&self) -> &ElementId {
        match self {
            Command::Move { id, .. } | Command::Text { id, .. } => id,
        }
    }

    /// Whether applying the command would change anything
    pub fn is_noop(&self) -> bool {
        match self {
            Command::Move { from, to, .. } => from == to,
            Command::Text { from, to, .. } => from == to,
        }
    }
}

/// Which side of a command to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

#[derive(Debug)]
pub struct History {
    entries: Vec<Command>,
    /// Number of entries currently applied
    cursor: usize,
    /// Maximum number of entries (0 = unlimited)
    limit: usize,
}

impl History {
    /// History with the default limit (100)
    pub fn new() -> Self {
        Self::with_limit(100)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit,
        }
    }

    /// Record a command. No-op commands are not recorded.
    pub fn push(&mut self, command: Command) -> bool {
        if command.is_noop() {
            return false;
        }

        self.entries.truncate(self.cursor);
        self.entries.push(command);

        if self.limit > 0 && self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len();
        true
    }

    /// Step back, returning the command whose `from` side should be applied
    pub fn undo(&mut self) -> Option<&Command> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward, returning the command whose `to` side should be applied
    pub fn redo(&mut self) -> Option<&Command> {
        let command = self.entries.get(self.cursor)?;
        self.cursor += 1;
        Some(command)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    pub fn redo_levels(&self) -> usize {
        self.entries.len() - self.cursor
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
