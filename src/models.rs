//! Domain model that mirrors the `todo_items` table. It stays a plain data
//! holder so the store can focus on SQL and the UI on presentation.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single entry on the task list.
pub struct TodoItem {
    /// Primary key assigned by SQLite. Never reused after a delete.
    pub id: i64,
    /// Free-form text shown in the list.
    pub content: String,
    /// Stored as a 0/1 integer column.
    pub completed: bool,
}

impl TodoItem {
    /// Checkbox marker used in front of the content on the list screen.
    pub fn checkbox(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

impl fmt::Display for TodoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.checkbox(), self.content)
    }
}
