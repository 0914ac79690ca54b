//! Todo item and its identifier.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a todo item
///
/// Immutable once created; it is the identity key of the collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
///
/// Matches the wire shape of the collection endpoint:
/// `{ "id": "<uuid>", "text": "...", "isCompleted": bool }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Free-form text of the todo
    pub text: String,
    /// Whether the todo is completed
    pub is_completed: bool,
}

impl TodoItem {
    /// Creates a new, uncompleted todo item
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_completed: false,
        }
    }

    /// Flips the completion flag
    pub const fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}
