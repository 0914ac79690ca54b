//! Actions processed by the todo list reducers.

use crate::error::ServiceError;
use crate::filter::Filter;
use crate::item::{TodoId, TodoItem};

/// All inputs to the todo list store
///
/// Commands are the UI intents; responses are the feedback actions produced
/// by the networked variant's effects when a service call completes. The
/// local reducer ignores responses (and `Refresh`), the remote reducer
/// handles everything.
#[derive(Clone, Debug)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Replace the active filter
    SetFilter(Filter),

    /// Create a todo with the given text
    ///
    /// Empty text is accepted and produces an item with empty text; callers
    /// are expected to disable the control instead.
    Create {
        /// Text of the new todo
        text: String,
    },

    /// Apply an in-place edit (text change or completion toggle)
    Update {
        /// The edited item
        item: TodoItem,
    },

    /// Remove a todo by id
    Remove {
        /// Id of the todo to remove
        id: TodoId,
    },

    /// Remove the todos at the given positions in the collection order
    RemoveAt {
        /// Positions into the current collection order
        positions: Vec<usize>,
    },

    /// Reorder: extract the items at `from` and reinsert the block at `to`
    ///
    /// Local-only in both variants; the ordering is never sent to the remote
    /// endpoint.
    Move {
        /// Source positions
        from: Vec<usize>,
        /// Destination, counted on the remaining items
        to: usize,
    },

    /// Fetch the collection from the remote endpoint (networked variant)
    Refresh,

    // ========== Responses ==========
    /// A list fetch completed
    Loaded {
        /// The fetched collection, or why the fetch failed
        result: Result<Vec<TodoItem>, ServiceError>,
    },

    /// A create request completed
    Created {
        /// The server's representation of the new item
        result: Result<TodoItem, ServiceError>,
    },

    /// An update request completed
    Updated {
        /// The server's representation of the edited item
        result: Result<TodoItem, ServiceError>,
    },

    /// A delete request completed
    Removed {
        /// The id the removal originally targeted
        id: TodoId,
        /// The deleted resource as returned by the server (confirmation only)
        result: Result<TodoItem, ServiceError>,
    },
}
