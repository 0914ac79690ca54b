//! Shared state of the todo list store.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::collection::TodoCollection;
use crate::filter::Filter;
use crate::item::TodoItem;
use crate::stats::Stats;

/// Lifecycle of the remote listing
///
/// Only the networked variant moves this; the local variant stays `Idle`.
/// Terminal states are not sticky: another refresh re-enters `Loading`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No fetch has been issued yet
    #[default]
    Idle,
    /// A list fetch is in flight
    Loading,
    /// The last fetch completed and replaced the collection
    Success,
    /// The last fetch failed; carries a user-readable message
    Failure(String),
}

impl Phase {
    /// Whether a fetch is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Memoized filtered view
///
/// A plain pure-function cache keyed on a fingerprint of `(items, filter)`:
/// the subsequence is only rebuilt when that fingerprint changes, so reads
/// triggered by unrelated updates cost a hash, not a re-derivation.
#[derive(Clone, Debug, Default)]
struct FilteredCache {
    key: Option<u64>,
    view: Vec<TodoItem>,
}

/// State of the todo list store
///
/// Holds the authoritative in-memory collection, the active filter, and the
/// remote-listing phase. Derived views ([`TodoListState::filtered_items`],
/// [`TodoListState::stats`]) are computed from these on demand.
#[derive(Clone, Debug, Default)]
pub struct TodoListState {
    /// The ordered, identity-keyed collection
    pub items: TodoCollection,
    /// The active completion filter
    pub filter: Filter,
    /// Remote-listing lifecycle (networked variant only)
    pub phase: Phase,
    cache: FilteredCache,
}

impl TodoListState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state seeded with the given collection
    #[must_use]
    pub fn with_items(items: TodoCollection) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// The filtered subsequence for the current filter, in collection order
    ///
    /// Memoized on `(items, filter)`; the returned slice is restartable (it
    /// can be iterated any number of times) and stays valid until the next
    /// mutation of `self`.
    pub fn filtered_items(&mut self) -> &[TodoItem] {
        let key = self.fingerprint();
        if self.cache.key != Some(key) {
            self.cache.view = self
                .items
                .iter()
                .filter(|item| self.filter.admits(item))
                .cloned()
                .collect();
            self.cache.key = Some(key);
        }
        &self.cache.view
    }

    /// Count of items admitted by the current filter
    ///
    /// This is the navigation label of the list view.
    pub fn filtered_count(&mut self) -> usize {
        self.filtered_items().len()
    }

    /// Aggregate stats over the whole collection
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::of(&self.items)
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.items.hash(&mut hasher);
        self.filter.hash(&mut hasher);
        hasher.finish()
    }
}
