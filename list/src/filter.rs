//! Completion filter for the visible list.

use crate::item::TodoItem;

/// Which subsequence of the collection is shown
///
/// Process-local UI state; never persisted and never sent to the remote
/// endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Every item in current order
    #[default]
    All,
    /// Only completed items
    Completed,
    /// Only uncompleted items
    Uncompleted,
}

impl Filter {
    /// Whether an item belongs to this filter's subsequence
    #[must_use]
    pub const fn admits(self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Completed => item.is_completed,
            Self::Uncompleted => !item.is_completed,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Completed => write!(f, "completed"),
            Self::Uncompleted => write!(f, "uncompleted"),
        }
    }
}
