//! Aggregate statistics derived from the collection.

use crate::collection::TodoCollection;

/// Derived counts over the whole collection (the filter plays no part)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    /// Count of items
    pub total: usize,
    /// Count of completed items
    pub total_completed: usize,
    /// `total - total_completed`
    pub total_uncompleted: usize,
    /// `total_completed / total`, `0.0` for an empty collection
    pub percent_completed: f64,
}

impl Stats {
    /// Compute stats for a collection
    #[must_use]
    pub fn of(items: &TodoCollection) -> Self {
        let total = items.len();
        let total_completed = items.iter().filter(|item| item.is_completed).count();

        // Note: Precision loss acceptable for a display ratio
        #[allow(clippy::cast_precision_loss)]
        let percent_completed = if total == 0 {
            0.0
        } else {
            total_completed as f64 / total as f64
        };

        Self {
            total,
            total_completed,
            total_uncompleted: total - total_completed,
            percent_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{TodoId, TodoItem};

    #[test]
    fn empty_collection_has_zero_percent() {
        let stats = Stats::of(&TodoCollection::new());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.total_completed, 0);
        assert_eq!(stats.total_uncompleted, 0);
        assert!((stats.percent_completed - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_add_up() {
        let items: TodoCollection = (0..4)
            .map(|n| {
                let mut item = TodoItem::new(TodoId::new(), format!("todo {n}"));
                item.is_completed = n % 2 == 0;
                item
            })
            .collect();

        let stats = Stats::of(&items);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.total_completed + stats.total_uncompleted, stats.total);
        assert!((stats.percent_completed - 0.5).abs() < f64::EPSILON);
    }
}
