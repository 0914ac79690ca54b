//! Property tests for the derived views and collection algebra.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use todoflow_list::{Filter, Stats, TodoCollection, TodoId, TodoItem, TodoListState};

fn arb_item() -> impl Strategy<Value = TodoItem> {
    (".{0,20}", any::<bool>()).prop_map(|(text, is_completed)| {
        let mut item = TodoItem::new(TodoId::new(), text);
        item.is_completed = is_completed;
        item
    })
}

fn arb_collection() -> impl Strategy<Value = TodoCollection> {
    proptest::collection::vec(arb_item(), 0..16).prop_map(TodoCollection::from_items)
}

fn arb_filter() -> impl Strategy<Value = Filter> {
    prop_oneof![
        Just(Filter::All),
        Just(Filter::Completed),
        Just(Filter::Uncompleted),
    ]
}

/// `a` is a subsequence of `b`: every element of `a` appears in `b` in order.
fn is_subsequence(a: &[TodoItem], b: &[TodoItem]) -> bool {
    let mut rest = b.iter();
    a.iter().all(|needle| rest.any(|candidate| candidate == needle))
}

proptest! {
    #[test]
    fn filtered_is_ordered_subsequence(items in arb_collection(), filter in arb_filter()) {
        let mut state = TodoListState::with_items(items.clone());
        state.filter = filter;

        let filtered = state.filtered_items().to_vec();
        prop_assert!(is_subsequence(&filtered, items.as_slice()));
        prop_assert!(filtered.iter().all(|item| filter.admits(item)));
    }

    #[test]
    fn all_filter_is_identity(items in arb_collection()) {
        let mut state = TodoListState::with_items(items.clone());
        state.filter = Filter::All;

        prop_assert_eq!(state.filtered_items(), items.as_slice());
    }

    #[test]
    fn completed_and_uncompleted_partition(items in arb_collection()) {
        let mut state = TodoListState::with_items(items.clone());

        state.filter = Filter::Completed;
        let completed = state.filtered_count();
        state.filter = Filter::Uncompleted;
        let uncompleted = state.filtered_count();

        prop_assert_eq!(completed + uncompleted, items.len());
    }

    #[test]
    fn stats_counts_add_up(items in arb_collection()) {
        let stats = Stats::of(&items);

        prop_assert_eq!(stats.total, items.len());
        prop_assert_eq!(stats.total_completed + stats.total_uncompleted, stats.total);
        if stats.total == 0 {
            prop_assert!((stats.percent_completed - 0.0).abs() < f64::EPSILON);
        } else {
            prop_assert!((0.0..=1.0).contains(&stats.percent_completed));
        }
    }

    #[test]
    fn upsert_never_duplicates(items in arb_collection(), text in ".{0,20}") {
        let mut collection = items.clone();
        if let Some(existing) = items.iter().next() {
            let edited = TodoItem::new(existing.id.clone(), text);
            let position = items.iter().position(|item| item.id == existing.id);

            collection.upsert(edited.clone());

            prop_assert_eq!(collection.len(), items.len());
            prop_assert_eq!(
                collection.iter().position(|item| item.id == edited.id),
                position
            );
        }
    }

    #[test]
    fn move_preserves_membership(
        items in arb_collection(),
        from in proptest::collection::vec(0..32usize, 0..4),
        to in 0..32usize,
    ) {
        let mut moved = items.clone();
        moved.move_to(&from, to);

        prop_assert_eq!(moved.len(), items.len());
        for item in &items {
            prop_assert!(moved.contains(&item.id));
        }
    }

    #[test]
    fn filtering_never_mutates_order(items in arb_collection(), filter in arb_filter()) {
        let mut state = TodoListState::with_items(items.clone());
        state.filter = filter;
        let _ = state.filtered_items();

        prop_assert_eq!(state.items, items);
    }
}
