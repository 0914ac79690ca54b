//! Walkthrough of the purely local variant.
//!
//! Seeds a store, then exercises create, toggle, filter, stats, reorder, and
//! remove, printing the visible list between steps.

use todoflow_list::mocks::sample_items;
use todoflow_list::{
    Filter, LocalEnvironment, LocalTodoReducer, TodoAction, TodoCollection, TodoListState,
};
use todoflow_runtime::Store;

type LocalStore = Store<TodoListState, TodoAction, LocalEnvironment, LocalTodoReducer>;

async fn print_list(store: &LocalStore, heading: &str) {
    let mut state = store.state(Clone::clone).await;
    println!("\n{heading} ({} shown, filter: {})", state.filtered_count(), state.filter);
    for item in state.filtered_items() {
        let mark = if item.is_completed { "✓" } else { " " };
        println!("  [{mark}] {}", item.text);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Todoflow: local variant ===");

    let store = Store::new(
        TodoListState::with_items(TodoCollection::from_items(sample_items())),
        LocalTodoReducer::new(),
        LocalEnvironment,
    );
    print_list(&store, "Seeded").await;

    // Create a todo.
    store
        .send(TodoAction::Create {
            text: "Water the plants".to_string(),
        })
        .await?;
    print_list(&store, "After create").await;

    // Toggle the first visible item.
    if let Some(mut item) = store.state(|s| s.items.get(0).cloned()).await {
        item.toggle();
        store.send(TodoAction::Update { item }).await?;
    }
    print_list(&store, "After toggle").await;

    // Only completed items.
    store.send(TodoAction::SetFilter(Filter::Completed)).await?;
    print_list(&store, "Completed only").await;

    store.send(TodoAction::SetFilter(Filter::All)).await?;

    // Drag the first item below the third.
    store
        .send(TodoAction::Move {
            from: vec![0],
            to: 2,
        })
        .await?;
    print_list(&store, "After reorder").await;

    // Remove the last item.
    let last = store.state(|s| s.items.len().saturating_sub(1)).await;
    store
        .send(TodoAction::RemoveAt {
            positions: vec![last],
        })
        .await?;
    print_list(&store, "After remove").await;

    let stats = store.state(TodoListState::stats).await;
    println!(
        "\n{} of {} completed ({:.0}%)",
        stats.total_completed,
        stats.total,
        stats.percent_completed * 100.0
    );

    Ok(())
}
