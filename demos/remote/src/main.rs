//! Walkthrough of the networked variant against `http://127.0.0.1:8080`.
//!
//! Refreshes the listing, creates a todo, toggles it, deletes it, and prints
//! the phase and visible list between steps. Start any server speaking the
//! todo endpoint protocol first; without one the initial refresh reports a
//! failure phase and the walkthrough stops.

use std::time::Duration;

use todoflow_client::TodoApi;
use todoflow_list::{
    Phase, RemoteEnvironment, RemoteTodoReducer, TodoAction, TodoListState,
};
use todoflow_runtime::Store;

type RemoteStore = Store<
    TodoListState,
    TodoAction,
    RemoteEnvironment<TodoApi>,
    RemoteTodoReducer<TodoApi>,
>;

const WAIT: Duration = Duration::from_secs(5);

async fn print_list(store: &RemoteStore, heading: &str) {
    let mut state = store.state(Clone::clone).await;
    println!("\n{heading} ({} shown)", state.filtered_count());
    for item in state.filtered_items() {
        let mark = if item.is_completed { "✓" } else { " " };
        println!("  [{mark}] {}  ({})", item.text, item.id);
    }
}

async fn refresh(store: &RemoteStore) -> anyhow::Result<Phase> {
    store
        .send_and_wait_for(
            TodoAction::Refresh,
            |action| matches!(action, TodoAction::Loaded { .. }),
            WAIT,
        )
        .await?;
    Ok(store.state(|s| s.phase.clone()).await)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Todoflow: networked variant ===");

    let store = Store::new(
        TodoListState::new(),
        RemoteTodoReducer::new(),
        RemoteEnvironment::new(TodoApi::localhost()),
    );

    match refresh(&store).await? {
        Phase::Failure(message) => {
            println!("\nRefresh failed: {message}");
            println!("Is a todo server running on 127.0.0.1:8080?");
            return Ok(());
        },
        phase => println!("\nRefresh finished: {phase:?}"),
    }
    print_list(&store, "Fetched").await;

    // Create a todo and wait for the server-confirmed item.
    let created = store
        .send_and_wait_for(
            TodoAction::Create {
                text: "buy milk".to_string(),
            },
            |action| matches!(action, TodoAction::Created { .. }),
            WAIT,
        )
        .await?;
    let TodoAction::Created { result: Ok(item) } = created else {
        println!("\nCreate was not confirmed; leaving the list as fetched.");
        return Ok(());
    };
    print_list(&store, "After create").await;

    // Toggle it (optimistic, then persisted).
    let mut edited = item.clone();
    edited.toggle();
    store
        .send_and_wait_for(
            TodoAction::Update { item: edited },
            |action| matches!(action, TodoAction::Updated { .. }),
            WAIT,
        )
        .await?;
    print_list(&store, "After toggle").await;

    // Delete it again.
    store
        .send_and_wait_for(
            TodoAction::Remove {
                id: item.id.clone(),
            },
            |action| matches!(action, TodoAction::Removed { .. }),
            WAIT,
        )
        .await?;
    print_list(&store, "After delete").await;

    // A final refresh shows the server's view.
    refresh(&store).await?;
    print_list(&store, "Server state").await;

    let stats = store.state(TodoListState::stats).await;
    println!(
        "\n{} of {} completed ({:.0}%)",
        stats.total_completed,
        stats.total,
        stats.percent_completed * 100.0
    );

    store.shutdown(Duration::from_secs(2)).await?;
    Ok(())
}
