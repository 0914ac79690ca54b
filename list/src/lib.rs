//! # Todoflow List
//!
//! The todo-list domain: an ordered, identity-keyed collection with derived
//! views, in two store variants.
//!
//! - [`LocalTodoReducer`]: every command applies synchronously to local
//!   state; nothing leaves the process.
//! - [`RemoteTodoReducer`]: commands are synchronized with a remote
//!   collection endpoint through a [`TodoService`] - optimistically for
//!   edits, after confirmation for creates and deletes, wholesale for
//!   refreshes.
//!
//! Derived views live on [`TodoListState`]: the filtered subsequence is
//! memoized on a fingerprint of `(items, filter)` and
//! [`TodoListState::stats`] is a pure function of the collection.
//!
//! # Quick Start
//!
//! ```no_run
//! use todoflow_list::{LocalEnvironment, LocalTodoReducer, TodoAction, TodoListState};
//! use todoflow_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::new(
//!     TodoListState::new(),
//!     LocalTodoReducer::new(),
//!     LocalEnvironment,
//! );
//!
//! store.send(TodoAction::Create {
//!     text: "Buy milk".to_string(),
//! })
//! .await?;
//!
//! let mut state = store.state(Clone::clone).await;
//! println!("{} todos shown", state.filtered_count());
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod collection;
pub mod environment;
pub mod error;
pub mod filter;
pub mod item;
pub mod mocks;
pub mod reducers;
pub mod service;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use actions::TodoAction;
pub use collection::TodoCollection;
pub use environment::{LocalEnvironment, RemoteEnvironment};
pub use error::ServiceError;
pub use filter::Filter;
pub use item::{TodoId, TodoItem};
pub use reducers::{LocalTodoReducer, RemoteTodoReducer};
pub use service::TodoService;
pub use state::{Phase, TodoListState};
pub use stats::Stats;
