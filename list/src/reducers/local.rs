//! Reducer for the purely local variant.

use todoflow_core::{SmallVec, effect::Effect, reducer::Reducer};

use crate::actions::TodoAction;
use crate::environment::LocalEnvironment;
use crate::item::{TodoId, TodoItem};
use crate::state::TodoListState;

/// Reducer for the local variant
///
/// Every command applies synchronously; nothing leaves the process and no
/// effects are ever produced. `Refresh` and the response actions belong to
/// the networked variant and are ignored here.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTodoReducer;

impl LocalTodoReducer {
    /// Creates the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for LocalTodoReducer {
    type State = TodoListState;
    type Action = TodoAction;
    type Environment = LocalEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::SetFilter(filter) => {
                state.filter = filter;
            },

            TodoAction::Create { text } => {
                state.items.upsert(TodoItem::new(TodoId::new(), text));
            },

            TodoAction::Update { item } => {
                state.items.upsert(item);
            },

            TodoAction::Remove { id } => {
                state.items.remove(&id);
            },

            TodoAction::RemoveAt { positions } => {
                state.items.remove_at(&positions);
            },

            TodoAction::Move { from, to } => {
                state.items.move_to(&from, to);
            },

            ignored @ (TodoAction::Refresh
            | TodoAction::Loaded { .. }
            | TodoAction::Created { .. }
            | TodoAction::Updated { .. }
            | TodoAction::Removed { .. }) => {
                tracing::debug!(action = ?ignored, "networked action ignored by local variant");
            },
        }

        SmallVec::new()
    }
}
