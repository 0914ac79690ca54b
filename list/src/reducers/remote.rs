//! Reducer for the networked variant.

use std::marker::PhantomData;

use todoflow_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

use crate::actions::TodoAction;
use crate::collection::TodoCollection;
use crate::environment::RemoteEnvironment;
use crate::error::ServiceError;
use crate::item::{TodoId, TodoItem};
use crate::service::TodoService;
use crate::state::{Phase, TodoListState};

/// Reducer for the networked variant
///
/// Commands either apply optimistically (`Update`), apply only after the
/// server confirms (`Create`, `Remove`, `RemoveAt`), or stay local forever
/// (`SetFilter`, `Move` - ordering is never sent to the endpoint). Each
/// service call completes as a response action that reconciles state.
///
/// Known, deliberate limitations carried over from the source behavior:
///
/// - a failed update is NOT rolled back; the optimistic value stays until the
///   next refresh
/// - `Loaded(Ok)` replaces the collection wholesale, so local edits racing a
///   fetch are lost
/// - failed creates/updates/deletes are logged and otherwise dropped
#[derive(Clone, Debug, Default)]
pub struct RemoteTodoReducer<S> {
    _service: PhantomData<S>,
}

impl<S> RemoteTodoReducer<S> {
    /// Creates the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _service: PhantomData,
        }
    }
}

impl<S> Reducer for RemoteTodoReducer<S>
where
    S: TodoService + Clone + Send + Sync + 'static,
{
    type State = TodoListState;
    type Action = TodoAction;
    type Environment = RemoteEnvironment<S>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::SetFilter(filter) => {
                state.filter = filter;
                SmallVec::new()
            },

            TodoAction::Create { text } => {
                // Nothing is added optimistically; the server-confirmed item
                // arrives as `Created`.
                let candidate = TodoItem::new(TodoId::new(), text);
                let service = env.service.clone();
                smallvec![Effect::future(async move {
                    Some(TodoAction::Created {
                        result: service.create(candidate).await,
                    })
                })]
            },

            TodoAction::Update { item } => {
                // Optimistic: the edit is visible immediately, the request
                // runs independently.
                state.items.upsert(item.clone());
                let service = env.service.clone();
                smallvec![Effect::future(async move {
                    Some(TodoAction::Updated {
                        result: service.update(item).await,
                    })
                })]
            },

            TodoAction::Remove { id } => {
                let service = env.service.clone();
                smallvec![Effect::future(async move {
                    let result = service.delete(id.clone()).await;
                    Some(TodoAction::Removed { id, result })
                })]
            },

            TodoAction::RemoveAt { positions } => {
                // Positions resolve against the collection order at dispatch
                // time; each id gets its own delete request.
                let ids: Vec<TodoId> = positions
                    .iter()
                    .filter_map(|&position| state.items.get(position))
                    .map(|item| item.id.clone())
                    .collect();

                let deletes = ids
                    .into_iter()
                    .map(|id| {
                        let service = env.service.clone();
                        Effect::future(async move {
                            let result = service.delete(id.clone()).await;
                            Some(TodoAction::Removed { id, result })
                        })
                    })
                    .collect();
                smallvec![Effect::Parallel(deletes)]
            },

            TodoAction::Move { from, to } => {
                state.items.move_to(&from, to);
                SmallVec::new()
            },

            TodoAction::Refresh => {
                state.phase = Phase::Loading;
                let service = env.service.clone();
                smallvec![Effect::future(async move {
                    Some(TodoAction::Loaded {
                        result: service.list().await,
                    })
                })]
            },

            // ========== Responses ==========
            TodoAction::Loaded { result } => {
                match result {
                    Ok(items) => {
                        state.phase = Phase::Success;
                        // Full replace, not a merge: unsynced local edits
                        // made during the fetch are lost.
                        state.items = TodoCollection::from_items(items);
                    },
                    Err(ServiceError::Decode(reason)) => {
                        // An undecodable listing counts as an empty one.
                        tracing::warn!(%reason, "discarding undecodable listing, treating as empty");
                        state.phase = Phase::Success;
                        state.items = TodoCollection::new();
                    },
                    Err(error) => {
                        state.phase = Phase::Failure(error.to_string());
                    },
                }
                SmallVec::new()
            },

            TodoAction::Created { result } => {
                match result {
                    Ok(item) => state.items.upsert(item),
                    Err(error) => {
                        tracing::warn!(%error, "create failed, nothing added");
                    },
                }
                SmallVec::new()
            },

            TodoAction::Updated { result } => {
                match result {
                    Ok(item) => state.items.upsert(item),
                    Err(error) => {
                        // The optimistic value stays; no rollback.
                        tracing::warn!(%error, "update not persisted");
                    },
                }
                SmallVec::new()
            },

            TodoAction::Removed { id, result } => {
                match result {
                    // The payload only confirms success; removal targets the
                    // original id.
                    Ok(_deleted) => {
                        state.items.remove(&id);
                    },
                    Err(error) => {
                        tracing::warn!(%id, %error, "delete failed, item kept");
                    },
                }
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use todoflow_testing::{ReducerTest, assertions};

    use super::*;
    use crate::mocks::MockTodoService;

    fn remote_env() -> RemoteEnvironment<MockTodoService> {
        RemoteEnvironment::new(MockTodoService::new())
    }

    fn reducer() -> RemoteTodoReducer<MockTodoService> {
        RemoteTodoReducer::new()
    }

    #[test]
    fn create_is_not_optimistic() {
        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::new())
            .when_action(TodoAction::Create {
                text: "Buy milk".to_string(),
            })
            .then_state(|state| {
                assert!(state.items.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn update_is_optimistic_and_requests_persistence() {
        let id = TodoId::new();
        let mut edited = TodoItem::new(id.clone(), "Buy milk");
        edited.toggle();

        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::with_items(
                [TodoItem::new(id.clone(), "Buy milk")].into_iter().collect(),
            ))
            .when_action(TodoAction::Update { item: edited })
            .then_state(move |state| {
                assert!(state.items.find(&id).unwrap().is_completed);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn remove_waits_for_confirmation() {
        let id = TodoId::new();

        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::with_items(
                [TodoItem::new(id.clone(), "Buy milk")].into_iter().collect(),
            ))
            .when_action(TodoAction::Remove { id: id.clone() })
            .then_state(move |state| {
                // Still present until the server confirms.
                assert!(state.items.contains(&id));
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn refresh_enters_loading() {
        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::new())
            .when_action(TodoAction::Refresh)
            .then_state(|state| {
                assert!(state.phase.is_loading());
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn refresh_reenters_loading_after_failure() {
        let mut failed = TodoListState::new();
        failed.phase = Phase::Failure("network failure: boom".to_string());

        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(failed)
            .when_action(TodoAction::Refresh)
            .then_state(|state| {
                assert!(state.phase.is_loading());
            })
            .run();
    }

    #[test]
    fn loaded_ok_replaces_wholesale() {
        let fetched = vec![
            TodoItem::new(TodoId::new(), "Write documentation"),
            TodoItem::new(TodoId::new(), "Deploy to production"),
        ];

        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::with_items(
                [TodoItem::new(TodoId::new(), "stale local item")]
                    .into_iter()
                    .collect(),
            ))
            .when_action(TodoAction::Loaded {
                result: Ok(fetched),
            })
            .then_state(|state| {
                assert_eq!(state.phase, Phase::Success);
                assert_eq!(state.items.len(), 2);
                assert!(state.items.iter().all(|item| item.text != "stale local item"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn loaded_network_failure_keeps_items() {
        let existing = TodoItem::new(TodoId::new(), "Buy milk");

        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::with_items(
                [existing.clone()].into_iter().collect(),
            ))
            .when_action(TodoAction::Loaded {
                result: Err(ServiceError::Network("connection refused".to_string())),
            })
            .then_state(move |state| {
                assert_eq!(
                    state.phase,
                    Phase::Failure("network failure: connection refused".to_string())
                );
                assert_eq!(state.items.as_slice(), &[existing]);
            })
            .run();
    }

    #[test]
    fn loaded_decode_failure_falls_back_to_empty() {
        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::with_items(
                [TodoItem::new(TodoId::new(), "Buy milk")].into_iter().collect(),
            ))
            .when_action(TodoAction::Loaded {
                result: Err(ServiceError::Decode("expected an array".to_string())),
            })
            .then_state(|state| {
                assert_eq!(state.phase, Phase::Success);
                assert!(state.items.is_empty());
            })
            .run();
    }

    #[test]
    fn created_ok_upserts_server_item() {
        let id = TodoId::new();
        let server_item = TodoItem::new(id.clone(), "buy milk");

        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::new())
            .when_action(TodoAction::Created {
                result: Ok(server_item),
            })
            .then_state(move |state| {
                assert_eq!(state.items.len(), 1);
                assert_eq!(state.items.find(&id).unwrap().text, "buy milk");
            })
            .run();
    }

    #[test]
    fn created_failure_changes_nothing() {
        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::new())
            .when_action(TodoAction::Created {
                result: Err(ServiceError::Network("boom".to_string())),
            })
            .then_state(|state| {
                assert!(state.items.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn updated_failure_keeps_optimistic_value() {
        let id = TodoId::new();
        let mut optimistic = TodoItem::new(id.clone(), "Buy milk");
        optimistic.toggle();

        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::with_items(
                [optimistic.clone()].into_iter().collect(),
            ))
            .when_action(TodoAction::Updated {
                result: Err(ServiceError::Network("boom".to_string())),
            })
            .then_state(move |state| {
                // No rollback: the unpersisted edit stays visible.
                assert_eq!(state.items.find(&id), Some(&optimistic));
            })
            .run();
    }

    #[test]
    fn removed_ok_removes_by_original_id() {
        let id = TodoId::new();
        // The server may return a different representation of the deleted
        // resource; removal still targets the original id.
        let mut returned = TodoItem::new(id.clone(), "Buy milk (archived)");
        returned.toggle();

        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::with_items(
                [TodoItem::new(id.clone(), "Buy milk")].into_iter().collect(),
            ))
            .when_action(TodoAction::Removed {
                id: id.clone(),
                result: Ok(returned),
            })
            .then_state(move |state| {
                assert!(!state.items.contains(&id));
            })
            .run();
    }

    #[test]
    fn remove_at_resolves_positions_to_deletes() {
        ReducerTest::new(reducer())
            .with_env(remote_env())
            .given_state(TodoListState::with_items(
                ["A", "B", "C"]
                    .into_iter()
                    .map(|text| TodoItem::new(TodoId::new(), text))
                    .collect(),
            ))
            .when_action(TodoAction::RemoveAt {
                positions: vec![0, 2],
            })
            .then_state(|state| {
                // Nothing removed locally until each delete is confirmed.
                assert_eq!(state.items.len(), 3);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assert!(matches!(
                    &effects[0],
                    Effect::Parallel(children) if children.len() == 2
                ));
            })
            .run();
    }
}
