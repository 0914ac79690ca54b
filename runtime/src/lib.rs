//! # Todoflow Runtime
//!
//! Runtime implementation for the Todoflow architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back
//!   to reducers
//! - **Action Broadcast**: Every applied action is published to subscribers,
//!   which is how observers learn that state may have changed
//!
//! ## Concurrency Model
//!
//! All state mutation is serialized: the reducer runs while the store holds
//! the state write lock, so there is never concurrent mutation no matter how
//! many tasks hold a handle to the store. Effects run on independent spawned
//! tasks and re-enter the store through [`store::Store::send`], which means
//! their completions apply in arrival order - the store makes no causal
//! ordering promise across distinct in-flight effects.
//!
//! ## Example
//!
//! ```ignore
//! use todoflow_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! let handle = store.send(Action::DoSomething).await?;
//! handle.wait().await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field.clone()).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use todoflow_core::effect::Effect;
use todoflow_core::reducer::Reducer;
use tokio::sync::{RwLock, broadcast, watch};

pub use error::StoreError;
pub use store::Store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown
        /// initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for a matching action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// The action broadcast channel was closed, typically because the
        /// store is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

/// Tracks outstanding effects spawned for one `send` call.
///
/// Cloned into every spawned effect task; the counter reaches zero when the
/// last task drops its [`DecrementGuard`], at which point waiters on the
/// paired [`EffectHandle`] are notified.
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    fn new() -> (Self, watch::Receiver<()>) {
        let (notifier, rx) = watch::channel(());
        (
            Self {
                counter: Arc::new(AtomicUsize::new(0)),
                notifier,
            },
            rx,
        )
    }

    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }
}

/// Decrements the effect counter when dropped.
///
/// Tied to the lifetime of a spawned effect task so the counter stays
/// accurate even if the task panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        if self.0.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.0.notifier.send(());
        }
    }
}

/// Decrements a shared counter when dropped (global pending-effect count).
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle to the effects started by a single `send` call.
///
/// Lets callers wait for the action's effects - including the feedback
/// actions those effects send back into the store - to finish applying.
/// Dropping the handle detaches from the effects without cancelling them.
#[derive(Debug)]
pub struct EffectHandle {
    counter: Arc<AtomicUsize>,
    notify: watch::Receiver<()>,
}

impl EffectHandle {
    /// Whether all effects for the originating `send` have completed
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == 0
    }

    /// Wait until all effects for the originating `send` have completed
    ///
    /// Feedback actions produced by those effects have been applied to state
    /// by the time this returns. Effects spawned by *feedback* actions are
    /// tracked by their own `send` and are not awaited here.
    pub async fn wait(&mut self) {
        while self.counter.load(Ordering::SeqCst) > 0 {
            if self.notify.changed().await.is_err() {
                // All tracking clones dropped; counter is final.
                break;
            }
        }
    }

    /// Wait with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the effects are still running when
    /// the timeout elapses.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreError, broadcast,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the reducer runs under the write lock)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Change Notification
    ///
    /// Every action that has been applied to state is broadcast to
    /// subscribers (see [`Store::subscribe_actions`]). Observers that derive
    /// views from state re-read it when notified; this replaces the implicit
    /// re-render of UI frameworks with an explicit subscription.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses the default action broadcast capacity of 16; increase with
        /// [`Store::with_broadcast_capacity`] if observers frequently lag.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
        }

        /// Create a new Store with custom action broadcast capacity
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation (business logic)
        /// - `environment`: Injected dependencies
        /// - `capacity`: Action broadcast channel capacity
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Broadcasts the applied action to subscribers
        /// 4. Executes returned effects asynchronously
        ///
        /// # Concurrency
        ///
        /// - The reducer executes synchronously while holding the write lock;
        ///   concurrent `send` calls serialize at the reducer
        /// - `send()` returns after *starting* effect execution, not after
        ///   completion - use the returned [`EffectHandle`] to wait
        /// - Effects may complete in non-deterministic order
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is
        /// shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.actions.received").increment(1);

            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut state, action.clone(), &self.environment)
            };

            // State is settled for this action; notify observers. Errors only
            // mean there are no subscribers right now.
            let _ = self.action_broadcast.send(action);

            let (tracking, notify) = EffectTracking::new();
            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            Ok(EffectHandle {
                counter: Arc::clone(&tracking.counter),
                notify,
            })
        }

        /// Send an action and wait for a matching result action
        ///
        /// This method is designed for request-response patterns: it
        /// subscribes to the action broadcast, sends the initial action, then
        /// waits for an action matching the predicate.
        ///
        /// Subscription happens *before* sending, so a result produced
        /// immediately cannot be missed. Note that the initial action itself
        /// is broadcast too; a predicate that matches it returns right away.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: no matching action within `timeout`
        /// - [`StoreError::ChannelClosed`]: broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();
            self.send(action).await?;

            let deadline = tokio::time::Instant::now() + timeout;
            loop {
                let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
                match tokio::time::timeout(remaining, rx.recv()).await {
                    Err(_elapsed) => return Err(StoreError::Timeout),
                    Ok(Ok(observed)) => {
                        if predicate(&observed) {
                            return Ok(observed);
                        }
                    },
                    Ok(Err(broadcast::error::RecvError::Lagged(skipped))) => {
                        tracing::warn!(skipped, "action observer lagged behind broadcast");
                    },
                    Ok(Err(broadcast::error::RecvError::Closed)) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        }

        /// Subscribe to the stream of applied actions
        ///
        /// Every action the store applies - whether sent directly or fed back
        /// by an effect - is delivered to the receiver. Slow subscribers may
        /// observe `Lagged` errors and should simply continue receiving.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read state through a closure
        ///
        /// Acquires the read lock and passes a reference to the closure;
        /// useful for extracting a value or cloning a snapshot.
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Number of effects currently running
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Sets the shutdown flag (rejecting new actions), then waits for
        /// pending effects to complete. In-flight effects are never
        /// cancelled - they are drained.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
        /// with effects still running.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("initiating graceful shutdown");
            self.shutdown.store(true, Ordering::Release);

            let start = tokio::time::Instant::now();
            let poll_interval = Duration::from_millis(100);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("all effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "shutdown timed out");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Execute an effect, tracking completion
        ///
        /// - `None`: no-op
        /// - `Future`: spawned; a `Some(action)` result is sent back into the
        ///   store (feedback loop)
        /// - `Parallel`: children executed concurrently under the same
        ///   tracking
        ///
        /// Effects are fire-and-forget: a failed feedback `send` (store
        /// shutting down) is logged and dropped, never retried.
        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let store = self.clone();
                    let tracking = tracking.clone();

                    tokio::spawn(async move {
                        let _done = DecrementGuard(tracking);
                        let _pending = pending_guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("effect produced an action, feeding back");
                            if let Err(error) = store.send(action).await {
                                tracing::debug!(%error, "feedback action dropped");
                            }
                        } else {
                            tracing::trace!("effect completed with no action");
                        }
                    });
                },
                Effect::Parallel(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                    for effect in effects {
                        self.execute_effect(effect, tracking);
                    }
                },
            }
        }
    }
}
