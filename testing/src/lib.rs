//! # Todoflow Testing
//!
//! Testing utilities for the Todoflow architecture.
//!
//! The centerpiece is [`ReducerTest`], a fluent Given-When-Then harness for
//! pure reducer tests, plus [`assertions`] helpers for the returned effects.
//!
//! ## Example
//!
//! ```ignore
//! use todoflow_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(CounterReducer)
//!     .with_env(test_environment())
//!     .given_state(CounterState { count: 0 })
//!     .when_action(CounterAction::Increment)
//!     .and_action(CounterAction::Increment)
//!     .then_state(|state| {
//!         assert_eq!(state.count, 2);
//!     })
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


// Re-export commonly used items
pub use reducer_test::{ReducerTest, assertions};
