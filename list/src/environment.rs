//! Environments for the two reducer variants.

use crate::service::TodoService;

/// Environment of the purely local variant
///
/// The local reducer has no external dependencies; everything it needs is in
/// the action and the state.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalEnvironment;

/// Environment of the networked variant
///
/// Carries the service the remote reducer's effects call. Generic rather
/// than boxed so the store stays free of trait objects.
#[derive(Clone)]
pub struct RemoteEnvironment<S>
where
    S: TodoService + Clone,
{
    /// The remote collection endpoint
    pub service: S,
}

impl<S> RemoteEnvironment<S>
where
    S: TodoService + Clone,
{
    /// Creates an environment around a service
    pub const fn new(service: S) -> Self {
        Self { service }
    }
}
