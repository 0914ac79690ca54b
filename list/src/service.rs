//! Abstraction over the remote collection endpoint.

use std::future::Future;

use crate::error::ServiceError;
use crate::item::{TodoId, TodoItem};

/// The remote todo collection
///
/// One method per endpoint operation. Implemented by the HTTP client in
/// `todoflow-client` and by [`crate::mocks::MockTodoService`] for tests and
/// offline use.
///
/// Implementations must be cheap to clone: the remote reducer clones the
/// service into every effect it describes.
pub trait TodoService: Send + Sync {
    /// Fetch the whole collection
    fn list(&self) -> impl Future<Output = Result<Vec<TodoItem>, ServiceError>> + Send;

    /// Create an item; the server returns its own representation, which may
    /// differ from the candidate
    fn create(&self, item: TodoItem) -> impl Future<Output = Result<TodoItem, ServiceError>> + Send;

    /// Persist an edit to an existing item; the server's representation is
    /// returned (server-side normalization allowed)
    fn update(&self, item: TodoItem) -> impl Future<Output = Result<TodoItem, ServiceError>> + Send;

    /// Delete an item by id; the server returns the deleted resource
    fn delete(&self, id: TodoId) -> impl Future<Output = Result<TodoItem, ServiceError>> + Send;
}
