//! In-memory service for tests and offline use.

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::ServiceError;
use crate::item::{TodoId, TodoItem};
use crate::service::TodoService;

/// In-memory [`TodoService`]
///
/// Holds the "server-side" collection behind a mutex and answers every call
/// from it. A failure can be scripted for the next call with
/// [`MockTodoService::fail_next`], which is how tests exercise the error
/// paths without a transport.
#[derive(Clone, Debug, Default)]
pub struct MockTodoService {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    items: Vec<TodoItem>,
    fail_next: Option<ServiceError>,
}

impl MockTodoService {
    /// Creates an empty mock service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock service seeded with items
    #[must_use]
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        let service = Self::new();
        service.lock().items = items;
        service
    }

    /// Script a failure for the next call (any operation)
    pub fn fail_next(&self, error: ServiceError) {
        self.lock().fail_next = Some(error);
    }

    /// Snapshot of the server-side collection
    #[must_use]
    pub fn items(&self) -> Vec<TodoItem> {
        self.lock().items.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned mock only means a test thread panicked mid-call; the
        // data is still usable.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn take_scripted_failure(&self) -> Option<ServiceError> {
        self.lock().fail_next.take()
    }
}

impl TodoService for MockTodoService {
    fn list(&self) -> impl Future<Output = Result<Vec<TodoItem>, ServiceError>> + Send {
        let result = match self.take_scripted_failure() {
            Some(error) => Err(error),
            None => Ok(self.lock().items.clone()),
        };
        async move { result }
    }

    fn create(&self, item: TodoItem) -> impl Future<Output = Result<TodoItem, ServiceError>> + Send {
        let result = match self.take_scripted_failure() {
            Some(error) => Err(error),
            None => {
                self.lock().items.push(item.clone());
                Ok(item)
            },
        };
        async move { result }
    }

    fn update(&self, item: TodoItem) -> impl Future<Output = Result<TodoItem, ServiceError>> + Send {
        let result = match self.take_scripted_failure() {
            Some(error) => Err(error),
            None => {
                let mut inner = self.lock();
                match inner.items.iter_mut().find(|existing| existing.id == item.id) {
                    Some(existing) => *existing = item.clone(),
                    None => inner.items.push(item.clone()),
                }
                Ok(item)
            },
        };
        async move { result }
    }

    fn delete(&self, id: TodoId) -> impl Future<Output = Result<TodoItem, ServiceError>> + Send {
        let result = match self.take_scripted_failure() {
            Some(error) => Err(error),
            None => {
                let mut inner = self.lock();
                match inner.items.iter().position(|item| item.id == id) {
                    Some(position) => Ok(inner.items.remove(position)),
                    None => Err(ServiceError::Network(format!("HTTP 404 for todo {id}"))),
                }
            },
        };
        async move { result }
    }
}

/// A small seed collection for demos and tests
#[must_use]
pub fn sample_items() -> Vec<TodoItem> {
    let mut documented = TodoItem::new(TodoId::new(), "Write documentation");
    documented.is_completed = true;

    vec![
        TodoItem::new(TodoId::new(), "Buy milk"),
        documented,
        TodoItem::new(TodoId::new(), "Deploy to production"),
    ]
}
