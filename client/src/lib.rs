//! # Todoflow Client
//!
//! HTTP implementation of [`TodoService`] against the remote collection
//! endpoint.
//!
//! | Operation | Method | Path          |
//! |-----------|--------|---------------|
//! | list      | GET    | `/todos`      |
//! | create    | POST   | `/todos`      |
//! | update    | POST   | `/todos/{id}` |
//! | delete    | DELETE | `/todos/{id}` |
//!
//! Transport errors and non-success statuses surface as
//! [`ServiceError::Network`]; a response body that fails to decode surfaces
//! as [`ServiceError::Decode`]. What the store does with those is the
//! reducer's business - notably, an undecodable listing is downgraded to an
//! empty one there, not here.

use std::future::Future;

use reqwest::Client;
use todoflow_list::{ServiceError, TodoId, TodoItem, TodoService};

/// Default base URL of the collection endpoint
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// HTTP client for the todo collection endpoint
#[derive(Clone, Debug)]
pub struct TodoApi {
    http: Client,
    base_url: String,
}

impl TodoApi {
    /// Create a client against the given base URL
    ///
    /// A trailing slash on the base URL is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Create a client against [`DEFAULT_BASE_URL`]
    #[must_use]
    pub fn localhost() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for TodoApi {
    fn default() -> Self {
        Self::localhost()
    }
}

/// Decode a success response, mapping status and body failures to the
/// service taxonomy.
async fn decode<T>(response: reqwest::Response) -> Result<T, ServiceError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Network(format!("HTTP {status}")));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

impl TodoService for TodoApi {
    fn list(&self) -> impl Future<Output = Result<Vec<TodoItem>, ServiceError>> + Send {
        let request = self.http.get(self.url("/todos"));
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| ServiceError::Network(e.to_string()))?;
            decode(response).await
        }
    }

    fn create(&self, item: TodoItem) -> impl Future<Output = Result<TodoItem, ServiceError>> + Send {
        let request = self.http.post(self.url("/todos")).json(&item);
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| ServiceError::Network(e.to_string()))?;
            decode(response).await
        }
    }

    fn update(&self, item: TodoItem) -> impl Future<Output = Result<TodoItem, ServiceError>> + Send {
        let request = self
            .http
            .post(self.url(&format!("/todos/{}", item.id)))
            .json(&item);
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| ServiceError::Network(e.to_string()))?;
            decode(response).await
        }
    }

    fn delete(&self, id: TodoId) -> impl Future<Output = Result<TodoItem, ServiceError>> + Send {
        let request = self.http.delete(self.url(&format!("/todos/{id}")));
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| ServiceError::Network(e.to_string()))?;
            decode(response).await
        }
    }
}
