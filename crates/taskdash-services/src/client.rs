//! Todo API client.

use std::sync::Arc;

use taskdash_auth::TokenProvider;
use tracing::instrument;

use crate::error::TodoError;
use crate::todo::{Todo, TodoFields};

pub struct TodoClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl TodoClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Attach the token current at call time, if any.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => {
                tracing::debug!("No session token; sending todo request unauthenticated");
                request
            }
        }
    }

    #[instrument(skip(self), level = "info")]
    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let url = format!("{}/todos", self.base_url);
        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response, "list").await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get(&self, id: &str) -> Result<Todo, TodoError> {
        let url = format!("{}/todos/{}", self.base_url, id);
        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response, id).await
    }

    #[instrument(skip(self, fields), level = "info")]
    pub async fn create(&self, fields: &TodoFields) -> Result<Todo, TodoError> {
        let url = format!("{}/todos", self.base_url);
        let response = self
            .authorize(self.client.post(&url))
            .json(fields)
            .send()
            .await?;
        self.handle_response(response, "create").await
    }

    #[instrument(skip(self, fields), level = "info")]
    pub async fn update(&self, id: &str, fields: &TodoFields) -> Result<Todo, TodoError> {
        let url = format!("{}/todos/{}", self.base_url, id);
        let response = self
            .authorize(self.client.put(&url))
            .json(fields)
            .send()
            .await?;
        self.handle_response(response, id).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn delete(&self, id: &str) -> Result<(), TodoError> {
        let url = format!("{}/todos/{}", self.base_url, id);
        let response = self.authorize(self.client.delete(&url)).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, response, id).await)
        }
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        subject: &str,
    ) -> Result<T, TodoError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| TodoError::ApiError(format!("JSON parse error: {}", e)))
        } else {
            Err(Self::status_error(status, response, subject).await)
        }
    }

    async fn status_error(
        status: reqwest::StatusCode,
        response: reqwest::Response,
        subject: &str,
    ) -> TodoError {
        match status.as_u16() {
            401 | 403 => TodoError::Unauthorized(status.as_u16()),
            404 => TodoError::NotFound(subject.to_string()),
            _ => {
                let text = response.text().await.unwrap_or_default();
                TodoError::ApiError(format!("{}: {}", status, text))
            }
        }
    }
}
