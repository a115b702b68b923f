//! REST backend implementation.
//!
//! Speaks the plain JSON dialect of the todos service: `GET`/`POST` against
//! the base URL, `PATCH`/`DELETE` against `<base>/<id>`. No retries and no
//! timeouts; a call runs until the transport resolves it.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use super::{Backend, BackendError};
use crate::entities::item::{CreateItemArgs, TodoItem, UpdateItemArgs};

/// Backend dispatching item mutations to a remote REST service.
pub struct RestBackend {
    http: Client,
    base_url: String,
}

impl RestBackend {
    /// Create a new REST backend pointed at the given base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Map non-success responses to the matching error variant.
    async fn ok_or_status(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(response.url().to_string()));
        }
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode_item(response: Response) -> Result<TodoItem, BackendError> {
        response
            .json::<TodoItem>()
            .await
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }
}

#[async_trait]
impl Backend for RestBackend {
    fn backend_type(&self) -> &str {
        "rest"
    }

    async fn fetch_items(&self) -> Result<Vec<TodoItem>, BackendError> {
        let response = self
            .http
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let response = Self::ok_or_status(response).await?;
        response
            .json::<Vec<TodoItem>>()
            .await
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }

    async fn create_item(&self, args: CreateItemArgs) -> Result<TodoItem, BackendError> {
        let response = self
            .http
            .post(&self.base_url)
            .json(&args)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let response = Self::ok_or_status(response).await?;
        Self::decode_item(response).await
    }

    async fn update_item(&self, id: i64, args: UpdateItemArgs) -> Result<TodoItem, BackendError> {
        let response = self
            .http
            .patch(self.item_url(id))
            .json(&args)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let response = Self::ok_or_status(response).await?;
        Self::decode_item(response).await
    }

    async fn delete_item(&self, id: i64) -> Result<(), BackendError> {
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Self::ok_or_status(response).await?;
        Ok(())
    }
}
