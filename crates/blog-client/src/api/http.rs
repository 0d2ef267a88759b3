//! reqwest-backed [`PostsApi`] with retry on transient failures.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use blog_shared::{ErrorResponse, PostPayload};

use super::PostsApi;
use crate::Post;
use crate::config::{ClientConfig, RetryPolicy};
use crate::error::ClientError;

/// Which failures may be retried for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryMode {
    /// Safe to repeat: retry connection errors, other send errors and 5xx.
    Idempotent,
    /// Only retry when the request never reached the server. A repeated
    /// create would duplicate the post and a repeated delete would turn a
    /// success into a 404.
    ConnectOnly,
}

/// HTTP client for the posts API.
pub struct HttpPostsApi {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpPostsApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send<F>(&self, build: F, mode: RetryMode) -> Result<Response, ClientError>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let mut attempt = 0;

        loop {
            let outcome = build().send().await;

            let transient = match &outcome {
                Ok(resp) => mode == RetryMode::Idempotent && resp.status().is_server_error(),
                Err(e) => e.is_connect() || mode == RetryMode::Idempotent,
            };

            if transient && attempt < self.retry.max_retries {
                let delay = self.retry.delay_for(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries = self.retry.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Transient failure, retrying request"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return outcome.map_err(|e| ClientError::Network(e.to_string()));
        }
    }
}

/// Turn a non-2xx response into [`ClientError::Api`].
async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(status.as_u16(), &body),
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    check_status(resp)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// The server's `{"error": ...}` message, or `HTTP <status>` when there is none.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let url = self.url("/posts");
        let resp = self
            .send(|| self.client.get(&url), RetryMode::Idempotent)
            .await?;
        read_json(resp).await
    }

    async fn get_post(&self, id: i64) -> Result<Post, ClientError> {
        let url = self.url(&format!("/posts/{id}"));
        let resp = self
            .send(|| self.client.get(&url), RetryMode::Idempotent)
            .await?;
        read_json(resp).await
    }

    async fn create_post(&self, payload: &PostPayload) -> Result<Post, ClientError> {
        let url = self.url("/posts");
        let resp = self
            .send(|| self.client.post(&url).json(payload), RetryMode::ConnectOnly)
            .await?;
        read_json(resp).await
    }

    async fn update_post(&self, id: i64, payload: &PostPayload) -> Result<Post, ClientError> {
        let url = self.url(&format!("/posts/{id}"));
        let resp = self
            .send(|| self.client.put(&url).json(payload), RetryMode::Idempotent)
            .await?;
        read_json(resp).await
    }

    async fn delete_post(&self, id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("/posts/{id}"));
        let resp = self
            .send(|| self.client.delete(&url), RetryMode::ConnectOnly)
            .await?;
        check_status(resp).await.map(|_| ())
    }
}
