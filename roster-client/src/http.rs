//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Error body returned by the backend on non-2xx responses
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// POST whose success body is free-form: parsed JSON when there is some
    async fn post_loose<B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<Value>>;
    /// PUT with the same success handling as [`HttpClient::post_loose`]
    async fn put_loose<B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<Value>>;
    /// DELETE; a success body, if any, is ignored
    async fn delete(&self, path: &str) -> ClientResult<()>;
    /// GET whose only result is the status
    async fn probe(&self, path: &str) -> ClientResult<()>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Map a non-2xx response to `ClientError::Api`
    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.error.or(body.message))
            .or_else(|| {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        tracing::debug!(status = status.as_u16(), message = %message, "API request rejected");
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Err(ClientError::InvalidResponse("Empty response body".into()));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Any 2xx is success; an empty or non-JSON body yields `None`
    async fn handle_loose(&self, response: reqwest::Response) -> ClientResult<Option<Value>> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).ok())
    }

    async fn handle_empty(&self, response: reqwest::Response) -> ClientResult<()> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::error_from(response).await)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::trace!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let url = self.url(path);
        tracing::trace!(%url, "GET (binary)");
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::trace!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn post_loose<B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<Value>> {
        let url = self.url(path);
        tracing::trace!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        self.handle_loose(response).await
    }

    async fn put_loose<B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<Value>> {
        let url = self.url(path);
        tracing::trace!(%url, "PUT");
        let response = self.client.put(&url).json(body).send().await?;
        self.handle_loose(response).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.url(path);
        tracing::trace!(%url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        self.handle_empty(response).await
    }

    async fn probe(&self, path: &str) -> ClientResult<()> {
        let url = self.url(path);
        let response = self.client.get(&url).send().await?;
        self.handle_empty(response).await
    }
}
