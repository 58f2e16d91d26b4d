use std::time::Duration;

use crate::core::engine::traits::{RequestError, RequestExecutor, Response};
use crate::types::Target;

/// Production executor backed by a shared HTTP client with a bounded
/// per-request timeout. No retries; a hung target becomes a Timeout error.
pub struct HttpExecutor {
    client: reqwest::Client,
}

impl HttpExecutor {
    pub fn new(timeout: Duration) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RequestError::Other(e.to_string()))?;
        Ok(HttpExecutor { client })
    }
}

impl RequestExecutor for HttpExecutor {
    async fn get(&self, target: &Target) -> Result<Response, RequestError> {
        let response = self
            .client
            .get(target.url())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(Response { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        RequestError::Timeout
    } else if err.is_connect() {
        RequestError::Connect(err.to_string())
    } else {
        RequestError::Other(err.to_string())
    }
}
