use std::future::Future;

use thiserror::Error;

use crate::types::Target;

/// A completed HTTP exchange, reduced to what classification needs.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Why a single request produced no response. Absorbed into the tally as
/// an "error" sample; never aborts the run.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

/// Core trait request executors must provide: perform one HTTP GET against
/// the target and return the response, or why it failed. Production uses an
/// HTTP client; tests script the exchanges.
pub trait RequestExecutor: Send + Sync {
    fn get(&self, target: &Target)
    -> impl Future<Output = Result<Response, RequestError>> + Send;
}
