mod fetch;
mod http;

#[cfg(test)]
mod mock;

pub use fetch::{RemoteTreeFetcher, repo_slug};
pub use http::ReqwestTransport;

#[cfg(test)]
pub use mock::MockTransport;

use anyhow::Result;
use async_trait::async_trait;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single GET. An `Err` means no response was received at all;
/// HTTP error statuses come back as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse>;
}
