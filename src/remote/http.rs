use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::config;

use super::{HttpRequest, HttpResponse, Transport};

/// `Transport` over a shared `reqwest` client with its default timeouts.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn build(&self, request: &HttpRequest) -> reqwest::Result<reqwest::Request> {
        let mut builder = self
            .client
            .get(&request.url)
            .header(USER_AGENT, config::USER_AGENT)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.build()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let response = self.client.execute(self.build(request)?).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
