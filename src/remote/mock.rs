use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{HttpRequest, HttpResponse, Transport};

#[derive(Clone, Debug)]
enum Reply {
    Response(HttpResponse),
    Err(String),
}

/// Replays queued replies in order and records every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    replies: VecDeque<Reply>,
    calls: Vec<HttpRequest>,
}

impl MockTransport {
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock transport lock");
        inner.replies.push_back(Reply::Response(HttpResponse {
            status,
            body: body.into(),
        }));
    }

    pub fn push_error(&self, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock transport lock");
        inner.replies.push_back(Reply::Err(message.into()));
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        let inner = self.inner.lock().expect("mock transport lock");
        inner.calls.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut inner = self.inner.lock().expect("mock transport lock");
        inner.calls.push(request.clone());

        match inner.replies.pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("no mock reply for {}", request.url)),
        }
    }
}
