use reqwest::Url;
use tracing::{debug, warn};

use crate::config::GITHUB_WEB_PREFIX;
use crate::error::FetchError;
use crate::models::{RawContentEntry, RemoteNode};

use super::{HttpRequest, HttpResponse, Transport};

const FORBIDDEN: u16 = 403;

/// Lists one level of a GitHub repository through the contents API.
pub struct RemoteTreeFetcher<T: Transport> {
    transport: T,
    api_base: String,
}

/// Outcome of a single request before the retry decision.
enum Attempt {
    Listed(Vec<RemoteNode>),
    /// The server answered 403; worth one retry with a credential.
    Forbidden(FetchError),
    Failed(FetchError),
}

impl<T: Transport> RemoteTreeFetcher<T> {
    pub fn with_api_base(transport: T, api_base: impl Into<String>) -> Self {
        Self {
            transport,
            api_base: api_base.into().trim_end_matches('/').to_owned(),
        }
    }

    /// List the repository root. Subdirectories come back without children.
    pub async fn fetch_children(
        &self,
        repo_ref: &str,
        token: Option<&str>,
    ) -> Result<Vec<RemoteNode>, FetchError> {
        let url = self.contents_url(repo_ref, None)?;
        self.list(url, token).await
    }

    /// List one directory of the repository, for grafting under an
    /// already fetched node.
    pub async fn fetch_dir(
        &self,
        repo_ref: &str,
        dir_path: &str,
        token: Option<&str>,
    ) -> Result<Vec<RemoteNode>, FetchError> {
        let url = self.contents_url(repo_ref, Some(dir_path))?;
        self.list(url, token).await
    }

    /// Every path segment is percent-encoded, so names containing `#`, `?`
    /// or `%` stay part of the path.
    fn contents_url(&self, repo_ref: &str, dir_path: Option<&str>) -> Result<String, FetchError> {
        let slug = repo_slug(repo_ref)?;
        let invalid_base = || FetchError::InvalidApiBase(self.api_base.clone());

        let mut url = Url::parse(&self.api_base).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|()| invalid_base())?
            .pop_if_empty()
            .push("repos")
            .extend(slug.split('/').filter(|s| !s.is_empty()))
            .push("contents")
            .extend(
                dir_path
                    .unwrap_or_default()
                    .split('/')
                    .filter(|s| !s.is_empty()),
            );
        Ok(url.into())
    }

    async fn list(&self, url: String, token: Option<&str>) -> Result<Vec<RemoteNode>, FetchError> {
        let request = HttpRequest { url, bearer: None };

        match self.attempt(&request).await {
            Attempt::Listed(nodes) => Ok(nodes),
            Attempt::Failed(err) => Err(err),
            Attempt::Forbidden(err) => {
                debug!(url = %request.url, %err, "retrying with credential");
                let retry = HttpRequest {
                    bearer: Some(token.unwrap_or_default().to_owned()),
                    ..request
                };
                match self.attempt(&retry).await {
                    Attempt::Listed(nodes) => Ok(nodes),
                    Attempt::Forbidden(err) | Attempt::Failed(err) => {
                        warn!(url = %retry.url, %err, "authenticated listing failed");
                        Err(err)
                    }
                }
            }
        }
    }

    async fn attempt(&self, request: &HttpRequest) -> Attempt {
        let response = match self.transport.get(request).await {
            Ok(response) => response,
            Err(err) => {
                return Attempt::Failed(FetchError::Transport {
                    url: request.url.clone(),
                    message: format!("{err:#}"),
                });
            }
        };

        if response.status == FORBIDDEN {
            return Attempt::Forbidden(status_error(request, &response));
        }
        if !response.is_success() {
            return Attempt::Failed(status_error(request, &response));
        }

        match serde_json::from_str::<Vec<RawContentEntry>>(&response.body) {
            Ok(raw) => Attempt::Listed(raw.into_iter().map(RemoteNode::from).collect()),
            Err(source) => Attempt::Failed(FetchError::Decode {
                url: request.url.clone(),
                source,
            }),
        }
    }
}

fn status_error(request: &HttpRequest, response: &HttpResponse) -> FetchError {
    FetchError::Status {
        url: request.url.clone(),
        status: response.status,
    }
}

/// Reduce `https://github.com/owner/name` or `owner/name` to `owner/name`.
pub fn repo_slug(repo_ref: &str) -> Result<&str, FetchError> {
    let trimmed = repo_ref.trim();
    let slug = trimmed
        .strip_prefix(GITHUB_WEB_PREFIX)
        .unwrap_or(trimmed)
        .trim_end_matches('/');

    if slug.is_empty() {
        return Err(FetchError::InvalidRepo(repo_ref.to_owned()));
    }
    Ok(slug)
}
