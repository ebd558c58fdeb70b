//! Authenticated request pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call goes through `ApiClient::request`, which reads the
//! session token at build time and attaches it as a bearer credential.
//! A request built before a logout keeps the credential it was built with.
//!
//! ERROR HANDLING
//! ==============
//! Transport errors, non-success statuses, and undecodable bodies are
//! returned to the caller unchanged. Nothing here retries or touches the
//! session on failure.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::types::ApiError;
use crate::config::ClientConfig;
use crate::state::session::SessionStore;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Build a client for `config.base_url` that authenticates from `session`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ClientBuild` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_owned(), session })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Start a request to `path`, carrying the current session's credential.
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let token = self.session.token();
        authorize(self.http.request(method, self.url(path)), token.as_deref())
    }

    /// Send `request` and decode a JSON body. An empty body decodes as `null`.
    ///
    /// # Errors
    ///
    /// `ApiError::Http` on transport failure, `ApiError::Status` on a
    /// non-success status, `ApiError::Decode` if the body does not fit `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body });
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}

/// Attach `token` as a bearer credential; pass the request through untouched
/// when there is none or it is empty.
#[must_use]
pub fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) if !token.is_empty() => request.bearer_auth(token),
        _ => request,
    }
}
