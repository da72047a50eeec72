//! REST API Client
//!
//! Typed bindings to the backend, organized by domain. Every call goes
//! through `ApiClient::execute`, which attaches the bearer token and runs
//! the single-flight refresh on 401.

mod error;
mod refresh;
mod token;
mod transport;

mod attachment;
mod auth;
mod chat;
mod comment;
mod issue;
mod milestone;
mod project;
mod tag;


use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use auth::ProfileUpdate;
pub use error::{ApiError, ApiResult};
pub use project::ProjectFilter;
pub use refresh::{RefreshGate, RefreshLease, RefreshOutcome, Ticket};
pub use reqwest::Method;
pub use token::{usable_token, LocalStorageTokens, MemoryTokens, TokenStore};
pub use transport::ReqwestTransport;

use crate::config::AppConfig;
use crate::models::AuthResponse;

// ========================
// Wire Types
// ========================

/// One multipart form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text { name: String, value: String },
    File { name: String, file_name: String, mime: Option<String>, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormField>),
}

/// Transport-agnostic request; `path` is relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Filled in by the client from the token store
    pub bearer: Option<String>,
    /// Credential endpoints answer 401 for bad passwords; don't refresh on those
    pub refresh_on_unauthorized: bool,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
            refresh_on_unauthorized: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn without_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Non-2xx becomes the matching `ApiError`
    pub fn into_result(self) -> ApiResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_status(self.status, &self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Sends one request and reports whatever status came back
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

// ========================
// Client
// ========================

struct ClientInner<T, S> {
    transport: T,
    tokens: S,
    refresh: RefreshGate,
}

/// Authenticated client. Cheap to clone; clones share tokens and refresh state.
pub struct ApiClient<T, S> {
    inner: Arc<ClientInner<T, S>>,
}

impl<T, S> Clone for ApiClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// The client the browser build runs with
pub type AppClient = ApiClient<ReqwestTransport, LocalStorageTokens>;

impl AppClient {
    pub fn from_config(config: &AppConfig) -> Self {
        ApiClient::new(ReqwestTransport::new(config.clone()), LocalStorageTokens::new(config))
    }
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub fn new(transport: T, tokens: S) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                tokens,
                refresh: RefreshGate::new(),
            }),
        }
    }

    pub fn tokens(&self) -> &S {
        &self.inner.tokens
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh.is_refreshing()
    }

    /// True when a structurally valid access token is stored
    pub fn has_session(&self) -> bool {
        self.bearer().is_some()
    }

    fn bearer(&self) -> Option<String> {
        usable_token(self.inner.tokens.access_token())
    }

    /// Send with the stored token; on a first 401, refresh once and replay.
    pub async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let sent_with = self.bearer();
        let mut first = request.clone();
        first.bearer = sent_with.clone();
        let response = self.inner.transport.send(first).await?;
        if response.status != 401 || !request.refresh_on_unauthorized {
            return response.into_result();
        }

        let token = match self.bearer() {
            // A refresh finished while this request was out; reuse its token
            Some(current) if sent_with.as_ref() != Some(&current) && !self.is_refreshing() => {
                log::debug!("[AUTH] 401 on {} {} with a superseded token, replaying", request.method, request.path);
                current
            }
            _ => {
                log::debug!("[AUTH] 401 on {} {}, waiting for a fresh token", request.method, request.path);
                let unauthorized = ApiError::from_status(response.status, &response.body);
                self.fresh_token(unauthorized).await?
            }
        };

        // The replay is already the retry: a second 401 is returned as is
        let mut retry = request;
        retry.bearer = Some(token);
        self.inner.transport.send(retry).await?.into_result()
    }

    async fn fresh_token(&self, unauthorized: ApiError) -> ApiResult<String> {
        match self.inner.refresh.join() {
            Ticket::Leader(lease) => {
                let outcome = self.refresh_access_token(unauthorized).await;
                let released = lease.complete(outcome.clone());
                match &outcome {
                    Ok(_) => log::info!("[AUTH] token refreshed, replaying {} queued request(s)", released),
                    Err(e) => log::warn!("[AUTH] refresh failed ({}), rejected {} queued request(s)", e, released),
                }
                outcome
            }
            Ticket::Follower(waiter) => waiter.await.unwrap_or(Err(ApiError::RefreshAborted)),
        }
    }

    async fn refresh_access_token(&self, unauthorized: ApiError) -> ApiResult<String> {
        let tokens = &self.inner.tokens;
        let Some(refresh_token) = usable_token(tokens.refresh_token()) else {
            log::warn!("[AUTH] no usable refresh token, ending session");
            tokens.clear();
            return Err(unauthorized);
        };

        let request = HttpRequest::new(Method::POST, "/auth/refresh")
            .json(&serde_json::json!({ "refreshToken": refresh_token }))?;
        let result = async {
            let response = self.inner.transport.send(request).await?.into_result()?;
            let auth: AuthResponse = response.json()?;
            let access = auth
                .access_token
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| ApiError::Decode("refresh response has no accessToken".to_string()))?;
            Ok::<_, ApiError>((access.trim().to_string(), auth.refresh_token))
        }
        .await;

        match result {
            Ok((access, rotated)) => {
                if let Err(e) = tokens.set_access_token(&access) {
                    log::warn!("[AUTH] could not persist access token: {}", e);
                }
                if let Some(rotated) = rotated.filter(|t| !t.is_empty()) {
                    if let Err(e) = tokens.set_refresh_token(&rotated) {
                        log::warn!("[AUTH] could not persist refresh token: {}", e);
                    }
                }
                Ok(access)
            }
            Err(e) => {
                tokens.clear();
                Err(ApiError::RefreshFailed(e.to_string()))
            }
        }
    }

    // ========================
    // Helpers for the domain modules
    // ========================

    pub(crate) async fn fetch<R: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<R> {
        self.execute(request).await?.json()
    }

    pub(crate) async fn fetch_unit(&self, request: HttpRequest) -> ApiResult<()> {
        self.execute(request).await.map(|_| ())
    }

    pub(crate) async fn get_json<R: DeserializeOwned>(&self, path: impl Into<String>) -> ApiResult<R> {
        self.fetch(HttpRequest::get(path)).await
    }

    pub(crate) async fn send_json<B, R>(&self, method: Method, path: impl Into<String>, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.fetch(HttpRequest::new(method, path).json(body)?).await
    }

    pub(crate) async fn delete(&self, path: impl Into<String>) -> ApiResult<()> {
        self.fetch_unit(HttpRequest::new(Method::DELETE, path)).await
    }
}
