//! HTTP client wrapper for the check-in backend.
//!
//! Adds the bearer token to every call made with a session, unwraps the
//! `{ success, message, data }` envelope and turns non-2xx responses into
//! [`AppError::Api`] carrying the server's message. There is no retry or
//! backoff: a failed call is reported as-is.

pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod endpoints;
pub mod members;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::session::Session;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Standard response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Envelope of calls whose payload is not needed.
#[derive(Debug, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

pub type Query = [(&'static str, String)];

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("checkdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Anonymous client for the configured backend.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::new(cfg.api_base(), Duration::from_secs(cfg.request_timeout_secs))
    }

    /// Same client, sending `Authorization: Bearer <token>` from now on.
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = Some(session.token.clone());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        debug!(%method, endpoint, "api request");
        let rb = self.http.request(method, self.url(endpoint));
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn execute(&self, rb: RequestBuilder) -> AppResult<Response> {
        let resp = rb.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = api_error(status, &body);
        warn!(status = status.as_u16(), error = %err, "api call failed");
        Err(err)
    }

    async fn read_json<T: DeserializeOwned>(resp: Response) -> AppResult<T> {
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AppError::Decode(e.to_string()))
    }

    /// GET returning the whole body (no envelope unwrapping).
    pub async fn get_raw<T: DeserializeOwned>(&self, endpoint: &str, query: &Query) -> AppResult<T> {
        let resp = self
            .execute(self.request(Method::GET, endpoint).query(query))
            .await?;
        Self::read_json(resp).await
    }

    /// GET returning `data` of the envelope.
    pub async fn get_data<T: DeserializeOwned>(&self, endpoint: &str, query: &Query) -> AppResult<T> {
        let env: Envelope<T> = self.get_raw(endpoint, query).await?;
        Ok(env.data)
    }

    pub async fn post_data<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .execute(self.request(Method::POST, endpoint).json(body))
            .await?;
        let env: Envelope<T> = Self::read_json(resp).await?;
        Ok(env.data)
    }

    pub async fn post_ack<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> AppResult<Ack> {
        let resp = self
            .execute(self.request(Method::POST, endpoint).json(body))
            .await?;
        Ok(Self::read_json(resp).await.unwrap_or_default())
    }

    pub async fn put_ack<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> AppResult<Ack> {
        let resp = self
            .execute(self.request(Method::PUT, endpoint).json(body))
            .await?;
        Ok(Self::read_json(resp).await.unwrap_or_default())
    }

    pub async fn delete(&self, endpoint: &str) -> AppResult<Ack> {
        let resp = self.execute(self.request(Method::DELETE, endpoint)).await?;
        Ok(Self::read_json(resp).await.unwrap_or_default())
    }

    /// GET of a binary payload (CSV/PDF export), passed through untouched.
    pub async fn download(&self, endpoint: &str, query: &Query) -> AppResult<Vec<u8>> {
        let resp = self
            .execute(self.request(Method::GET, endpoint).query(query))
            .await?;
        Ok(resp.bytes().await?.to_vec())
    }
}

/// Build the error for a non-2xx response, preferring the server's
/// `message` over the canonical reason phrase.
pub fn api_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

    AppError::Api {
        status: status.as_u16(),
        message,
    }
}
