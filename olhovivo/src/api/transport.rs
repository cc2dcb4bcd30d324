//! HTTP transport.
//!
//! The transport only moves bytes: it sends one request and hands back the
//! status, body and any `Set-Cookie` headers. Session handling lives in
//! [`Executor`](super::Executor), which replays cookies explicitly instead
//! of relying on a client-side cookie store.

use std::future::Future;
use std::time::Duration;

use reqwest::RequestBuilder;
use reqwest::header::{COOKIE, SET_COOKIE};

use super::error::TransportError;

/// What came back from one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// Raw `Set-Cookie` header values, in order.
    pub set_cookies: Vec<String>,
}

impl RawResponse {
    /// A response with no cookies.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            set_cookies: Vec::new(),
        }
    }

    /// Add a `Set-Cookie` header value.
    pub fn with_cookie(mut self, set_cookie: impl Into<String>) -> Self {
        self.set_cookies.push(set_cookie.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the upstream API.
///
/// `query` is sent as a query string only when it is non-empty; the
/// upstream treats an empty query differently from no query.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;

    fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` with a per-request deadline.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("olhovivo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(request: RequestBuilder) -> Result<RawResponse, TransportError> {
        let response = request.send().await?;

        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            body,
            set_cookies,
        })
    }
}

impl Transport for HttpTransport {
    async fn post(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        let mut request = self.http.post(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        Self::send(request).await
    }

    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Result<RawResponse, TransportError> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        Self::send(request).await
    }
}

/// Fold `Set-Cookie` values into a single `Cookie` request header.
///
/// Attributes (`path`, `HttpOnly`, ...) are dropped; only `name=value`
/// pairs are kept. Returns `None` when no pair is present.
pub(crate) fn cookie_header(set_cookies: &[String]) -> Option<String> {
    let pairs: Vec<&str> = set_cookies
        .iter()
        .filter_map(|c| c.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('=') && !pair.starts_with('='))
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
