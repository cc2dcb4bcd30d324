//! Olho Vivo API error types.

/// The request never produced a usable response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-2xx status that was not a session expiry
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },
}

/// The server answered, but not with the shape we expected.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MalformedResponse {
    /// Body was not JSON at all
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// JSON was valid but a key was missing or had the wrong type
    #[error("unexpected {endpoint} payload: {message}")]
    Shape {
        endpoint: &'static str,
        message: String,
    },
}

/// The session could not be established or kept alive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationFailure {
    /// Login answered with a falsy body (bad token)
    #[error("login rejected the token")]
    Rejected,

    /// Login succeeded but no session cookie came back
    #[error("server didn't set session credentials")]
    MissingCookie,

    /// Expiry signal persisted through every allowed re-login
    #[error("session still expired after {retries} re-login(s): {message}")]
    SessionExpired { retries: u32, message: String },
}

/// Keep error bodies short enough to log or display.
pub(crate) fn excerpt(body: &str) -> String {
    body.chars().take(500).collect()
}
