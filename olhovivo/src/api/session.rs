//! Session-managed request executor.
//!
//! Olho Vivo authenticates with a token once and then tracks the session
//! through cookies. Sessions expire server-side without notice; the only
//! sign is a response body of the form `{"Message": "..."}` where a result
//! was expected. The executor spots that, logs in again and retries the
//! call, up to `max_retries` times.

use std::fmt;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::Error;

use super::endpoint;
use super::error::{AuthenticationFailure, MalformedResponse, TransportError, excerpt};
use super::transport::{RawResponse, Transport, cookie_header};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No login yet, or the last login failed.
    #[default]
    Unauthenticated,
    /// Logged in; cookies are being replayed.
    Authenticated,
    /// The server reported the session as expired.
    ExpiredDetected,
}

#[derive(Debug, Default)]
struct Session {
    state: SessionState,
    cookie: Option<String>,
}

/// Outcome of a single GET, before retry handling.
enum Fetched {
    Payload(Value),
    Expired(String),
}

/// Executes API calls within one logical session.
///
/// The session is held for the whole of each call, so concurrent callers
/// run one after another and never see each other's re-logins.
pub struct Executor<T> {
    transport: T,
    token: String,
    max_retries: u32,
    session: Mutex<Session>,
}

impl<T: Transport> Executor<T> {
    /// Create an executor. No request is made until the first call.
    pub fn new(transport: T, token: impl Into<String>, max_retries: u32) -> Self {
        Self {
            transport,
            token: token.into(),
            max_retries,
            session: Mutex::new(Session::default()),
        }
    }

    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state
    }

    /// Log in now, replacing any current session.
    pub async fn login(&self) -> Result<(), Error> {
        let mut session = self.session.lock().await;
        self.authenticate(&mut session).await
    }

    /// GET `endpoint` and return its JSON body.
    ///
    /// Logs in first if there is no live session. If the server reports
    /// the session as expired, logs in again and retries, at most
    /// `max_retries` times.
    pub async fn execute(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, Error> {
        let mut session = self.session.lock().await;

        if session.state != SessionState::Authenticated {
            self.authenticate(&mut session).await?;
        }

        let mut retries = 0;
        loop {
            match self.fetch(&session, endpoint, params).await? {
                Fetched::Payload(value) => return Ok(value),
                Fetched::Expired(message) => {
                    session.state = SessionState::ExpiredDetected;

                    if retries >= self.max_retries {
                        return Err(AuthenticationFailure::SessionExpired { retries, message }.into());
                    }

                    retries += 1;
                    info!(endpoint, retry = retries, "session expired, logging in again");
                    self.authenticate(&mut session).await?;
                }
            }
        }
    }

    async fn authenticate(&self, session: &mut Session) -> Result<(), Error> {
        session.state = SessionState::Unauthenticated;
        session.cookie = None;

        debug!("logging in");
        let response = self
            .transport
            .post(endpoint::LOGIN, &[("token", self.token.as_str())])
            .await?;

        if !response.is_success() {
            return Err(status_error(&response).into());
        }

        // Anything that isn't JSON counts as a refusal
        let accepted = serde_json::from_str::<Value>(&response.body)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);
        if !accepted {
            return Err(AuthenticationFailure::Rejected.into());
        }

        let cookie =
            cookie_header(&response.set_cookies).ok_or(AuthenticationFailure::MissingCookie)?;

        session.cookie = Some(cookie);
        session.state = SessionState::Authenticated;
        info!("session established");
        Ok(())
    }

    async fn fetch(
        &self,
        session: &Session,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Fetched, Error> {
        debug!(endpoint, "GET");
        let response = self
            .transport
            .get(endpoint, params, session.cookie.as_deref())
            .await?;

        let parsed = serde_json::from_str::<Value>(&response.body);

        // Expiry arrives as a 401; any other failing status is an error
        // even when its body carries a `Message`
        let may_be_expiry = response.is_success() || response.status == 401;
        if may_be_expiry
            && let Ok(value) = &parsed
            && let Some(message) = expiry_message(value)
        {
            return Ok(Fetched::Expired(message));
        }

        if !response.is_success() {
            return Err(status_error(&response).into());
        }

        let value = parsed.map_err(|e| MalformedResponse::Json {
            message: e.to_string(),
            body: Some(excerpt(&response.body)),
        })?;

        Ok(Fetched::Payload(value))
    }
}

impl<T> fmt::Debug for Executor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

fn status_error(response: &RawResponse) -> TransportError {
    TransportError::Status {
        status: response.status,
        message: excerpt(&response.body),
    }
}

/// The server's session-expired signal: an object with a non-null
/// `Message` field.
fn expiry_message(value: &Value) -> Option<String> {
    let message = value.as_object()?.get("Message")?;
    match message {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Loose truthiness used to judge the login reply.
///
/// `null`, `false`, `0`, `""`, `"0"` and `[]` are falsy; everything else,
/// including any object, is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}
