//! Top-level error type.
//!
//! Every public operation fails with exactly one of four kinds. They reach
//! the caller unchanged: the library neither logs nor swallows them.

use crate::api::{AuthenticationFailure, ConversionError, MalformedResponse, TransportError};
use crate::domain::ValidationError;

/// Errors returned by the Olho Vivo client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An entity field failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Login failed, or the session could not be renewed
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthenticationFailure),

    /// The payload was not the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] MalformedResponse),

    /// Network failure, timeout, or an unexpected HTTP status
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl From<ConversionError> for Error {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::Malformed(e) => Error::MalformedResponse(e),
            ConversionError::Invalid(e) => Error::Validation(e),
        }
    }
}
