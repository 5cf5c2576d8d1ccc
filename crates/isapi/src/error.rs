use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
};

use log::warn;
use reqwest::StatusCode;

/// A response that the device answered with a status outside of `200..300`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub content: Vec<u8>,
}

impl ErrorResponse {
    /// The body, decoded as UTF-8 with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

#[derive(Debug)]
pub enum Error {
    /// The device rejected the credentials (401).
    Unauthorized(ErrorResponse),
    /// The user lacks the privilege for the resource (403).
    Forbidden(ErrorResponse),
    /// Any other unsuccessful status.
    Status(ErrorResponse),
    /// No response could be obtained.
    Transport(anyhow::Error),
}

impl Error {
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Unauthorized(r) | Self::Forbidden(r) | Self::Status(r) => Some(r),
            Self::Transport(_) => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(r) => write!(f, "Unauthorized ({}): {}", r.status, r.text()),
            Self::Forbidden(r) => write!(f, "Forbidden ({}): {}", r.status, r.text()),
            Self::Status(r) => write!(f, "Unexpected status {}: {}", r.status, r.text()),
            Self::Transport(e) => write!(f, "{e:#}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.into())
    }
}

/// Decode the body of a successful response, or classify the failure.
pub(crate) fn check_status(status: StatusCode, content: Vec<u8>) -> Result<String, Error> {
    if status.is_success() {
        return Ok(match String::from_utf8(content) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        });
    }
    warn!("Device responded with {status}");
    let response = ErrorResponse { status, content };
    Err(match status {
        StatusCode::UNAUTHORIZED => Error::Unauthorized(response),
        StatusCode::FORBIDDEN => Error::Forbidden(response),
        _ => Error::Status(response),
    })
}
