use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    /// An entity or a configuration entry does not exist.
    NotFound(String),
    /// The unique ID of an entity does not encode a channel.
    MalformedIdentifier { unique_id: String },
    /// A required parameter was not provided.
    MissingParameter(String),
    /// A parameter was provided but could not be interpreted.
    InvalidParameter(String),
    /// The device could not be reached or refused the request.
    Device(hikctl_isapi::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message)
            | Self::MissingParameter(message)
            | Self::InvalidParameter(message) => write!(f, "{message}"),
            Self::MalformedIdentifier { unique_id } => {
                write!(f, "Cannot determine channel ID from unique ID {unique_id}")
            }
            Self::Device(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Device(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hikctl_isapi::Error> for Error {
    fn from(value: hikctl_isapi::Error) -> Self {
        Self::Device(value)
    }
}

/// The failure reported to the user when an action does not complete.
#[derive(Debug)]
pub struct ActionError {
    message: String,
    cause: Error,
}

impl ActionError {
    pub(crate) fn new(message: impl Into<String>, cause: Error) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &Error {
        &self.cause
    }
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

impl From<Error> for ActionError {
    fn from(cause: Error) -> Self {
        Self::new(cause.to_string(), cause)
    }
}
