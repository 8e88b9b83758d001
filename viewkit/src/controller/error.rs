//! Errors that can be returned by a controller.
//!
//! Automatic conversions exist for view, JSON, and IO errors, so the `?` operator works
//! inside controllers. Anything else can be wrapped with [`Error::new`].
use crate::http::Error as HttpError;
use thiserror::Error;

/// A controller error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("view error: {0}")]
    View(#[from] crate::view::Error),

    #[error("http error: {0}")]
    Http(Box<HttpError>),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Error(#[from] Box<dyn std::error::Error + Sync + Send>),
}

impl Error {
    /// Create new error from any error implementing the standard [`std::error::Error`] trait.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::Error(Box::new(err))
    }

    /// HTTP status for this error.
    pub fn code(&self) -> u16 {
        match self {
            Error::View(err) => err.code(),
            Error::Http(err) => err.code(),
            Error::Unauthorized => 401,
            _ => 500,
        }
    }
}

impl From<HttpError> for Error {
    fn from(error: HttpError) -> Self {
        Error::Http(Box::new(error))
    }
}
