use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed request: {0}")]
    MalformedRequest(&'static str),

    #[error("request head exceeds {0} bytes")]
    HeadTooLarge(usize),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate route: {0}")]
    DuplicateRoute(String),

    #[error("{0}")]
    Controller(Box<crate::controller::Error>),
}

impl Error {
    pub fn code(&self) -> u16 {
        match self {
            Self::MalformedRequest(_) | Self::Json(_) => 400,
            Self::HeadTooLarge(_) => 431,
            _ => 500,
        }
    }
}

impl From<crate::controller::Error> for Error {
    fn from(error: crate::controller::Error) -> Error {
        Error::Controller(Box::new(error))
    }
}
