//! View errors.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No registered engine has a template with this name.
    #[error("view \"{0}\" does not exist")]
    TemplateNotFound(String),

    /// The engine found the template but failed to evaluate it.
    #[error("{engine} failed to render \"{view}\": {source}")]
    RenderFailure {
        view: String,
        engine: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The engine couldn't load or compile its templates.
    #[error("{engine} failed to load templates: {message}")]
    Load {
        engine: &'static str,
        message: String,
    },

    #[error("model is not serializable: {0}")]
    Model(#[from] serde_json::Error),

    #[error("\"{0}\" is not a valid attribute")]
    InvalidAttribute(String),

    #[error("turbo stream action is required")]
    MissingAction,

    #[error("CSP nonce generation must be enabled to use the '{{#nonceValue}}' placeholder")]
    CspNonceDisabled,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn render_failure(
        view: &str,
        engine: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::RenderFailure {
            view: view.to_string(),
            engine,
            source: Box::new(err),
        }
    }

    pub fn load(engine: &'static str, err: impl std::fmt::Display) -> Self {
        Error::Load {
            engine,
            message: err.to_string(),
        }
    }

    /// HTTP status for this error.
    pub fn code(&self) -> u16 {
        match self {
            Error::TemplateNotFound(_) => 404,
            _ => 500,
        }
    }
}
