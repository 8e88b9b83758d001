//! A collection of types, traits and macros
//! which when imported make working with viewkit easy.
//!
//! ```
//! use viewkit::prelude::*;
//! ```
pub use crate::config::{get_config, Config};
pub use crate::controller::{
    AuthHandler, Authentication, Authenticator, BasicAuth, Controller, Error, ViewController,
};
pub use crate::http::{MediaType, Method, Request, Response, Server};
pub use crate::logging::Logger;
pub use crate::route;
pub use crate::view::htmx::HtmxResponse;
pub use crate::view::turbo::{
    TurboFrame, TurboFrameView, TurboStream, TurboStreamAction, TurboView,
};
pub use crate::view::{ModelAndView, Outcome, Rendered, ViewRoute, Views, ViewsRenderer};

/// A macro to easily implement async traits methods.
pub use async_trait::async_trait;

pub use serde::{Deserialize, Serialize};
pub use serde_json::{json, Value};
pub use std::sync::Arc;
pub use time::{Duration, OffsetDateTime};
pub use tokio;
