//! Views, the **V** in MVC.
//!
//! A view is a template referenced by name, e.g. `"home"` or `"tera/home"`. Templates are
//! rendered by one of the registered engines ([`ViewsRenderer`]); the first engine which has
//! the template renders it. Controllers return a model (any `serde::Serialize` value) or a
//! [`ModelAndView`], and [`Views::respond`] turns it into a response.
//!
//! # Example
//!
//! ```rust,ignore
//! use viewkit::prelude::*;
//!
//! let views = Views::from_config(get_config())?;
//! let rendered = views.render("home", json!({"username": "sdelamo", "loggedIn": true}))?;
//! assert_eq!(rendered.content_type, MediaType::text_html());
//! ```
pub mod cache;
pub mod csp;
pub mod decorator;
pub mod engine;
pub mod error;
pub mod htmx;
pub mod locator;
pub mod model;
pub mod names;
pub mod renderer;
pub mod security;
pub mod turbo;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use csp::{CspFilter, CspNonceViewModelProcessor};
pub use decorator::{ViewModelProcessor, ViewsModelDecorator};
pub use error::Error;
pub use htmx::{HtmxRequestHeaders, HtmxResponse};
pub use locator::ViewsRendererLocator;
pub use model::{model_of, ModelAndView};
pub use renderer::ViewsRenderer;
pub use security::SecurityViewModelProcessor;
pub use turbo::{TurboFrame, TurboFrameView, TurboStream, TurboView};
pub use views::{Outcome, Rendered, ViewRoute, Views, ViewsBuilder};
