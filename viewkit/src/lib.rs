//! viewkit renders server-side views with pluggable template engines.
//!
//! A view is a template referenced by name. Controllers return a model, or a view and a model,
//! and viewkit picks the engine which has the template, runs the model processors, renders, and
//! sends the result. Tera, Handlebars, MiniJinja, and Askama are supported out of the box, each
//! behind a cargo feature.
//!
//! # Getting started
//!
//! ```bash
//! cargo add viewkit
//! cargo add tokio@1 --features full
//! ```
//!
//! Most types and traits are available with one import:
//!
//! ```
//! use viewkit::prelude::*;
//! ```
//!
//! ### Rendering a view
//!
//! ```rust,ignore
//! use viewkit::prelude::*;
//!
//! let views = Views::from_config(get_config())?;
//! let rendered = views.render("home", json!({"username": "sdelamo", "loggedIn": true}))?;
//! ```
//!
//! ### Controllers
//!
//! ```rust
//! use viewkit::prelude::*;
//!
//! struct Home;
//!
//! #[viewkit::async_trait]
//! impl ViewController for Home {
//!     fn view_route(&self) -> ViewRoute {
//!         ViewRoute::view("home")
//!     }
//!
//!     async fn handle(&self, _request: &Request) -> Result<Outcome, Error> {
//!         Ok(Outcome::model(json!({"username": "sdelamo", "loggedIn": true}))?)
//!     }
//! }
//! ```
//!
//! ### HTTP server
//!
//! ```rust,ignore
//! use viewkit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), viewkit::error::Error> {
//!     let views = Arc::new(Views::from_config(get_config())?);
//!
//!     Server::new(vec![
//!         route!("/" => Home.with_views(views.clone())),
//!     ])?
//!     .launch()
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
pub mod colors;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod logging;
pub mod prelude;
pub mod view;

/// Wrapper around async traits to make them easy to use.
pub use async_trait::async_trait;
/// Serde is used for (de)serialization.
pub use serde;
/// Models are JSON values.
pub use serde_json;
/// Tokio is an asynchronous runtime for Rust.
pub use tokio;

/// Mount a controller on a path.
///
/// ```
/// # use viewkit::prelude::*;
/// # struct Index;
/// # #[viewkit::async_trait]
/// # impl Controller for Index {
/// #     async fn handle(&self, _request: &Request) -> Result<Response, Error> {
/// #         Ok(Response::new().html("<h1>Hello</h1>"))
/// #     }
/// # }
/// let handler = route!("/" => Index);
/// assert_eq!(handler.path(), "/");
/// ```
#[macro_export]
macro_rules! route {
    ($path:expr => $controller:expr) => {
        $crate::controller::Controller::route($controller, $path)
    };
}
