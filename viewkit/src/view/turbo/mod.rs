//! Server side of [Hotwire Turbo](https://turbo.hotwired.dev).
//!
//! Turbo Streams are `<template>` partials that tell Turbo on the frontend to
//! append, replace, or remove DOM elements. Turbo Frames wrap a page fragment
//! so it can be swapped on its own.
//!
//! ### Example
//!
//! ```
//! use viewkit::view::turbo::{TurboStream, TurboStreamAction};
//!
//! let stream = TurboStream::builder()
//!     .action(TurboStreamAction::Append)
//!     .target_dom_id("fruits")
//!     .template("<li>apple</li>")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     stream.render(),
//!     r#"<turbo-stream action="append" target="fruits"><template><li>apple</li></template></turbo-stream>"#
//! );
//! ```
pub mod action;
pub mod frame;
pub mod stream;
pub mod view;

pub use action::{Loading, TurboStreamAction, VisitAction};
pub use frame::{TurboFrame, TurboFrameBuilder};
pub use stream::{TurboStream, TurboStreamBuilder};
pub use view::{accepts_turbo_stream, TurboFrameView, TurboView, TURBO_FRAME};

use serde_json::Value;

/// What goes inside a stream's `<template>` or a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Already rendered HTML.
    Html(String),
    /// A view rendered by the dispatcher.
    View { view: String, model: Value },
}

/// `name="value"`, with the value escaped for a double-quoted attribute.
pub(crate) fn attribute(name: &str, value: &str) -> String {
    format!(
        " {}=\"{}\"",
        name,
        value
            .replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
    )
}
