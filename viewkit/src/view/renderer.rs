//! The engine plugin seam.
use serde_json::Value;

use super::Error;
use crate::http::{MediaType, Request};

/// A template engine that can render views by name.
///
/// Implementations are registered with [`super::Views`] and consulted in `order()`.
pub trait ViewsRenderer: Send + Sync {
    /// Engine name, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Does this engine have a template for `view`?
    fn exists(&self, view: &str) -> bool;

    /// Render `view` with `model`. A `null` model renders like an empty one.
    fn render(&self, view: &str, model: &Value, request: Option<&Request>) -> Result<String, Error>;

    /// The only media type this engine produces. `None` means any.
    fn produces(&self) -> Option<MediaType> {
        None
    }

    /// Lower runs first.
    fn order(&self) -> i32 {
        0
    }

    /// Every view this engine knows about, if it can list them.
    fn view_names(&self) -> Vec<String> {
        vec![]
    }

    /// Can this engine produce `media_type`?
    fn accepts(&self, media_type: &MediaType) -> bool {
        match self.produces() {
            Some(produces) => &produces == media_type,
            None => true,
        }
    }
}
