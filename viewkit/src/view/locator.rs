//! Find the engine responsible for a view.
use std::sync::Arc;

use tracing::debug;

use super::{cache::Resolutions, Error, ViewsRenderer};
use crate::http::MediaType;

/// Ordered, immutable list of engines.
pub struct ViewsRendererLocator {
    renderers: Vec<Arc<dyn ViewsRenderer>>,
    resolutions: Resolutions,
}

impl ViewsRendererLocator {
    /// Engines are sorted by `order()`. Equal orders keep registration order.
    pub fn new(mut renderers: Vec<Arc<dyn ViewsRenderer>>, cache_views: bool) -> Self {
        renderers.sort_by_key(|renderer| renderer.order());

        Self {
            renderers,
            resolutions: Resolutions::new(cache_views),
        }
    }

    pub fn renderers(&self) -> &[Arc<dyn ViewsRenderer>] {
        &self.renderers
    }

    /// Engines that can produce `media_type`, in order.
    pub fn candidates<'a>(
        &'a self,
        media_type: &'a MediaType,
    ) -> impl Iterator<Item = &'a Arc<dyn ViewsRenderer>> + 'a {
        self.renderers
            .iter()
            .filter(move |renderer| renderer.accepts(media_type))
    }

    /// The first engine that can produce `media_type` and has `view`.
    ///
    /// `Ok(None)` if no engine produces that media type at all.
    /// `Err(TemplateNotFound)` if some do but none has the template.
    pub fn resolve(
        &self,
        view: &str,
        media_type: &MediaType,
    ) -> Result<Option<Arc<dyn ViewsRenderer>>, Error> {
        if let Some(index) = self.resolutions.get(view, media_type) {
            return Ok(Some(self.renderers[index].clone()));
        }

        let mut candidates = self
            .renderers
            .iter()
            .enumerate()
            .filter(|(_, renderer)| renderer.accepts(media_type))
            .peekable();

        if candidates.peek().is_none() {
            debug!("no view renderer found for {}", media_type);
            return Ok(None);
        }

        for (index, renderer) in candidates {
            if !view.is_empty() && renderer.exists(view) {
                self.resolutions.insert(view, media_type, index);
                return Ok(Some(renderer.clone()));
            }
        }

        Err(Error::TemplateNotFound(view.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}
