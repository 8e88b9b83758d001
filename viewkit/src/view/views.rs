//! The view dispatcher.
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{
    model_of,
    turbo::{TurboFrameBuilder, TurboFrameView, TurboStreamBuilder, TurboView},
    CspNonceViewModelProcessor, Error, HtmxResponse, ModelAndView, SecurityViewModelProcessor,
    ViewModelProcessor, ViewsModelDecorator, ViewsRenderer, ViewsRendererLocator,
};
use crate::config::{get_config, Config};
use crate::http::{Body, MediaType, Request, Response};

/// Output of a render: the body and its media type.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub content_type: MediaType,
    pub body: Bytes,
}

impl Rendered {
    /// The body as UTF-8 text. Invalid characters are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn into_response(self) -> Response {
        Response::new().typed(self.content_type, self.body)
    }
}

/// What a view controller returns.
#[derive(Debug)]
pub enum Outcome {
    /// A model for the route's view.
    Model(Value),
    /// A view and model chosen by the controller.
    ModelAndView(ModelAndView),
    /// A Turbo Stream, sent as `text/vnd.turbo-stream.html`.
    TurboStream(TurboStreamBuilder),
    /// Several Turbo Streams written back to back in one response.
    TurboStreams(Vec<TurboStreamBuilder>),
    /// A Turbo Frame, sent as `text/html`.
    TurboFrame(TurboFrameBuilder),
    /// Several views concatenated into one body.
    Htmx(HtmxResponse),
    /// A finished response, sent as-is.
    Response(Response),
    /// Nothing to render. Answered with `404 - Not Found`.
    Empty,
}

impl Outcome {
    /// A model for the route's view. `None` and `null` become [`Outcome::Empty`].
    pub fn model(model: impl Serialize) -> Result<Self, Error> {
        Ok(match model_of(model)? {
            Value::Null => Outcome::Empty,
            model => Outcome::Model(model),
        })
    }
}

impl From<ModelAndView> for Outcome {
    fn from(model_and_view: ModelAndView) -> Self {
        Outcome::ModelAndView(model_and_view)
    }
}

impl From<Response> for Outcome {
    fn from(response: Response) -> Self {
        Outcome::Response(response)
    }
}

impl From<HtmxResponse> for Outcome {
    fn from(htmx: HtmxResponse) -> Self {
        Outcome::Htmx(htmx)
    }
}

impl From<TurboStreamBuilder> for Outcome {
    fn from(builder: TurboStreamBuilder) -> Self {
        Outcome::TurboStream(builder)
    }
}

impl From<Vec<TurboStreamBuilder>> for Outcome {
    fn from(builders: Vec<TurboStreamBuilder>) -> Self {
        Outcome::TurboStreams(builders)
    }
}

impl From<TurboFrameBuilder> for Outcome {
    fn from(builder: TurboFrameBuilder) -> Self {
        Outcome::TurboFrame(builder)
    }
}

/// Per-route view settings.
#[derive(Debug, Clone, Default)]
pub struct ViewRoute {
    /// View rendered with the controller's model.
    pub view: Option<String>,
    /// Media types the route can answer with, most preferred first.
    pub produces: Vec<MediaType>,
    pub turbo_view: Option<TurboView>,
    pub turbo_frame_view: Option<TurboFrameView>,
}

impl ViewRoute {
    /// A route rendering `view`.
    pub fn view(view: impl ToString) -> Self {
        Self {
            view: Some(view.to_string()),
            ..Default::default()
        }
    }

    pub fn produces(mut self, media_type: MediaType) -> Self {
        self.produces.push(media_type);
        self
    }

    pub fn turbo_view(mut self, turbo_view: TurboView) -> Self {
        self.turbo_view = Some(turbo_view);
        self
    }

    pub fn turbo_frame_view(mut self, turbo_frame_view: TurboFrameView) -> Self {
        self.turbo_frame_view = Some(turbo_frame_view);
        self
    }

    /// Pick the response media type for this request.
    ///
    /// The first `produces` entry the client accepts, else the first entry, else `fallback`.
    pub fn media_type(&self, request: &Request, fallback: &MediaType) -> MediaType {
        self.produces
            .iter()
            .find(|media_type| request.accepts(media_type))
            .or_else(|| self.produces.first())
            .unwrap_or(fallback)
            .clone()
    }
}

/// Renders views by name with the registered engines.
///
/// ### Example
///
/// ```rust,ignore
/// use viewkit::prelude::*;
///
/// let views = Views::from_config(get_config())?;
/// let rendered = views.render("home", json!({"username": "sdelamo", "loggedIn": true}))?;
/// ```
pub struct Views {
    locator: ViewsRendererLocator,
    decorator: ViewsModelDecorator,
}

impl Views {
    pub fn builder() -> ViewsBuilder {
        ViewsBuilder {
            renderers: vec![],
            decorator: ViewsModelDecorator::default(),
            cache_views: get_config().general.cache_views,
        }
    }

    /// Every enabled engine compiled into the crate, plus the security and
    /// CSP nonce processors when they're turned on.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(ViewsBuilder::from_config(config)?.build())
    }

    pub fn renderers(&self) -> &[Arc<dyn ViewsRenderer>] {
        self.locator.renderers()
    }

    pub fn decorator(&self) -> &ViewsModelDecorator {
        &self.decorator
    }

    /// Does any engine have this view?
    pub fn exists(&self, view: &str) -> bool {
        !view.is_empty() && self.renderers().iter().any(|r| r.exists(view))
    }

    /// `(engine, view)` for every view the engines can list.
    pub fn view_names(&self) -> Vec<(&'static str, String)> {
        self.renderers()
            .iter()
            .flat_map(|r| r.view_names().into_iter().map(move |v| (r.name(), v)))
            .collect()
    }

    /// Render `view` as HTML with any serializable model.
    pub fn render(&self, view: &str, model: impl Serialize) -> Result<Rendered, Error> {
        let model = model_of(model)?;
        self.render_value(view, &model, &MediaType::text_html(), None)
    }

    /// Render `view` for a response of `media_type`.
    ///
    /// Only engines that can produce `media_type` are considered.
    pub fn render_value(
        &self,
        view: &str,
        model: &Value,
        media_type: &MediaType,
        request: Option<&Request>,
    ) -> Result<Rendered, Error> {
        match self.locator.resolve(view, media_type)? {
            Some(renderer) => Self::render_with(renderer.as_ref(), view, model, media_type, request),
            None => Err(Error::TemplateNotFound(view.to_string())),
        }
    }

    fn render_with(
        renderer: &dyn ViewsRenderer,
        view: &str,
        model: &Value,
        media_type: &MediaType,
        request: Option<&Request>,
    ) -> Result<Rendered, Error> {
        debug!("rendering \"{}\" with {}", view, renderer.name());

        let body = renderer.render(view, model, request)?;

        Ok(Rendered {
            content_type: media_type.clone(),
            body: Bytes::from(body),
        })
    }

    /// Run the model processors and render. `None` if there is no view.
    pub fn render_model_and_view(
        &self,
        mut model_and_view: ModelAndView,
        request: &Request,
    ) -> Result<Option<Rendered>, Error> {
        if model_and_view.get_view().is_none() {
            return Ok(None);
        }

        self.decorator.decorate(request, &mut model_and_view);
        let content_type = model_and_view.content_type().clone();
        let (view, model) = model_and_view.into_parts();
        let view = view.unwrap_or_default();

        self.render_value(&view, &model, &content_type, Some(request))
            .map(Some)
    }

    fn render_fragment(&self, view: &str, model: &Value, request: Option<&Request>) -> Result<String, Error> {
        let rendered = match request {
            Some(request) => {
                let model_and_view = ModelAndView::view(view).with_model(model)?;
                self.render_model_and_view(model_and_view, request)?
                    .ok_or_else(|| Error::TemplateNotFound(view.to_string()))?
            }
            None => self.render_value(view, model, &MediaType::text_html(), None)?,
        };

        Ok(rendered.text())
    }

    /// Render a Turbo Stream. A view template is rendered first.
    pub fn render_turbo_stream(
        &self,
        builder: TurboStreamBuilder,
        request: Option<&Request>,
    ) -> Result<Rendered, Error> {
        let stream = builder
            .render_template(|view, model| self.render_fragment(view, model, request))?
            .build()?;

        Ok(Rendered {
            content_type: MediaType::turbo_stream(),
            body: Bytes::from(stream.render()),
        })
    }

    /// Render several Turbo Streams into one body, in order.
    pub fn render_turbo_streams(
        &self,
        builders: Vec<TurboStreamBuilder>,
        request: Option<&Request>,
    ) -> Result<Rendered, Error> {
        let mut body = Vec::new();

        for builder in builders {
            body.extend_from_slice(&self.render_turbo_stream(builder, request)?.body);
        }

        Ok(Rendered {
            content_type: MediaType::turbo_stream(),
            body: Bytes::from(body),
        })
    }

    /// Render a Turbo Frame. A view template is rendered first.
    pub fn render_turbo_frame(
        &self,
        builder: TurboFrameBuilder,
        request: Option<&Request>,
    ) -> Result<Rendered, Error> {
        let frame = builder
            .render_template(|view, model| self.render_fragment(view, model, request))?
            .build()?;

        Ok(Rendered {
            content_type: MediaType::text_html(),
            body: Bytes::from(frame.render()),
        })
    }

    /// Render every view of an htmx response, in order, into one HTML body.
    pub fn render_htmx(&self, htmx: HtmxResponse, request: &Request) -> Result<Rendered, Error> {
        let mut body = Vec::new();

        for model_and_view in htmx.into_model_and_views() {
            if let Some(rendered) = self.render_model_and_view(model_and_view, request)? {
                body.extend_from_slice(&rendered.body);
            }
        }

        Ok(Rendered {
            content_type: MediaType::text_html(),
            body: Bytes::from(body),
        })
    }

    /// Turn a controller's outcome into a response for `route`.
    pub fn respond(
        &self,
        request: &Request,
        route: &ViewRoute,
        outcome: Outcome,
    ) -> Result<Response, Error> {
        let mut model_and_view = match outcome {
            Outcome::Response(response) => return Ok(response),
            Outcome::Empty => return Ok(Response::not_found()),
            Outcome::TurboStream(builder) => {
                return Ok(self.render_turbo_stream(builder, Some(request))?.into_response())
            }
            Outcome::TurboStreams(builders) => {
                return Ok(self.render_turbo_streams(builders, Some(request))?.into_response())
            }
            Outcome::TurboFrame(builder) => {
                return Ok(self.render_turbo_frame(builder, Some(request))?.into_response())
            }
            Outcome::Htmx(htmx) => return Ok(self.render_htmx(htmx, request)?.into_response()),
            Outcome::Model(model) => ModelAndView::default().with_model(model)?,
            Outcome::ModelAndView(model_and_view) => model_and_view,
        };

        let has_view = route.view.is_some();
        let model = model_and_view.model().cloned().unwrap_or(Value::Null);

        if let Some(ref turbo_view) = route.turbo_view {
            if let Some(builder) = turbo_view.builder(request, model.clone()) {
                return Ok(self.render_turbo_stream(builder, Some(request))?.into_response());
            }
        }

        if let Some(ref turbo_frame_view) = route.turbo_frame_view {
            if let Some(builder) = turbo_frame_view.builder(request, has_view, model) {
                return Ok(self.render_turbo_frame(builder, Some(request))?.into_response());
            }
        }

        let view = match route.view.clone().or_else(|| model_and_view.get_view().map(String::from)) {
            Some(view) => view,
            None => return Self::json(&model_and_view),
        };

        let media_type = route.media_type(request, model_and_view.content_type());

        let renderer = match self.locator.resolve(&view, &media_type)? {
            Some(renderer) => renderer,
            None => {
                debug!("no view renderer found for {}, sending JSON", media_type);
                return Self::json(&model_and_view);
            }
        };

        model_and_view.set_view(&view);
        self.decorator.decorate(request, &mut model_and_view);
        let (_, model) = model_and_view.into_parts();

        let rendered = Self::render_with(renderer.as_ref(), &view, &model, &media_type, Some(request))?;
        Ok(rendered.into_response())
    }

    fn json(model_and_view: &ModelAndView) -> Result<Response, Error> {
        let model = model_and_view.model().cloned().unwrap_or(Value::Null);
        Ok(Response::new().body(Body::try_from(&model)?))
    }
}

/// Builds [`Views`].
pub struct ViewsBuilder {
    renderers: Vec<Arc<dyn ViewsRenderer>>,
    decorator: ViewsModelDecorator,
    cache_views: bool,
}

impl ViewsBuilder {
    /// Builder with every enabled runtime engine and the configured model processors.
    ///
    /// Askama templates are compiled in, so they're added with [`ViewsBuilder::renderer`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        #[allow(unused_mut)]
        let mut builder = Views::builder().cache_views(config.general.cache_views);
        #[allow(unused_variables)]
        let views = &config.views;

        #[cfg(feature = "tera")]
        if views.tera.enabled {
            builder = builder.renderer(super::engine::TeraViewsRenderer::new(
                &views.folder,
                &views.tera.extension(super::engine::tera::DEFAULT_EXTENSION),
            )?);
        }

        #[cfg(feature = "handlebars")]
        if views.handlebars.enabled {
            builder = builder.renderer(
                super::engine::HandlebarsViewsRenderer::new(
                    &views.folder,
                    &views.handlebars.extension(super::engine::handlebars::DEFAULT_EXTENSION),
                )?
                .dev_mode(!config.general.cache_views)?,
            );
        }

        #[cfg(feature = "minijinja")]
        if views.minijinja.enabled {
            builder = builder.renderer(super::engine::MinijinjaViewsRenderer::new(
                &views.folder,
                &views.minijinja.extension(super::engine::minijinja::DEFAULT_EXTENSION),
            ));
        }

        if views.security.enabled {
            builder = builder.processor(SecurityViewModelProcessor::new(views.security.clone()));
        }

        if views.csp.enabled && views.csp.generate_nonce {
            builder = builder.processor(CspNonceViewModelProcessor);
        }

        Ok(builder)
    }

    pub fn renderer(mut self, renderer: impl ViewsRenderer + 'static) -> Self {
        self.renderers.push(Arc::new(renderer));
        self
    }

    pub fn processor(mut self, processor: impl ViewModelProcessor + 'static) -> Self {
        self.decorator.add(processor);
        self
    }

    /// Memoize which engine renders each view.
    pub fn cache_views(mut self, cache_views: bool) -> Self {
        self.cache_views = cache_views;
        self
    }

    pub fn build(self) -> Views {
        Views {
            locator: ViewsRendererLocator::new(self.renderers, self.cache_views),
            decorator: self.decorator,
        }
    }
}
