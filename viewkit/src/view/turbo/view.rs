//! Route metadata that turns a view route into a Turbo response.
use serde_json::Value;

use super::{Loading, TurboFrameBuilder, TurboStreamAction, TurboStreamBuilder, VisitAction};
use crate::http::{MediaType, Request};

/// Header Turbo sends when a request comes from inside a frame.
pub const TURBO_FRAME: &str = "Turbo-Frame";

/// Does the request explicitly accept `text/vnd.turbo-stream.html`? Wildcards don't count.
pub fn accepts_turbo_stream(request: &Request) -> bool {
    request.accepts_explicitly(&MediaType::turbo_stream())
}

/// Render a route's model as a Turbo Stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurboView {
    /// View rendered into the stream's `<template>`.
    pub view: Option<String>,
    /// Defaults to `update`.
    pub action: TurboStreamAction,
    pub target_dom_id: Option<String>,
    pub target_css_query_selector: Option<String>,
}

impl TurboView {
    pub fn new(view: impl ToString) -> Self {
        Self {
            view: Some(view.to_string()),
            ..Default::default()
        }
    }

    pub fn action(mut self, action: TurboStreamAction) -> Self {
        self.action = action;
        self
    }

    pub fn target_dom_id(mut self, id: impl ToString) -> Self {
        self.target_dom_id = Some(id.to_string());
        self
    }

    pub fn target_css_query_selector(mut self, selector: impl ToString) -> Self {
        self.target_css_query_selector = Some(selector.to_string());
        self
    }

    /// A stream builder for this request, or `None` unless the request explicitly
    /// accepts Turbo Streams.
    ///
    /// Without a DOM id or selector, the target is the `Turbo-Frame` header.
    pub fn builder(&self, request: &Request, model: Value) -> Option<TurboStreamBuilder> {
        if !accepts_turbo_stream(request) {
            return None;
        }

        let frame = request.head().header(TURBO_FRAME);

        let mut builder = TurboStreamBuilder::default().action(self.action);

        if let Some(ref view) = self.view {
            builder = builder.template_view(view, model);
        }

        if let Some(ref id) = self.target_dom_id {
            builder = builder.target_dom_id(id);
        }

        if let Some(ref selector) = self.target_css_query_selector {
            builder = builder.target_css_query_selector(selector);
        }

        if self.target_dom_id.is_none() && self.target_css_query_selector.is_none() {
            if let Some(frame) = frame {
                builder = builder.target_dom_id(frame);
            }
        }

        Some(builder)
    }
}

/// Render a route's model inside a Turbo Frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurboFrameView {
    pub view: Option<String>,
    /// Frame id. Defaults to the `Turbo-Frame` header.
    pub id: Option<String>,
    pub action: Option<VisitAction>,
    pub target: Option<String>,
    pub src: Option<String>,
    pub loading: Option<Loading>,
    pub busy: Option<bool>,
    pub disabled: Option<bool>,
    pub autoscroll: Option<bool>,
}

impl TurboFrameView {
    pub fn new(view: impl ToString) -> Self {
        Self {
            view: Some(view.to_string()),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// A frame builder for this request, or `None` if the request isn't from a frame
    /// and the route has a plain view.
    pub fn builder(&self, request: &Request, has_view: bool, model: Value) -> Option<TurboFrameBuilder> {
        let frame = request.head().header(TURBO_FRAME);

        if has_view && frame.is_none() {
            return None;
        }

        let mut builder = TurboFrameBuilder::default();

        if let Some(ref view) = self.view {
            builder = builder.template_view(view, model);
        }

        match (&self.id, frame) {
            (Some(id), _) => builder = builder.id(id),
            (None, Some(frame)) => builder = builder.id(frame),
            (None, None) => (),
        }

        if let Some(action) = self.action {
            builder = builder.visit_action(action);
        }
        if let Some(ref target) = self.target {
            builder = builder.target(target);
        }
        if let Some(ref src) = self.src {
            builder = builder.src(src);
        }
        if let Some(loading) = self.loading {
            builder = builder.loading(loading);
        }
        if let Some(busy) = self.busy {
            builder = builder.busy(busy);
        }
        if let Some(disabled) = self.disabled {
            builder = builder.disabled(disabled);
        }
        if let Some(autoscroll) = self.autoscroll {
            builder = builder.autoscroll(autoscroll);
        }

        Some(builder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::view::turbo::Template;
    use serde_json::json;

    #[test]
    fn test_stream_builder_from_frame_header() {
        let turbo = TurboView::new("fruit");
        let request = Request::get("/fruits")
            .header("Accept", "text/vnd.turbo-stream.html, text/html")
            .header("Turbo-Frame", "dom_id");

        let builder = turbo
            .builder(&request, json!({"name": "apple"}))
            .expect("turbo request");
        assert_eq!(builder.get_action(), Some(TurboStreamAction::Update));
        assert_eq!(builder.get_target_dom_id(), Some("dom_id"));
        assert_eq!(
            builder.get_template(),
            Some(&Template::View {
                view: "fruit".into(),
                model: json!({"name": "apple"})
            })
        );

        // Plain browser request.
        assert!(turbo.builder(&Request::get("/fruits"), json!({})).is_none());
        assert!(turbo
            .builder(&Request::get("/fruits").header("Accept", "*/*"), json!({}))
            .is_none());
    }

    #[test]
    fn test_frame_navigation_is_not_a_stream() {
        let turbo = TurboView::new("fruit");
        let request = Request::get("/fruits")
            .header("Accept", "text/html")
            .header("Turbo-Frame", "fruits");
        assert!(turbo.builder(&request, json!({})).is_none());
    }

    #[test]
    fn test_stream_explicit_target() {
        let turbo = TurboView::new("fruit").target_dom_id("list").action(TurboStreamAction::Append);
        let request = Request::get("/")
            .header("Accept", "text/vnd.turbo-stream.html")
            .header("Turbo-Frame", "ignored");
        let builder = turbo.builder(&request, json!({})).unwrap();
        assert_eq!(builder.get_target_dom_id(), Some("list"));
        assert_eq!(builder.get_action(), Some(TurboStreamAction::Append));
    }

    #[test]
    fn test_frame_builder() {
        let frame = TurboFrameView::new("fruit");
        let request = Request::get("/").header("Turbo-Frame", "fruit-frame");
        let builder = frame.builder(&request, true, json!({})).unwrap();
        assert_eq!(builder.get_id(), Some("fruit-frame"));

        let frame = frame.id("explicit");
        let builder = frame.builder(&request, true, json!({})).unwrap();
        assert_eq!(builder.get_id(), Some("explicit"));

        assert!(frame.builder(&Request::get("/"), true, json!({})).is_none());
    }
}
