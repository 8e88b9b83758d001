//! Turbo Frame elements.
use serde_json::Value;

use super::{attribute, Loading, Template, VisitAction};
use crate::view::Error;

/// A `<turbo-frame>` element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurboFrame {
    id: Option<String>,
    src: Option<String>,
    visit_action: Option<VisitAction>,
    loading: Option<Loading>,
    target: Option<String>,
    busy: Option<bool>,
    disabled: Option<bool>,
    autoscroll: Option<bool>,
    template: Option<String>,
}

impl TurboFrame {
    pub fn builder() -> TurboFrameBuilder {
        TurboFrameBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Render the frame with its content.
    ///
    /// ```
    /// # use viewkit::view::turbo::{TurboFrame, Loading};
    /// let frame = TurboFrame::builder()
    ///     .id("fruit")
    ///     .src("/fruits/1")
    ///     .loading(Loading::Lazy)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(frame.render(), r#"<turbo-frame id="fruit" src="/fruits/1" loading="lazy"></turbo-frame>"#);
    /// ```
    pub fn render(&self) -> String {
        let mut html = String::from("<turbo-frame");

        let attributes = [
            ("id", self.id.clone()),
            ("src", self.src.clone()),
            ("data-turbo-action", self.visit_action.map(|a| a.to_string())),
            ("loading", self.loading.map(|l| l.to_string())),
            ("target", self.target.clone()),
            ("busy", self.busy.map(|b| b.to_string())),
            ("disabled", self.disabled.map(|b| b.to_string())),
            ("autoscroll", self.autoscroll.map(|b| b.to_string())),
        ];

        for (name, value) in attributes {
            if let Some(value) = value {
                html.push_str(&attribute(name, &value));
            }
        }

        html.push('>');
        if let Some(ref template) = self.template {
            html.push_str(template);
        }
        html.push_str("</turbo-frame>");

        html
    }
}

impl std::fmt::Display for TurboFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Builds a [`TurboFrame`].
#[derive(Debug, Clone, Default)]
pub struct TurboFrameBuilder {
    frame: TurboFrame,
    template: Option<Template>,
}

impl TurboFrameBuilder {
    pub fn id(mut self, id: impl ToString) -> Self {
        self.frame.id = Some(id.to_string());
        self
    }

    pub fn src(mut self, src: impl ToString) -> Self {
        self.frame.src = Some(src.to_string());
        self
    }

    pub fn visit_action(mut self, action: VisitAction) -> Self {
        self.frame.visit_action = Some(action);
        self
    }

    pub fn loading(mut self, loading: Loading) -> Self {
        self.frame.loading = Some(loading);
        self
    }

    pub fn target(mut self, target: impl ToString) -> Self {
        self.frame.target = Some(target.to_string());
        self
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.frame.busy = Some(busy);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.frame.disabled = Some(disabled);
        self
    }

    pub fn autoscroll(mut self, autoscroll: bool) -> Self {
        self.frame.autoscroll = Some(autoscroll);
        self
    }

    pub fn template(mut self, html: impl ToString) -> Self {
        self.template = Some(Template::Html(html.to_string()));
        self
    }

    pub fn template_view(mut self, view: impl ToString, model: Value) -> Self {
        self.template = Some(Template::View {
            view: view.to_string(),
            model,
        });
        self
    }

    pub fn template_model(mut self, new_model: Value) -> Self {
        if let Some(Template::View { ref mut model, .. }) = self.template {
            *model = new_model;
        }
        self
    }

    pub fn get_id(&self) -> Option<&str> {
        self.frame.id.as_deref()
    }

    pub fn get_template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Turn a view template into HTML with `render`.
    pub fn render_template(
        mut self,
        render: impl FnOnce(&str, &Value) -> Result<String, Error>,
    ) -> Result<Self, Error> {
        if let Some(Template::View { ref view, ref model }) = self.template {
            self.template = Some(Template::Html(render(view, model)?));
        }
        Ok(self)
    }

    /// Build the frame. Fails if the template is a view that hasn't been rendered.
    pub fn build(self) -> Result<TurboFrame, Error> {
        let mut frame = self.frame;

        frame.template = match self.template {
            Some(Template::Html(html)) => Some(html),
            Some(Template::View { view, .. }) => {
                return Err(Error::InvalidAttribute(format!(
                    "template view \"{}\" is not rendered",
                    view
                )))
            }
            None => None,
        };

        Ok(frame)
    }
}
