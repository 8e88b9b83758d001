//! Models and the `ModelAndView` pairing.
use serde::Serialize;
use serde_json::{Map, Value};

use super::Error;
use crate::http::MediaType;

/// Convert any serializable value into a model.
///
/// `None` becomes `Value::Null`.
pub fn model_of(model: impl Serialize) -> Result<Value, Error> {
    Ok(serde_json::to_value(model)?)
}

/// The model as engines see it: `null` is an empty object.
pub(crate) fn context(model: &Value) -> Value {
    match model {
        Value::Null => Value::Object(Map::new()),
        model => model.clone(),
    }
}

/// A view name paired with its model.
///
/// Either half may be missing. Without a view there's nothing to render, and the
/// model is returned as JSON instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAndView {
    view: Option<String>,
    model: Option<Value>,
    content_type: MediaType,
}

impl Default for ModelAndView {
    fn default() -> Self {
        Self {
            view: None,
            model: None,
            content_type: MediaType::text_html(),
        }
    }
}

impl ModelAndView {
    /// View with a model.
    ///
    /// ```
    /// # use viewkit::view::ModelAndView;
    /// # use serde_json::json;
    /// let mav = ModelAndView::new("fruits", json!({"fruit": {"name": "apple"}})).unwrap();
    /// assert_eq!(mav.get_view(), Some("fruits"));
    /// ```
    pub fn new(view: impl ToString, model: impl Serialize) -> Result<Self, Error> {
        Self::view(view).with_model(model)
    }

    /// View without a model.
    pub fn view(view: impl ToString) -> Self {
        Self {
            view: Some(view.to_string()),
            ..Default::default()
        }
    }

    /// Set the model. A `null` model counts as no model.
    pub fn with_model(mut self, model: impl Serialize) -> Result<Self, Error> {
        let model = model_of(model)?;
        self.model = if model.is_null() { None } else { Some(model) };
        Ok(self)
    }

    pub fn with_content_type(mut self, content_type: MediaType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn get_view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    pub fn set_view(&mut self, view: impl ToString) {
        self.view = Some(view.to_string());
    }

    pub fn model(&self) -> Option<&Value> {
        self.model.as_ref()
    }

    pub fn model_mut(&mut self) -> Option<&mut Value> {
        self.model.as_mut()
    }

    pub fn set_model(&mut self, model: Value) {
        self.model = Some(model);
    }

    /// The model, or an empty object if there is none yet.
    pub fn model_or_insert(&mut self) -> &mut Value {
        self.model.get_or_insert_with(|| Value::Object(Map::new()))
    }

    pub fn content_type(&self) -> &MediaType {
        &self.content_type
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Value) {
        (self.view, self.model.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Fruit {
        name: String,
        color: String,
    }

    #[test]
    fn test_model_and_view() {
        let mav = ModelAndView::new(
            "fruits",
            Fruit {
                name: "apple".into(),
                color: "red".into(),
            },
        )
        .unwrap();

        assert_eq!(mav.get_view(), Some("fruits"));
        assert_eq!(mav.model(), Some(&json!({"name": "apple", "color": "red"})));
        assert_eq!(mav.content_type(), &MediaType::text_html());
    }

    #[test]
    fn test_null_model() {
        let mut mav = ModelAndView::view("home").with_model(None::<Fruit>).unwrap();
        assert!(mav.model().is_none());

        mav.model_or_insert()["loggedIn"] = json!(true);
        assert_eq!(mav.model(), Some(&json!({"loggedIn": true})));
        assert_eq!(context(&Value::Null), json!({}));
    }
}
