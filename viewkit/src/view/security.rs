//! Expose the authenticated principal to templates.
use serde_json::{Map, Value};

use super::{ModelAndView, ViewModelProcessor};
use crate::config::Security;
use crate::http::Request;

/// Puts `{security: {name, attributes}}` into object models when the request is authenticated.
///
/// The three keys come from `[views.security]`. An existing `security` entry is left alone.
#[derive(Debug, Clone, Default)]
pub struct SecurityViewModelProcessor {
    config: Security,
}

impl SecurityViewModelProcessor {
    pub fn new(config: Security) -> Self {
        Self { config }
    }
}

impl ViewModelProcessor for SecurityViewModelProcessor {
    fn process(&self, request: &Request, model_and_view: &mut ModelAndView) {
        let authentication = match request.authentication() {
            Some(authentication) => authentication,
            None => return,
        };

        let mut security = Map::new();
        security.insert(
            self.config.principal_name_key.clone(),
            Value::String(authentication.name().to_string()),
        );
        security.insert(
            self.config.attributes_key.clone(),
            Value::Object(authentication.attributes().clone()),
        );

        if let Value::Object(model) = model_and_view.model_or_insert() {
            model
                .entry(self.config.security_key.clone())
                .or_insert(Value::Object(security));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::controller::Authentication;
    use serde_json::json;

    fn john() -> Request {
        Request::get("/").with_authentication(
            Authentication::new("john").attribute("email", "john@email.com"),
        )
    }

    #[test]
    fn test_security_model() {
        let processor = SecurityViewModelProcessor::default();
        let mut mav = ModelAndView::new("securitydecorator", json!({"title": "Hi"})).unwrap();
        processor.process(&john(), &mut mav);

        assert_eq!(
            mav.model(),
            Some(&json!({
                "title": "Hi",
                "security": {"name": "john", "attributes": {"email": "john@email.com"}}
            }))
        );
    }

    #[test]
    fn test_custom_keys_and_existing_entry() {
        let processor = SecurityViewModelProcessor::new(Security {
            security_key: "securitycustom".into(),
            ..Default::default()
        });

        let mut mav = ModelAndView::view("securitydecorator");
        processor.process(&john(), &mut mav);
        assert_eq!(mav.model().unwrap()["securitycustom"]["name"], "john");

        let mut mav = ModelAndView::new("x", json!({"securitycustom": "mine"})).unwrap();
        processor.process(&john(), &mut mav);
        assert_eq!(mav.model().unwrap()["securitycustom"], "mine");
    }

    #[test]
    fn test_anonymous() {
        let processor = SecurityViewModelProcessor::default();
        let mut mav = ModelAndView::new("x", json!({})).unwrap();
        processor.process(&Request::get("/"), &mut mav);
        assert_eq!(mav.model(), Some(&json!({})));
    }
}
