//! Model processors enrich a model before it's rendered.
use std::sync::Arc;

use tracing::debug;

use super::ModelAndView;
use crate::http::Request;

/// Adds data to a model, e.g. the logged in user.
pub trait ViewModelProcessor: Send + Sync {
    fn process(&self, request: &Request, model_and_view: &mut ModelAndView);
}

impl<F> ViewModelProcessor for F
where
    F: Fn(&Request, &mut ModelAndView) + Send + Sync,
{
    fn process(&self, request: &Request, model_and_view: &mut ModelAndView) {
        self(request, model_and_view)
    }
}

/// Runs every registered processor, in registration order.
#[derive(Default, Clone)]
pub struct ViewsModelDecorator {
    processors: Vec<Arc<dyn ViewModelProcessor>>,
}

impl ViewsModelDecorator {
    pub fn new(processors: Vec<Arc<dyn ViewModelProcessor>>) -> Self {
        Self { processors }
    }

    pub fn add(&mut self, processor: impl ViewModelProcessor + 'static) {
        self.processors.push(Arc::new(processor));
    }

    /// Run the processors. Views without a model are left alone.
    pub fn decorate(&self, request: &Request, model_and_view: &mut ModelAndView) {
        if model_and_view.model().is_none() {
            return;
        }

        debug!("running {} view model processors", self.processors.len());

        for processor in &self.processors {
            processor.process(request, model_and_view);
        }
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decorate_in_order() {
        let mut decorator = ViewsModelDecorator::default();
        decorator.add(|_: &Request, mav: &mut ModelAndView| {
            if let Some(model) = mav.model_mut() {
                model["config"] = json!("first");
            }
        });
        decorator.add(|_: &Request, mav: &mut ModelAndView| {
            if let Some(model) = mav.model_mut() {
                model["config"] = json!("second");
            }
        });

        let mut mav = ModelAndView::new("home", json!({})).unwrap();
        decorator.decorate(&Request::default(), &mut mav);
        assert_eq!(mav.model(), Some(&json!({"config": "second"})));

        let mut empty = ModelAndView::view("home");
        decorator.decorate(&Request::default(), &mut empty);
        assert!(empty.model().is_none());
    }
}
