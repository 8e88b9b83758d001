//! Exact-path request routing.
use super::handler::normalize;
use super::{Error, Handler, Path};
use crate::colors::MaybeColorize;

use std::collections::HashMap;
use tracing::info;

#[derive(Default)]
pub struct Router {
    handlers: Vec<Handler>,
    index: HashMap<String, usize>,
}

impl Router {
    /// Build the route table. Two handlers on the same path is an error.
    pub fn new(handlers: Vec<Handler>) -> Result<Self, Error> {
        let mut index = HashMap::new();

        for (i, handler) in handlers.iter().enumerate() {
            if index.insert(handler.path().to_string(), i).is_some() {
                return Err(Error::DuplicateRoute(handler.path().to_string()));
            }
        }

        Ok(Self { handlers, index })
    }

    pub fn find(&self, path: &Path) -> Option<&Handler> {
        self.index
            .get(&normalize(path.base()))
            .map(|i| &self.handlers[*i])
    }

    pub fn log_routes(&self) {
        let mut handlers = self.handlers.iter().collect::<Vec<_>>();
        handlers.sort_by_key(|h| h.path());

        for handler in handlers {
            info!(
                ">> {} => {}",
                handler.path().purple(),
                handler.controller_name().green()
            );
        }
    }
}
