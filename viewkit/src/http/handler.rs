use crate::controller::Controller;

use std::ops::Deref;

/// A controller mounted on an exact path.
pub struct Handler {
    path: String,
    controller: Box<dyn Controller>,
}

impl Handler {
    pub fn new(path: &str, controller: impl Controller + 'static) -> Self {
        Self {
            path: normalize(path),
            controller: Box::new(controller),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn controller_name(&self) -> &'static str {
        self.controller.controller_name()
    }
}

impl Deref for Handler {
    type Target = Box<dyn Controller>;

    fn deref(&self) -> &Self::Target {
        &self.controller
    }
}

/// `/fruits/` and `fruits` both become `/fruits`.
pub(crate) fn normalize(path: &str) -> String {
    let path = path.trim().trim_end_matches('/');

    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
