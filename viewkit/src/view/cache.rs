//! View resolution cache.
//!
//! Remembers which engine renders a view for a media type, so `exists` checks
//! run once per view. Enabled by default in release builds (`general.cache_views`).
use std::collections::HashMap;

use parking_lot::Mutex;

use crate::http::MediaType;

#[derive(Default)]
pub struct Resolutions {
    enabled: bool,
    entries: Mutex<HashMap<(String, MediaType), usize>>,
}

impl Resolutions {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Index of the engine for this view, if resolved before.
    pub fn get(&self, view: &str, media_type: &MediaType) -> Option<usize> {
        if !self.enabled {
            return None;
        }

        self.entries
            .lock()
            .get(&(view.to_string(), media_type.clone()))
            .copied()
    }

    pub fn insert(&self, view: &str, media_type: &MediaType, engine: usize) {
        if self.enabled {
            self.entries
                .lock()
                .insert((view.to_string(), media_type.clone()), engine);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
