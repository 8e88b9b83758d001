//! HTTP headers.
use std::collections::{hash_map::Iter, HashMap};

/// HTTP headers, keyed by lowercase name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Headers {
    headers: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
        }
    }

    /// Set a header. The name is lowercased, an existing value is replaced.
    ///
    /// # Example
    ///
    /// ```
    /// # use viewkit::http::Headers;
    /// let mut headers = Headers::new();
    /// headers.insert("Turbo-Frame", "fruit");
    /// assert_eq!(headers.get("turbo-frame"), Some(&String::from("fruit")));
    /// ```
    pub fn insert(&mut self, name: impl ToString, value: impl ToString) {
        self.headers
            .insert(name.to_string().to_lowercase(), value.to_string());
    }

    /// Get a header value by name. Case insensitive.
    pub fn get(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_lowercase())
    }

    /// Remove a header by name. Case insensitive.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.headers.remove(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> Iter<String, String> {
        self.headers.iter()
    }

    /// Serialize headers for the wire. Names are sorted so output is stable.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut names = self.headers.keys().collect::<Vec<_>>();
        names.sort();

        let mut bytes = Vec::new();
        for name in names {
            bytes.extend_from_slice(name.as_bytes());
            bytes.extend_from_slice(b": ");
            bytes.extend_from_slice(self.headers[name].as_bytes());
            bytes.extend_from_slice(b"\r\n");
        }
        bytes
    }
}

impl From<HashMap<String, String>> for Headers {
    fn from(headers: HashMap<String, String>) -> Self {
        let mut result = Headers::new();
        for (name, value) in headers {
            result.insert(name, value);
        }
        result
    }
}
