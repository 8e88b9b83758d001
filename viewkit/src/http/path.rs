//! Request path and query string.
use std::collections::HashMap;
use std::str::FromStr;

/// Decode a percent-encoded string. `+` is treated as a space.
///
/// ```
/// # use viewkit::http::urldecode;
/// assert_eq!(urldecode("hello%20world+again"), "hello world again");
/// ```
pub fn urldecode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|hex| u8::from_str_radix(hex, 16).ok()) {
                    Some(b) => {
                        result.push(b);
                        i += 3;
                    }
                    None => {
                        result.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                result.push(b' ');
                i += 1;
            }
            b => {
                result.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&result).to_string()
}

/// Query string parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    query: HashMap<String, String>,
}

impl Query {
    pub fn parse(data: &str) -> Self {
        let mut query = HashMap::new();
        let data = data.split('#').next().unwrap_or("");

        for part in data.split('&').filter(|part| !part.is_empty()) {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            query.insert(urldecode(key), urldecode(value));
        }

        Self { query }
    }

    pub fn get<T: FromStr>(&self, name: &str) -> Option<T> {
        self.query.get(name).and_then(|value| value.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

/// Request path, e.g. `/fruits?color=orange`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    base: String,
    query: Query,
}

impl Default for Path {
    fn default() -> Self {
        Self::parse("/")
    }
}

impl Path {
    pub fn parse(path: &str) -> Self {
        let (base, query) = path.split_once('?').unwrap_or((path, ""));
        let base = urldecode(base);
        let base = if base.is_empty() { "/".to_string() } else { base };

        Self {
            base,
            query: Query::parse(query),
        }
    }

    /// Path without the query string.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn query(&self) -> &Query {
        &self.query
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_path() {
        let path = Path::parse("/fruits/map?color=orange&name=apple%20pie#top");
        assert_eq!(path.base(), "/fruits/map");
        assert_eq!(path.query().get::<String>("color"), Some("orange".into()));
        assert_eq!(path.query().get::<String>("name"), Some("apple pie".into()));
        assert_eq!(Path::parse("").base(), "/");
    }

    #[test]
    fn test_urldecode_broken() {
        assert_eq!(urldecode("100%"), "100%");
        assert_eq!(urldecode("%zz"), "%zz");
        assert_eq!(urldecode("%2Fviews"), "/views");
    }
}
