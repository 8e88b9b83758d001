//! Media types for `Content-Type` and `Accept`.
use std::fmt::{Display, Formatter};

/// A media type such as `text/html` or `text/vnd.turbo-stream.html`.
///
/// Parameters (e.g. `charset=utf-8`) are kept for display but ignored when comparing.
#[derive(Debug, Clone, Eq)]
pub struct MediaType {
    essence: String,
    params: Vec<(String, String)>,
}

impl PartialEq for MediaType {
    fn eq(&self, other: &Self) -> bool {
        self.essence == other.essence
    }
}

impl std::hash::Hash for MediaType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.essence.hash(state);
    }
}

impl MediaType {
    pub const TEXT_HTML: &'static str = "text/html";
    pub const TEXT_PLAIN: &'static str = "text/plain";
    pub const APPLICATION_JSON: &'static str = "application/json";
    pub const TURBO_STREAM: &'static str = "text/vnd.turbo-stream.html";

    pub fn new(essence: &str) -> Self {
        Self {
            essence: essence.trim().to_lowercase(),
            params: vec![],
        }
    }

    pub fn text_html() -> Self {
        Self::new(Self::TEXT_HTML)
    }

    pub fn text_plain() -> Self {
        Self::new(Self::TEXT_PLAIN)
    }

    pub fn application_json() -> Self {
        Self::new(Self::APPLICATION_JSON)
    }

    pub fn turbo_stream() -> Self {
        Self::new(Self::TURBO_STREAM)
    }

    /// Parse a single media type, e.g. `text/html; charset=utf-8`.
    pub fn parse(value: &str) -> Self {
        let mut parts = value.split(';');
        let mut media_type = Self::new(parts.next().unwrap_or(""));

        for param in parts {
            if let Some((name, value)) = param.split_once('=') {
                media_type.params.push((
                    name.trim().to_lowercase(),
                    value.trim().trim_matches('"').to_string(),
                ));
            }
        }

        media_type
    }

    /// Parse an `Accept` header into media types, highest quality first.
    /// Entries with equal quality keep their order; `q=0` entries are dropped.
    pub fn parse_accept(header: &str) -> Vec<MediaType> {
        let mut accepted = header
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(MediaType::parse)
            .filter(|media_type| media_type.quality() > 0.0)
            .collect::<Vec<_>>();

        accepted.sort_by(|a, b| b.quality().total_cmp(&a.quality()));
        accepted
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> &str {
        &self.essence
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.retain(|(key, _)| key != name);
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    fn quality(&self) -> f32 {
        self.param("q")
            .and_then(|q| q.parse::<f32>().ok())
            .unwrap_or(1.0)
    }

    /// Does this media type match `other`? `*/*` and `text/*` act as wildcards on either side.
    pub fn matches(&self, other: &MediaType) -> bool {
        let (a_type, a_sub) = self.split();
        let (b_type, b_sub) = other.split();

        (a_type == "*" || b_type == "*" || a_type == b_type)
            && (a_sub == "*" || b_sub == "*" || a_sub == b_sub)
    }

    fn split(&self) -> (&str, &str) {
        self.essence.split_once('/').unwrap_or((&self.essence, "*"))
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.essence)?;
        for (name, value) in &self.params {
            write!(f, "; {}={}", name, value)?;
        }
        Ok(())
    }
}

impl From<&str> for MediaType {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let media_type = MediaType::parse("Text/HTML; charset=utf-8");
        assert_eq!(media_type.essence(), "text/html");
        assert_eq!(media_type.param("charset"), Some("utf-8"));
        assert_eq!(media_type, MediaType::text_html());
        assert_eq!(media_type.to_string(), "text/html; charset=utf-8");
    }

    #[test]
    fn test_accept() {
        let accepted =
            MediaType::parse_accept("text/html;q=0.9, text/vnd.turbo-stream.html, */*;q=0.1");
        assert_eq!(accepted[0], MediaType::turbo_stream());
        assert_eq!(accepted[1], MediaType::text_html());
        assert_eq!(accepted[2].essence(), "*/*");

        let accepted = MediaType::parse_accept("text/csv;q=0, text/html;q=0.0, application/json");
        assert_eq!(accepted, vec![MediaType::application_json()]);
    }

    #[test]
    fn test_matches() {
        assert!(MediaType::new("*/*").matches(&MediaType::text_html()));
        assert!(MediaType::new("text/*").matches(&MediaType::new("text/csv")));
        assert!(!MediaType::new("text/csv").matches(&MediaType::text_html()));
    }
}
