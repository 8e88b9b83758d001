//! HTTP request.

use std::marker::Unpin;
use std::net::SocketAddr;
use std::ops::Deref;
use std::sync::Arc;

use serde::Deserialize;
use time::OffsetDateTime;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Error, Head, MediaType, Method};
use crate::controller::Authentication;

/// HTTP request.
///
/// The body is loaded into memory and shared behind an [`Arc`], so cloning is cheap.
#[derive(Debug, Clone)]
pub struct Request {
    head: Head,
    inner: Arc<Inner>,
    authentication: Option<Authentication>,
    csp_nonce: Option<String>,
    received_at: OffsetDateTime,
}

#[derive(Debug, Default)]
struct Inner {
    body: Vec<u8>,
    peer: Option<SocketAddr>,
}

impl Default for Request {
    fn default() -> Self {
        Self::new(Head::default())
    }
}

impl Request {
    fn new(head: Head) -> Self {
        Self {
            head,
            inner: Arc::new(Inner::default()),
            authentication: None,
            csp_nonce: None,
            received_at: OffsetDateTime::now_utc(),
        }
    }

    /// Read the whole request from a stream.
    pub async fn read(peer: SocketAddr, mut stream: impl AsyncRead + Unpin) -> Result<Self, Error> {
        let head = Head::read(&mut stream).await?;
        let content_length = head.content_length().unwrap_or(0);
        let mut body = vec![0u8; content_length];
        stream
            .read_exact(&mut body)
            .await
            .map_err(|_| Error::MalformedRequest("incorrect content length"))?;

        Ok(Request {
            inner: Arc::new(Inner {
                body,
                peer: Some(peer),
            }),
            ..Self::new(head)
        })
    }

    /// Build a `GET` request for `path`. Mostly useful in tests.
    ///
    /// ```
    /// # use viewkit::http::Request;
    /// let request = Request::get("/fruits").header("Accept", "text/html");
    /// assert_eq!(request.path().base(), "/fruits");
    /// ```
    pub fn get(path: &str) -> Self {
        Self::new(Head::new(Method::Get, path))
    }

    /// Add a header to the request.
    pub fn header(mut self, name: impl ToString, value: impl ToString) -> Self {
        self.head.headers_mut().insert(name, value);
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.inner = Arc::new(Inner {
            body: body.into(),
            peer: self.inner.peer,
        });
        self
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    /// Client address, if the request came in over the network.
    pub fn peer(&self) -> Option<&SocketAddr> {
        self.inner.peer.as_ref()
    }

    pub fn body(&self) -> &[u8] {
        &self.inner.body
    }

    /// Body as UTF-8. Invalid characters are replaced.
    pub fn string(&self) -> String {
        String::from_utf8_lossy(self.body()).to_string()
    }

    /// Body deserialized from JSON.
    pub fn json<'a, T: Deserialize<'a>>(&'a self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self.body())
    }

    /// The authenticated principal, if an authentication layer set one.
    pub fn authentication(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }

    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    /// Nonce generated for this request by the CSP filter.
    pub fn csp_nonce(&self) -> Option<&str> {
        self.csp_nonce.as_deref()
    }

    pub fn with_csp_nonce(mut self, nonce: impl ToString) -> Self {
        self.csp_nonce = Some(nonce.to_string());
        self
    }

    /// Does the `Accept` header allow this media type?
    ///
    /// Wildcards such as `text/*` match. Entries with `q=0` are refused.
    pub fn accepts(&self, media_type: &MediaType) -> bool {
        self.head
            .accept()
            .iter()
            .any(|accepted| accepted.matches(media_type))
    }

    /// Does the `Accept` header list this media type by name?
    ///
    /// Wildcards don't count, so `*/*` doesn't accept Turbo Streams.
    pub fn accepts_explicitly(&self, media_type: &MediaType) -> bool {
        self.head.accept().iter().any(|accepted| accepted == media_type)
    }

    pub fn received_at(&self) -> OffsetDateTime {
        self.received_at
    }
}

impl Deref for Request {
    type Target = Head;

    fn deref(&self) -> &Self::Target {
        &self.head
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_read_request() {
        let body = "POST /fruits HTTP/1.1\r\nContent-Length: 17\r\n\r\n{\"name\":\"apple\"}\n";
        let request = Request::read("127.0.0.1:1234".parse().unwrap(), body.as_bytes())
            .await
            .expect("request");

        assert_eq!(request.method(), &Method::Post);
        assert_eq!(request.string(), "{\"name\":\"apple\"}\n");
        let json: serde_json::Value = request.json().expect("json");
        assert_eq!(json["name"], "apple");
        assert!(request.peer().is_some());
    }

    #[tokio::test]
    async fn test_short_body() {
        let body = "POST / HTTP/1.1\r\nContent-Length: 100\r\n\r\nshort";
        let err = Request::read("127.0.0.1:1234".parse().unwrap(), body.as_bytes())
            .await
            .expect_err("body is short");
        assert!(matches!(err, Error::MalformedRequest(_)));
    }

    #[test]
    fn test_accepts() {
        let request = Request::get("/").header("accept", "*/*");
        assert!(request.accepts(&MediaType::turbo_stream()));
        assert!(!request.accepts_explicitly(&MediaType::turbo_stream()));

        let request = Request::get("/").header("accept", "text/vnd.turbo-stream.html, text/html");
        assert!(request.accepts_explicitly(&MediaType::turbo_stream()));

        let request = Request::get("/").header("accept", "text/*");
        assert!(request.accepts(&MediaType::new("text/csv")));
        assert!(!request.accepts(&MediaType::application_json()));

        let request = Request::get("/").header("accept", "text/csv;q=0, text/html");
        assert!(!request.accepts(&MediaType::new("text/csv")));
        assert!(request.accepts(&MediaType::text_html()));

        assert!(!Request::get("/").accepts(&MediaType::text_html()));
    }
}
