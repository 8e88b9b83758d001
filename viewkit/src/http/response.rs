//! HTTP response.

use serde::Serialize;
use std::marker::Unpin;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{Body, Error, Headers, MediaType};

/// Response status.
#[derive(Debug, PartialEq)]
pub enum Status {
    Ok,
    MovedPermanently,
    Found,
    NotFound,
    InternalServerError,
    Code(u16),
}

impl Status {
    pub fn code(&self) -> u16 {
        use Status::*;

        match self {
            Ok => 200,
            MovedPermanently => 301,
            Found => 302,
            NotFound => 404,
            InternalServerError => 500,
            Code(code) => *code,
        }
    }

    pub fn ok(&self) -> bool {
        self.code() < 300
    }

    fn reason(&self) -> &'static str {
        match self.code() {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            431 => "Request Header Fields Too Large",
            500 => "Internal Server Error",
            _ => "",
        }
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Status {
        use Status::*;

        match code {
            200 => Ok,
            301 => MovedPermanently,
            302 => Found,
            404 => NotFound,
            500 => InternalServerError,
            code => Code(code),
        }
    }
}

/// HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    code: u16,
    headers: Headers,
    body: Body,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Empty `200 OK` response.
    pub fn new() -> Self {
        let mut headers = Headers::new();
        headers.insert("server", "viewkit");
        headers.insert("content-length", 0);

        Self {
            code: 200,
            headers,
            body: Body::default(),
        }
    }

    /// Set the body. `Content-Type` and `Content-Length` follow it.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self.headers.insert("content-length", self.body.len());
        self.headers.insert("content-type", self.body.mime_type());
        self
    }

    /// Body with an explicit media type.
    ///
    /// ```
    /// # use viewkit::http::{Response, MediaType};
    /// let response = Response::new().typed(MediaType::turbo_stream(), "<turbo-stream></turbo-stream>");
    /// assert_eq!(response.content_type(), Some(MediaType::turbo_stream()));
    /// ```
    pub fn typed(self, content_type: MediaType, bytes: impl Into<bytes::Bytes>) -> Self {
        self.body(Body::typed(content_type, bytes))
    }

    pub fn status(&self) -> Status {
        self.code.into()
    }

    pub fn code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// JSON body serialized from any value.
    pub fn json(self, body: impl Serialize) -> Result<Self, Error> {
        let body = serde_json::to_vec(&body)?;
        Ok(self.body(Body::Json(body)))
    }

    pub fn html(self, body: impl ToString) -> Self {
        self.body(Body::Html(body.to_string()))
    }

    pub fn text(self, body: impl ToString) -> Self {
        self.body(Body::Text(body.to_string()))
    }

    /// Set a header. The name is lowercased.
    pub fn header(mut self, name: impl ToString, value: impl ToString) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Media type from the `Content-Type` header.
    pub fn content_type(&self) -> Option<MediaType> {
        self.headers.get("content-type").map(|ct| MediaType::parse(ct))
    }

    pub fn get_body(&self) -> &Body {
        &self.body
    }

    /// Body as UTF-8, mostly for tests and logs.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(self.body.as_bytes()).to_string()
    }

    /// Write the response to a stream. The stream isn't flushed.
    pub async fn send(&self, mut stream: impl AsyncWrite + Unpin) -> Result<(), std::io::Error> {
        let status = self.status();
        let mut response = format!("HTTP/1.1 {} {}\r\n", status.code(), status.reason())
            .as_bytes()
            .to_vec();

        response.extend_from_slice(&self.headers.to_bytes());
        response.extend_from_slice(b"\r\n");

        stream.write_all(&response).await?;
        self.body.send(stream).await
    }

    /// Default `404 - Not Found` page.
    pub fn not_found() -> Self {
        Self::new()
            .html("<h3><center>404 - Not Found</center></h3>")
            .code(404)
    }

    /// Default `500 - Internal Server Error` page.
    ///
    /// The error is shown in debug builds only.
    pub fn internal_error(err: impl std::error::Error) -> Self {
        #[cfg(debug_assertions)]
        let detail = format!(
            "<br><br><center><code style=\"padding: 25px;\">{}</code></center>",
            escape(&err.to_string())
        );

        #[cfg(not(debug_assertions))]
        let detail = {
            let _ = err;
            String::new()
        };

        Self::new()
            .html(format!(
                "<h3><center>500 - Internal Server Error</center></h3>{}",
                detail
            ))
            .code(500)
    }

    pub fn unauthorized(realm: &str) -> Self {
        Self::new()
            .html("<h3><center>401 - Unauthorized</center></h3>")
            .code(401)
            .header("www-authenticate", format!("Basic realm=\"{}\"", realm))
    }

    /// `302 Found` redirect.
    pub fn redirect(self, to: impl ToString) -> Self {
        self.redirect_with(to, 302)
    }

    /// Redirect with a specific status, e.g. `301`.
    pub fn redirect_with(self, to: impl ToString, code: u16) -> Self {
        self.body(Body::default())
            .header("location", to)
            .header("cache-control", "no-cache")
            .code(code)
    }
}

#[cfg(debug_assertions)]
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_send() {
        let response = Response::new().html("<p>hi</p>");
        let mut out = vec![];
        response.send(&mut out).await.expect("send");
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(out.contains("content-length: 9\r\n"));
        assert!(out.contains("content-type: text/html; charset=utf-8\r\n"));
        assert!(out.ends_with("\r\n\r\n<p>hi</p>"));
    }

    #[test]
    fn test_redirect() {
        let response = Response::new().html("ignored").redirect_with("/", 301);
        assert_eq!(response.status(), Status::MovedPermanently);
        assert_eq!(response.headers().get("location"), Some(&"/".to_string()));
        assert!(response.get_body().is_empty());
    }
}
