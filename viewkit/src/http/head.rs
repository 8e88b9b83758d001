//! Request line and headers.

use std::marker::Unpin;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Authorization, Error, Headers, MediaType, Path, Query};
use crate::config::get_config;

/// HTTP method.
#[derive(PartialEq, Clone, Debug, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    Other(String),
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "PATCH" => Method::Patch,
            _ => Method::Other(value.to_string()),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Method::*;

        let name = match self {
            Get => "GET",
            Post => "POST",
            Put => "PUT",
            Delete => "DELETE",
            Head => "HEAD",
            Patch => "PATCH",
            Other(other) => other.as_str(),
        };

        write!(f, "{}", name)
    }
}

/// HTTP version.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Version {
    #[default]
    Http1,
    Http10,
    Unknown,
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        match value {
            "HTTP/1.1" => Version::Http1,
            "HTTP/1.0" => Version::Http10,
            _ => Version::Unknown,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Version::Http1 | Version::Unknown => write!(f, "HTTP/1.1"),
            Version::Http10 => write!(f, "HTTP/1.0"),
        }
    }
}

/// Request method, path, version and headers.
#[derive(Debug, Clone, Default)]
pub struct Head {
    method: Method,
    path: Path,
    version: Version,
    headers: Headers,
}

impl Head {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: Path::parse(path),
            version: Version::Http1,
            headers: Headers::new(),
        }
    }

    /// Read the request head from a stream.
    ///
    /// The whole head (request line and headers) must fit in `general.header_max_size` bytes.
    pub async fn read(mut stream: impl AsyncRead + Unpin) -> Result<Self, Error> {
        let max_size = get_config().general.header_max_size;
        let mut budget = max_size;

        let request = Self::read_line(&mut stream, &mut budget, max_size).await?;
        let mut request = request.split(' ').filter(|s| !s.is_empty());

        let method = Method::from(request.next().ok_or(Error::MalformedRequest("method"))?);
        let path = Path::parse(request.next().ok_or(Error::MalformedRequest("path"))?);
        let version = Version::from(request.next().ok_or(Error::MalformedRequest("version"))?);

        let mut headers = Headers::new();

        loop {
            let header = Self::read_line(&mut stream, &mut budget, max_size).await?;
            if header.is_empty() {
                break;
            }

            let (name, value) = header
                .split_once(':')
                .ok_or(Error::MalformedRequest("header"))?;
            headers.insert(name.trim(), value.trim());
        }

        Ok(Head {
            method,
            path,
            version,
            headers,
        })
    }

    /// Read a line terminated by `\r\n`, without the terminator.
    async fn read_line(
        mut stream: impl AsyncRead + Unpin,
        budget: &mut usize,
        max_size: usize,
    ) -> Result<String, Error> {
        let mut buf = Vec::new();
        let mut cr = false;

        loop {
            if *budget == 0 {
                return Err(Error::HeadTooLarge(max_size));
            }

            // `stream` should be buffered.
            let b = stream.read_u8().await?;
            *budget -= 1;

            match b {
                b'\r' => cr = true,
                b'\n' if cr => break,
                b'\n' => return Err(Error::MalformedRequest("nl before cr")),
                b => {
                    if cr {
                        return Err(Error::MalformedRequest("cr without nl"));
                    }
                    buf.push(b)
                }
            }
        }

        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    /// Parsed `Authorization` header, if set and supported.
    pub fn authorization(&self) -> Option<Authorization> {
        Authorization::parse(self.header("authorization")?)
    }

    /// Media types from the `Accept` header, highest quality first.
    pub fn accept(&self) -> Vec<MediaType> {
        self.header("accept")
            .map(|accept| MediaType::parse_accept(accept))
            .unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn query(&self) -> &Query {
        self.path.query()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Value of the `Content-Length` header.
    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length")?.parse().ok()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Get a header value by name. Case insensitive.
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    /// Should the connection stay open after the response?
    pub fn keep_alive(&self) -> bool {
        let connection = self.header("connection").map(|s| s.to_lowercase());

        match self.version {
            Version::Http10 => connection.map(|c| c.contains("keep-alive")) == Some(true),
            _ => connection.map(|c| c.contains("close")) != Some(true),
        }
    }
}
