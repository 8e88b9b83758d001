//! Response body.
//!
//! `Content-Type` and `Content-Length` come from the body variant.
use bytes::Bytes;
use std::marker::Unpin;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::MediaType;

/// Response body.
#[derive(Debug, Clone)]
pub enum Body {
    /// UTF-8 HTML.
    Html(String),
    /// UTF-8 text.
    Text(String),
    /// Serialized JSON.
    Json(Vec<u8>),
    /// Raw bytes.
    Bytes(Bytes),
    /// Bytes with an explicit media type, e.g. a rendered view.
    Typed {
        content_type: MediaType,
        bytes: Bytes,
    },
}

impl Default for Body {
    fn default() -> Self {
        Body::Bytes(Bytes::new())
    }
}

impl Body {
    pub fn html(text: impl ToString) -> Self {
        Self::Html(text.to_string())
    }

    pub fn typed(content_type: MediaType, bytes: impl Into<Bytes>) -> Self {
        Self::Typed {
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        use Body::*;

        match self {
            Html(text) | Text(text) => text.as_bytes(),
            Json(json) => json,
            Bytes(bytes) => bytes,
            Typed { bytes, .. } => bytes,
        }
    }

    /// Write the body. The stream isn't flushed.
    pub async fn send(&self, mut stream: impl AsyncWrite + Unpin) -> Result<(), std::io::Error> {
        stream.write_all(self.as_bytes()).await
    }

    /// Body size, for the `Content-Length` header.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of the `Content-Type` header for this body.
    ///
    /// ```
    /// # use viewkit::http::Body;
    /// let body = Body::html("<h1>Hello</h1>");
    /// assert_eq!(body.mime_type(), "text/html; charset=utf-8");
    /// ```
    pub fn mime_type(&self) -> String {
        use Body::*;

        match self {
            Html(_) => "text/html; charset=utf-8".into(),
            Text(_) => "text/plain; charset=utf-8".into(),
            Json(_) => MediaType::APPLICATION_JSON.into(),
            Bytes(_) => "application/octet-stream".into(),
            Typed { content_type, .. } => {
                if content_type.essence().starts_with("text/")
                    && content_type.param("charset").is_none()
                {
                    content_type.clone().with_param("charset", "utf-8").to_string()
                } else {
                    content_type.to_string()
                }
            }
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(body: Vec<u8>) -> Self {
        Self::Bytes(body.into())
    }
}

impl TryFrom<&serde_json::Value> for Body {
    type Error = serde_json::Error;

    fn try_from(json: &serde_json::Value) -> Result<Self, Self::Error> {
        Ok(Self::Json(serde_json::to_vec(json)?))
    }
}
