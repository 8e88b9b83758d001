//! Minimal HTTP/1.1 plumbing for serving rendered views.
pub mod authorization;
pub mod body;
pub mod error;
pub mod handler;
pub mod head;
pub mod headers;
pub mod media_type;
pub mod path;
pub mod request;
pub mod response;
pub mod router;
pub mod server;

pub use authorization::Authorization;
pub use body::Body;
pub use error::Error;
pub use handler::Handler;
pub use head::{Head, Method, Version};
pub use headers::Headers;
pub use media_type::MediaType;
pub use path::{urldecode, Path, Query};
pub use request::Request;
pub use response::{Response, Status};
pub use router::Router;
pub use server::Server;
