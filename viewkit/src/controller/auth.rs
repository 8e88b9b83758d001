//! Authentication.
//!
//! Controllers pick an [`Authenticator`] through [`Controller::auth`](super::Controller::auth).
//! An authenticator decides if a request may go through and who made it. The principal it
//! finds is attached to the request as an [`Authentication`], which the security model
//! processor exposes to templates.
use super::Error;
use crate::http::{Authorization, Request, Response};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use std::sync::Arc;

static ALLOW_ALL: Lazy<AuthHandler> = Lazy::new(AuthHandler::default);

/// The authenticated principal: a name and free-form attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Authentication {
    name: String,
    attributes: Map<String, Value>,
}

impl Authentication {
    pub fn new(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            attributes: Map::new(),
        }
    }

    pub fn attribute(mut self, name: impl ToString, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

/// An authentication mechanism wrapper that can be attached to a controller.
#[derive(Clone)]
pub struct AuthHandler {
    auth: Arc<Box<dyn Authenticator>>,
}

impl Default for AuthHandler {
    fn default() -> Self {
        Self::new(AllowAll)
    }
}

impl AuthHandler {
    pub fn new(auth: impl Authenticator + 'static) -> Self {
        AuthHandler {
            auth: Arc::new(Box::new(auth)),
        }
    }

    /// Allows every request, anonymously.
    pub fn allow_all() -> &'static AuthHandler {
        &ALLOW_ALL
    }

    pub fn auth(&self) -> &dyn Authenticator {
        self.auth.as_ref().as_ref()
    }
}

/// Authenticators need to implement this trait.
#[async_trait]
#[allow(unused_variables)]
pub trait Authenticator: Sync + Send {
    /// Allow or deny the request from going forward.
    async fn authorize(&self, request: &Request) -> Result<bool, Error>;

    /// Who made the request. `None` for anonymous requests.
    async fn authentication(&self, request: &Request) -> Option<Authentication> {
        None
    }

    /// Response for a denied request. Default is `401 - Unauthorized`.
    async fn denied(&self, request: &Request) -> Result<Response, Error> {
        Ok(Response::unauthorized("viewkit"))
    }

    fn handler(self) -> AuthHandler
    where
        Self: Sized + 'static,
    {
        AuthHandler::new(self)
    }
}

/// Allow all requests. This is the default for all controllers.
pub struct AllowAll;

#[async_trait]
impl Authenticator for AllowAll {
    async fn authorize(&self, _request: &Request) -> Result<bool, Error> {
        Ok(true)
    }
}

/// HTTP Basic authentication against a fixed list of users.
///
/// Requests without an `Authorization` header go through anonymously; wrong
/// credentials get `401 - Unauthorized`.
#[derive(Default)]
pub struct BasicAuth {
    users: Vec<(Authentication, String)>,
}

impl BasicAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user. The principal's name is the username.
    pub fn user(mut self, user: Authentication, password: impl ToString) -> Self {
        self.users.push((user, password.to_string()));
        self
    }

    fn find(&self, request: &Request) -> Option<&Authentication> {
        match request.authorization() {
            Some(Authorization::Basic { user, password }) => self
                .users
                .iter()
                .find(|(u, p)| u.name() == user && *p == password)
                .map(|(u, _)| u),
            _ => None,
        }
    }
}

#[async_trait]
impl Authenticator for BasicAuth {
    async fn authorize(&self, request: &Request) -> Result<bool, Error> {
        Ok(match request.authorization() {
            None => true,
            Some(_) => self.find(request).is_some(),
        })
    }

    async fn authentication(&self, request: &Request) -> Option<Authentication> {
        self.find(request).cloned()
    }

    async fn denied(&self, _request: &Request) -> Result<Response, Error> {
        Ok(Response::unauthorized("Basic"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn auth() -> BasicAuth {
        BasicAuth::new().user(
            Authentication::new("john").attribute("email", "john@email.com"),
            "secret",
        )
    }

    #[tokio::test]
    async fn test_basic_auth() {
        let auth = auth();

        let anonymous = Request::get("/");
        assert!(auth.authorize(&anonymous).await.unwrap());
        assert!(auth.authentication(&anonymous).await.is_none());

        let john = Request::get("/").header("Authorization", Authorization::basic_header("john", "secret"));
        assert!(auth.authorize(&john).await.unwrap());
        let principal = auth.authentication(&john).await.expect("john");
        assert_eq!(principal.name(), "john");
        assert_eq!(principal.attributes()["email"], "john@email.com");

        let wrong = Request::get("/").header("Authorization", Authorization::basic_header("john", "nope"));
        assert!(!auth.authorize(&wrong).await.unwrap());
        assert_eq!(auth.denied(&wrong).await.unwrap().status().code(), 401);
    }
}
