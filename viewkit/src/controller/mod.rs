//! Controllers, the **C** in MVC.
//!
//! A [`Controller`] handles every request for the path it's mounted on and returns a
//! [`Response`]. Controllers which render views implement [`ViewController`] instead and
//! return an [`Outcome`](crate::view::Outcome).
use async_trait::async_trait;
use tracing::error;

pub mod auth;
pub mod error;
pub mod view;

pub use auth::{AllowAll, AuthHandler, Authentication, Authenticator, BasicAuth};
pub use error::Error;
pub use view::{ViewController, ViewHandler};

use crate::http::{Handler, Request, Response};

/// The HTTP controller.
///
/// Authentication is built-in: requests go through [`Controller::auth`] first.
#[async_trait]
#[allow(unused_variables)]
pub trait Controller: Sync + Send {
    /// Authentication for this controller. Everyone is allowed by default.
    fn auth(&self) -> &AuthHandler {
        AuthHandler::allow_all()
    }

    fn route(self, path: &str) -> Handler
    where
        Self: Sized + 'static,
    {
        Handler::new(path, self)
    }

    /// Internal function to handle the HTTP request. Do not implement this unless
    /// you're looking to do something really custom.
    ///
    /// Errors become `404`, `401`, or `500` pages and are logged.
    async fn handle_internal(&self, request: &Request) -> Response {
        let auth = self.auth().auth();

        match auth.authorize(request).await {
            Ok(true) => (),
            Ok(false) => {
                return match auth.denied(request).await {
                    Ok(response) => response,
                    Err(err) => Response::internal_error(err),
                }
            }
            Err(err) => {
                error!("{}", err);
                return Response::internal_error(err);
            }
        }

        let request = match auth.authentication(request).await {
            Some(authentication) => request.clone().with_authentication(authentication),
            None => request.clone(),
        };

        match self.handle(&request).await {
            Ok(response) => response,
            Err(err) => {
                error!("{}", err);

                match err.code() {
                    404 => Response::not_found(),
                    401 => Response::unauthorized("viewkit"),
                    _ => Response::internal_error(err),
                }
            }
        }
    }

    /// Handle the request. Implement this function to define how your controller
    /// will respond to requests.
    async fn handle(&self, request: &Request) -> Result<Response, Error>;

    /// The name of this controller. Used for logging.
    fn controller_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::http::{Authorization, Status};
    use crate::view::testing::StubRenderer;
    use crate::view::{Outcome, SecurityViewModelProcessor, ViewRoute, Views};
    use serde_json::json;
    use std::sync::Arc;

    struct Missing;

    #[async_trait]
    impl Controller for Missing {
        async fn handle(&self, _request: &Request) -> Result<Response, Error> {
            Err(crate::view::Error::TemplateNotFound("missing".into()).into())
        }
    }

    struct Broken;

    #[async_trait]
    impl Controller for Broken {
        async fn handle(&self, _request: &Request) -> Result<Response, Error> {
            Err(Error::new(std::io::Error::other("disk on fire")))
        }
    }

    #[tokio::test]
    async fn test_errors() {
        let response = Missing.handle_internal(&Request::get("/")).await;
        assert_eq!(response.status(), Status::NotFound);

        let response = Broken.handle_internal(&Request::get("/")).await;
        assert_eq!(response.status(), Status::InternalServerError);
    }

    struct Secured {
        auth: AuthHandler,
    }

    #[async_trait]
    impl ViewController for Secured {
        fn view_route(&self) -> ViewRoute {
            ViewRoute::view("security")
        }

        fn auth(&self) -> &AuthHandler {
            &self.auth
        }

        async fn handle(&self, _request: &Request) -> Result<Outcome, Error> {
            Ok(Outcome::Model(json!({})))
        }
    }

    #[tokio::test]
    async fn test_view_controller() {
        let views = Views::builder()
            .renderer(StubRenderer::new("stub").template("security", "User: {{security}}"))
            .processor(SecurityViewModelProcessor::default())
            .build();
        let auth = BasicAuth::new()
            .user(Authentication::new("john"), "secret")
            .handler();
        let handler = Secured { auth }.with_views(Arc::new(views));

        let request =
            Request::get("/").header("Authorization", Authorization::basic_header("john", "secret"));
        let response = handler.handle_internal(&request).await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.body_string(),
            r#"User: {"attributes":{},"name":"john"}"#
        );

        let request =
            Request::get("/").header("Authorization", Authorization::basic_header("john", "nope"));
        let response = handler.handle_internal(&request).await;
        assert_eq!(response.status().code(), 401);

        let response = handler.handle_internal(&Request::get("/")).await;
        assert_eq!(response.body_string(), "User: {{security}}");
    }
}
