//! Controllers answering with views.
use std::sync::Arc;

use async_trait::async_trait;

use super::{AuthHandler, Controller, Error};
use crate::http::{Request, Response};
use crate::view::{Outcome, ViewRoute, Views};

/// A controller which returns a model, a view, or a Turbo/htmx fragment
/// instead of a finished response.
///
/// ### Example
///
/// ```rust,ignore
/// struct Home;
///
/// #[async_trait]
/// impl ViewController for Home {
///     fn view_route(&self) -> ViewRoute {
///         ViewRoute::view("home")
///     }
///
///     async fn handle(&self, _request: &Request) -> Result<Outcome, Error> {
///         Ok(Outcome::model(json!({"loggedIn": true, "username": "sdelamo"}))?)
///     }
/// }
///
/// let handler = Home.with_views(views.clone()).route("/");
/// ```
#[async_trait]
pub trait ViewController: Sync + Send {
    /// View settings for this controller's route.
    fn view_route(&self) -> ViewRoute {
        ViewRoute::default()
    }

    async fn handle(&self, request: &Request) -> Result<Outcome, Error>;

    fn auth(&self) -> &AuthHandler {
        AuthHandler::allow_all()
    }

    fn controller_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Render this controller's outcomes with `views`.
    fn with_views(self, views: Arc<Views>) -> ViewHandler<Self>
    where
        Self: Sized,
    {
        ViewHandler::new(self, views)
    }
}

/// Turns a [`ViewController`] into a [`Controller`].
pub struct ViewHandler<C> {
    controller: C,
    route: ViewRoute,
    views: Arc<Views>,
}

impl<C: ViewController> ViewHandler<C> {
    pub fn new(controller: C, views: Arc<Views>) -> Self {
        Self {
            route: controller.view_route(),
            controller,
            views,
        }
    }
}

#[async_trait]
impl<C: ViewController + 'static> Controller for ViewHandler<C> {
    fn auth(&self) -> &AuthHandler {
        self.controller.auth()
    }

    async fn handle(&self, request: &Request) -> Result<Response, Error> {
        let outcome = self.controller.handle(request).await?;
        Ok(self.views.respond(request, &self.route, outcome)?)
    }

    fn controller_name(&self) -> &'static str {
        self.controller.controller_name()
    }
}
