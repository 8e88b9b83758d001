use serde_json::Map;
use viewkit::prelude::*;
use viewkit::view::HtmxRequestHeaders;

use crate::models::Fruit;

/// Links to every page.
pub struct Index;

#[async_trait]
impl Controller for Index {
    async fn handle(&self, _request: &Request) -> Result<Response, Error> {
        let links = [
            "/tera",
            "/handlebars",
            "/minijinja",
            "/askama",
            "/fruits",
            "/fruits/map",
            "/fruits/turbo",
            "/fruits/htmx",
            "/security",
        ]
        .iter()
        .map(|link| format!("<li><a href=\"{0}\">{0}</a></li>", link))
        .collect::<String>();

        Ok(Response::new().html(format!("<h1>viewkit</h1><ul>{}</ul>", links)))
    }
}

/// The same page rendered by each engine.
pub struct Home {
    engine: &'static str,
}

impl Home {
    pub fn new(engine: &'static str) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ViewController for Home {
    fn view_route(&self) -> ViewRoute {
        ViewRoute::view(format!("{}/home", self.engine))
    }

    async fn handle(&self, request: &Request) -> Result<Outcome, Error> {
        let username = request
            .path()
            .query()
            .get::<String>("username")
            .unwrap_or_else(|| "sdelamo".into());

        Ok(Outcome::model(json!({
            "loggedIn": true,
            "username": username,
        }))?)
    }
}

/// Any serializable value is a model.
pub struct Fruits;

#[async_trait]
impl ViewController for Fruits {
    fn view_route(&self) -> ViewRoute {
        ViewRoute::view("tera/fruits")
    }

    async fn handle(&self, _request: &Request) -> Result<Outcome, Error> {
        Ok(Outcome::model(Fruit::new("apple", "red"))?)
    }
}

/// The controller picks the view.
pub struct FruitsMap;

#[async_trait]
impl ViewController for FruitsMap {
    async fn handle(&self, _request: &Request) -> Result<Outcome, Error> {
        let mut model = Map::new();
        model.insert("fruit".into(), "orange".into());
        model.insert("color".into(), "orange".into());

        Ok(ModelAndView::new("handlebars/fruits", model)?.into())
    }
}

/// No model: `404 - Not Found`.
pub struct FruitsNull;

#[async_trait]
impl ViewController for FruitsNull {
    fn view_route(&self) -> ViewRoute {
        ViewRoute::view("askama/fruits")
    }

    async fn handle(&self, _request: &Request) -> Result<Outcome, Error> {
        Ok(Outcome::model(None::<Fruit>)?)
    }
}

/// Full page for browsers, a Turbo Stream for Turbo.
pub struct FruitsTurbo;

#[async_trait]
impl ViewController for FruitsTurbo {
    fn view_route(&self) -> ViewRoute {
        ViewRoute::view("minijinja/fruits").turbo_view(
            TurboView::new("minijinja/fruit")
                .action(TurboStreamAction::Append)
                .target_dom_id("fruits"),
        )
    }

    async fn handle(&self, _request: &Request) -> Result<Outcome, Error> {
        Ok(Outcome::model(Fruit::new("kiwi", "green"))?)
    }
}

/// Fragments for htmx, the full page otherwise.
pub struct FruitsHtmx;

#[async_trait]
impl ViewController for FruitsHtmx {
    async fn handle(&self, request: &Request) -> Result<Outcome, Error> {
        let fruit = Fruit::new("Apple", "Red");

        Ok(match HtmxRequestHeaders::from_request(request) {
            Some(_) => HtmxResponse::new()
                .model_and_view(ModelAndView::new("minijinja/fruit", &fruit)?)
                .model_and_view(ModelAndView::new(
                    "minijinja/message",
                    json!({"message": "Swap me directly!"}),
                )?)
                .into(),
            None => ModelAndView::new("minijinja/fruits", &fruit)?.into(),
        })
    }
}

/// Shows the signed-in user. Try `john` / `secret`.
pub struct Security {
    auth: AuthHandler,
}

impl Security {
    pub fn new(auth: AuthHandler) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl ViewController for Security {
    fn view_route(&self) -> ViewRoute {
        ViewRoute::view("tera/security")
    }

    fn auth(&self) -> &AuthHandler {
        &self.auth
    }

    async fn handle(&self, _request: &Request) -> Result<Outcome, Error> {
        Ok(Outcome::Model(json!({"title": "Security"})))
    }
}

/// Responses pass through untouched.
pub struct Redirect;

#[async_trait]
impl ViewController for Redirect {
    fn view_route(&self) -> ViewRoute {
        ViewRoute::view("tera/home")
    }

    async fn handle(&self, _request: &Request) -> Result<Outcome, Error> {
        Ok(Response::new().redirect_with("/", 301).into())
    }
}
