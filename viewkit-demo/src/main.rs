use viewkit::error::Error;
use viewkit::prelude::*;
use viewkit::view::engine::AskamaViewsRenderer;
use viewkit::view::ViewsBuilder;

mod controllers;
mod models;
mod templates;

use controllers::*;

#[tokio::main]
async fn main() -> Result<(), Error> {
    Logger::init();

    let views = Arc::new(
        ViewsBuilder::from_config(get_config())?
            .renderer(
                AskamaViewsRenderer::new()
                    .register::<templates::Home>("askama/home")
                    .register::<templates::Fruits>("askama/fruits"),
            )
            .build(),
    );

    let users = BasicAuth::new()
        .user(
            Authentication::new("john").attribute("email", "john@email.com"),
            "secret",
        )
        .handler();

    Server::new(vec![
        route!("/" => Index),
        route!("/tera" => Home::new("tera").with_views(views.clone())),
        route!("/handlebars" => Home::new("handlebars").with_views(views.clone())),
        route!("/minijinja" => Home::new("minijinja").with_views(views.clone())),
        route!("/askama" => Home::new("askama").with_views(views.clone())),
        route!("/fruits" => Fruits.with_views(views.clone())),
        route!("/fruits/map" => FruitsMap.with_views(views.clone())),
        route!("/fruits/null" => FruitsNull.with_views(views.clone())),
        route!("/fruits/turbo" => FruitsTurbo.with_views(views.clone())),
        route!("/fruits/htmx" => FruitsHtmx.with_views(views.clone())),
        route!("/security" => Security::new(users).with_views(views.clone())),
        route!("/redirect" => Redirect.with_views(views.clone())),
    ])?
    .launch()
    .await?;

    Ok(())
}
