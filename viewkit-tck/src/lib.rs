//! Conformance suite for viewkit engines.
//!
//! Every engine gets the same views, written in its own template language, and must
//! render them to the same HTML, modulo whitespace. Each engine's integration test builds a
//! [`Views`] around its renderer with [`views`] and expands [`tck!`] to run every case.
//!
//! Views each engine must provide:
//!
//! | view               | model                                        | output                                                   |
//! |--------------------|----------------------------------------------|----------------------------------------------------------|
//! | `home`             | `username`, `loggedIn`                       | `<h1>username: <span>{username}</span></h1>` if logged in |
//! | `fruits`           | `fruit`, `color`                             | `<h1>fruit: {fruit}</h1><h1>color: {color}</h1>`          |
//! | `fruits-processor` | `fruit`, `config.name`                       | `<h1>fruit: {fruit}</h1><h1>config: {config.name}</h1>`   |
//! | `fruit`            | `fruit`                                      | `<li>{fruit}</li>`                                        |
//! | `security`         | `securitycustom.name`, `.attributes.email`   | `<p>User: {name} email: {email}</p>`                      |
//! | `escape`           | `text`                                       | `<p>{text}</p>`, HTML-escaped                             |
use serde::Serialize;
use serde_json::{json, Value};

use viewkit::config::Security;
use viewkit::controller::Authentication;
use viewkit::http::{MediaType, Request, Response, Status};
use viewkit::view::turbo::{TurboStream, TurboStreamAction, TurboView};
use viewkit::view::{
    Error, HtmxResponse, ModelAndView, Outcome, SecurityViewModelProcessor, ViewRoute, Views,
    ViewsRenderer,
};

/// Key the security processor uses in the suite.
pub const SECURITY_KEY: &str = "securitycustom";

/// Fruit model, serialized like any controller model would be.
#[derive(Serialize, Debug, Clone)]
pub struct Fruit {
    pub fruit: String,
    pub color: String,
}

impl Fruit {
    pub fn new(fruit: &str, color: &str) -> Self {
        Self {
            fruit: fruit.into(),
            color: color.into(),
        }
    }
}

/// Views around one engine, with the suite's model processors.
pub fn views(renderer: impl ViewsRenderer + 'static) -> Views {
    Views::builder()
        .renderer(renderer)
        .processor(SecurityViewModelProcessor::new(Security {
            security_key: SECURITY_KEY.into(),
            ..Default::default()
        }))
        .processor(|_: &Request, mav: &mut ModelAndView| {
            if let Some(Value::Object(model)) = mav.model_mut() {
                model.insert("config".into(), json!({"name": "test"}));
            }
        })
        .cache_views(true)
        .build()
}

/// Entities engines spell differently, and the spelling the suite compares with.
const ENTITIES: &[(&str, &str)] = &[
    ("&#60;", "&lt;"),
    ("&#x3c;", "&lt;"),
    ("&#x3C;", "&lt;"),
    ("&#62;", "&gt;"),
    ("&#x3e;", "&gt;"),
    ("&#x3E;", "&gt;"),
    ("&#38;", "&amp;"),
    ("&#x26;", "&amp;"),
    ("&#34;", "&quot;"),
    ("&#x22;", "&quot;"),
    ("&#39;", "&#x27;"),
    ("&apos;", "&#x27;"),
    ("&#47;", "/"),
    ("&#x2f;", "/"),
    ("&#x2F;", "/"),
    ("&#61;", "="),
    ("&#x3D;", "="),
    ("&#96;", "`"),
    ("&#x60;", "`"),
];

/// Collapse whitespace runs, drop whitespace between tags, and spell escaped
/// characters one way (`&lt;` rather than `&#60;`).
///
/// ```
/// # use viewkit_tck::normalize_html;
/// assert_eq!(normalize_html("<ul>\n  <li>a  b</li>\n</ul>\n"), "<ul><li>a b</li></ul>");
/// assert_eq!(normalize_html("<p>&#60;b&#62; &#38; &#x2F;</p>"), "<p>&lt;b&gt; &amp; /</p>");
/// ```
pub fn normalize_html(html: &str) -> String {
    let mut html = html
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("> <", "><");

    for (entity, canonical) in ENTITIES {
        html = html.replace(entity, canonical);
    }

    html
}

fn html(views: &Views, view: &str, model: impl Serialize) -> String {
    match views.render(view, model) {
        Ok(rendered) => normalize_html(&rendered.text()),
        Err(err) => panic!("{} failed to render \"{}\": {}", engine(views), view, err),
    }
}

fn engine(views: &Views) -> &'static str {
    views.renderers().first().map(|r| r.name()).unwrap_or("none")
}

fn respond(views: &Views, request: &Request, route: &ViewRoute, outcome: Outcome) -> Response {
    match views.respond(request, route, outcome) {
        Ok(response) => response,
        Err(err) => panic!("{} failed to respond: {}", engine(views), err),
    }
}

pub fn renders_home(views: &Views) {
    let page = html(views, "home", json!({"username": "sdelamo", "loggedIn": true}));
    assert!(
        page.contains("<h1>username: <span>sdelamo</span></h1>"),
        "{}: {}",
        engine(views),
        page
    );

    let page = html(views, "home", json!({"username": "sdelamo", "loggedIn": false}));
    assert!(!page.contains("sdelamo"), "{}: {}", engine(views), page);
    assert!(page.contains("<h1>You are not logged in</h1>"));
}

pub fn renders_deterministically(views: &Views) {
    let model = json!({"username": "test-user", "loggedIn": true});
    let first = views.render("home", &model).expect("render");
    let second = views.render("home", &model).expect("render");

    assert_eq!(first, second);
    assert_eq!(first.content_type, MediaType::text_html());
    assert!(first.text().contains("test-user"));
}

pub fn missing_view_is_not_found(views: &Views) {
    for view in ["missing", "", "fruits/missing"] {
        assert!(
            matches!(views.render(view, json!({})), Err(Error::TemplateNotFound(_))),
            "{}: \"{}\" should not exist",
            engine(views),
            view
        );
    }

    let response = views.respond(
        &Request::get("/missing"),
        &ViewRoute::view("missing"),
        Outcome::Model(json!({})),
    );
    assert!(matches!(response, Err(ref err) if err.code() == 404));
}

pub fn model_can_be_any_object(views: &Views) {
    let page = html(views, "fruits", Fruit::new("apple", "red"));
    assert!(page.contains("<h1>fruit: apple</h1>"), "{}: {}", engine(views), page);
    assert!(page.contains("<h1>color: red</h1>"));
}

pub fn model_can_be_a_map(views: &Views) {
    let mut model = std::collections::HashMap::new();
    model.insert("fruit", "orange");
    model.insert("color", "orange");

    let page = html(views, "fruits", model);
    assert!(page.contains("<h1>fruit: orange</h1>"), "{}: {}", engine(views), page);
    assert!(page.contains("<h1>color: orange</h1>"));
}

pub fn null_model_is_not_found(views: &Views) {
    let outcome = Outcome::model(None::<Fruit>).expect("model");
    let response = respond(views, &Request::get("/null"), &ViewRoute::view("fruits"), outcome);
    assert_eq!(response.status(), Status::NotFound);
}

pub fn redirect_passes_through(views: &Views) {
    let redirect = Response::new().redirect_with("/", 301);
    let response = respond(
        views,
        &Request::get("/redirect"),
        &ViewRoute::view("fruits"),
        Outcome::Response(redirect),
    );

    assert_eq!(response.status(), Status::MovedPermanently);
    assert_eq!(response.headers().get("location").map(String::as_str), Some("/"));
    assert!(response.get_body().is_empty());
}

pub fn models_are_enhanced_by_processors(views: &Views) {
    let request = Request::get("/processor");

    let outcome = Outcome::model(Fruit::new("apple", "red")).expect("model");
    let response = respond(views, &request, &ViewRoute::view("fruits-processor"), outcome);
    let html = normalize_html(&response.body_string());
    assert!(html.contains("<h1>config: test</h1>"), "{}: {}", engine(views), html);

    let mav = ModelAndView::new("fruits-processor", Fruit::new("banana", "yellow")).expect("mav");
    let response = respond(views, &request, &ViewRoute::default(), mav.into());
    let html = normalize_html(&response.body_string());
    assert!(html.contains("<h1>fruit: banana</h1>"));
    assert!(html.contains("<h1>config: test</h1>"), "{}: {}", engine(views), html);
}

pub fn security_is_exposed_under_custom_key(views: &Views) {
    let request = Request::get("/security")
        .with_authentication(Authentication::new("john").attribute("email", "john@email.com"));

    let response = respond(views, &request, &ViewRoute::view("security"), Outcome::Model(json!({})));
    let html = normalize_html(&response.body_string());
    assert!(
        html.contains("<p>User: john email: john@email.com</p>"),
        "{}: {}",
        engine(views),
        html
    );
}

pub fn output_is_escaped(views: &Views) {
    let page = html(views, "escape", json!({"text": "<script>alert(1)</script>"}));
    assert!(!page.contains("<script>"), "{}: {}", engine(views), page);
    assert!(page.contains("&lt;script&gt;"));
}

pub fn renders_turbo_streams(views: &Views) {
    let request = Request::get("/fruits").header("Accept", MediaType::TURBO_STREAM);

    let builder = TurboStream::builder()
        .action(TurboStreamAction::Append)
        .target_dom_id("fruits")
        .template_view("fruit", json!({"fruit": "apple"}));
    let response = respond(views, &request, &ViewRoute::default(), builder.into());
    assert_eq!(response.content_type(), Some(MediaType::turbo_stream()));
    assert_eq!(
        normalize_html(&response.body_string()),
        r#"<turbo-stream action="append" target="fruits"><template><li>apple</li></template></turbo-stream>"#
    );

    let route = ViewRoute::view("fruits").turbo_view(
        TurboView::new("fruit")
            .action(TurboStreamAction::Replace)
            .target_dom_id("fruit"),
    );
    let response = respond(views, &request, &route, Outcome::Model(json!({"fruit": "kiwi", "color": "green"})));
    assert_eq!(
        normalize_html(&response.body_string()),
        r#"<turbo-stream action="replace" target="fruit"><template><li>kiwi</li></template></turbo-stream>"#
    );
}

pub fn renders_htmx_fragments(views: &Views) {
    let request = Request::get("/fruits/htmx").header("HX-Request", "true");
    let htmx = HtmxResponse::new()
        .model_and_view(ModelAndView::new("fruit", json!({"fruit": "apple"})).expect("mav"))
        .model_and_view(ModelAndView::new("fruit", json!({"fruit": "banana"})).expect("mav"));

    let response = respond(views, &request, &ViewRoute::default(), htmx.into());
    assert_eq!(response.content_type(), Some(MediaType::text_html()));
    assert_eq!(
        normalize_html(&response.body_string()),
        "<li>apple</li><li>banana</li>"
    );
}

/// Expand to one `#[test]` per suite case.
///
/// `$views` is evaluated once per test.
///
/// ```rust,ignore
/// fn views() -> Views {
///     viewkit_tck::views(TeraViewsRenderer::new("templates/tera", "html").unwrap())
/// }
///
/// viewkit_tck::tck!(views());
/// ```
#[macro_export]
macro_rules! tck {
    ($views:expr) => {
        $crate::tck!(@cases $views;
            renders_home,
            renders_deterministically,
            missing_view_is_not_found,
            model_can_be_any_object,
            model_can_be_a_map,
            null_model_is_not_found,
            redirect_passes_through,
            models_are_enhanced_by_processors,
            security_is_exposed_under_custom_key,
            output_is_escaped,
            renders_turbo_streams,
            renders_htmx_fragments
        );
    };

    (@cases $views:expr; $($case:ident),+) => {
        $(
            #[test]
            fn $case() {
                $crate::$case(&$views);
            }
        )+
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize_entities() {
        assert_eq!(
            normalize_html("<p>Fruits &#38; &#60;vegetables&#62;</p>"),
            normalize_html("<p>Fruits &amp; &lt;vegetables&gt;</p>")
        );
        assert_eq!(
            normalize_html("<p>&#34;a&#34; &#39;b&#39;</p>"),
            "<p>&quot;a&quot; &#x27;b&#x27;</p>"
        );
    }
}
