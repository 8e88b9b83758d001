//! Template engines.
//!
//! Each engine is behind a cargo feature of the same name; all four are on by default.
//! Runtime engines (Tera, Handlebars, MiniJinja) read templates from the views folder,
//! each picking up files with its own extension. Askama templates are compiled in and
//! registered by view name.
#[cfg(feature = "askama")]
pub mod askama;
#[cfg(feature = "handlebars")]
pub mod handlebars;
#[cfg(feature = "minijinja")]
pub mod minijinja;
#[cfg(feature = "tera")]
pub mod tera;

#[cfg(feature = "askama")]
pub use self::askama::AskamaViewsRenderer;
#[cfg(feature = "handlebars")]
pub use self::handlebars::HandlebarsViewsRenderer;
#[cfg(feature = "minijinja")]
pub use self::minijinja::MinijinjaViewsRenderer;
#[cfg(feature = "tera")]
pub use self::tera::TeraViewsRenderer;
