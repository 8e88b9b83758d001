use std::path::PathBuf;
use std::process::exit;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use viewkit::config::{get_config, Config};
use viewkit::logging::Logger;
use viewkit::view::Views;

mod logging;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    subcommands: Subcommands,
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    /// List the views every engine can find.
    List {
        #[command(flatten)]
        source: Source,
    },

    /// Render a view and print it to stdout.
    Render {
        /// Name of the view, e.g. "home" or "fruits/list".
        view: String,

        #[command(flatten)]
        source: Source,

        #[arg(long, help = "Read the model from this JSON file", conflicts_with = "json")]
        model: Option<PathBuf>,

        #[arg(long, help = "Model as a JSON string")]
        json: Option<String>,
    },
}

#[derive(Args, Debug)]
struct Source {
    #[arg(long, help = "Folder with templates [default: views folder from viewkit.toml]")]
    folder: Option<PathBuf>,

    #[arg(long, value_enum, help = "Use only this engine")]
    engine: Option<Engine>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
enum Engine {
    Tera,
    Handlebars,
    Minijinja,
}

impl Source {
    fn config(&self) -> Config {
        let mut config = get_config().clone();

        if let Some(ref folder) = self.folder {
            config.views.folder = folder.clone();
        }

        if let Some(engine) = self.engine {
            config.views.tera.enabled = engine == Engine::Tera;
            config.views.handlebars.enabled = engine == Engine::Handlebars;
            config.views.minijinja.enabled = engine == Engine::Minijinja;
        }

        config
    }

    fn views(&self) -> Views {
        match Views::from_config(&self.config()) {
            Ok(views) => views,
            Err(err) => {
                logging::error(err);
                exit(1);
            }
        }
    }
}

async fn model(file: Option<PathBuf>, json: Option<String>) -> Result<Value, Box<dyn std::error::Error>> {
    let text = match (file, json) {
        (Some(file), _) => tokio::fs::read_to_string(file).await?,
        (None, Some(json)) => json,
        (None, None) => return Ok(Value::Object(Default::default())),
    };

    Ok(serde_json::from_str(&text)?)
}

#[tokio::main]
async fn main() {
    Logger::init_quiet();
    let args = Cli::parse();

    match args.subcommands {
        Subcommands::List { source } => {
            let views = source.views();
            let names = views.view_names();

            if names.is_empty() {
                logging::warning(format!(
                    "no views found in \"{}\"",
                    source.config().views.folder.display()
                ));
            }

            for (engine, name) in names {
                logging::view(engine, &name);
            }
        }

        Subcommands::Render {
            view,
            source,
            model: file,
            json,
        } => {
            let views = source.views();

            let model = match model(file, json).await {
                Ok(model) => model,
                Err(err) => {
                    logging::error(format!("model: {}", err));
                    exit(1);
                }
            };

            match views.render(&view, &model) {
                Ok(rendered) => {
                    log::debug!("rendered \"{}\" as {}", view, rendered.content_type);
                    print!("{}", rendered.text());
                }
                Err(err) => {
                    log::error!("{}", err);
                    exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::write;
    use tempdir::TempDir;

    fn source(folder: &TempDir, engine: Option<Engine>) -> Source {
        Source {
            folder: Some(folder.path().to_owned()),
            engine,
        }
    }

    #[test]
    fn test_engine_selection() {
        let dir = TempDir::new("views").unwrap();

        let config = source(&dir, Some(Engine::Handlebars)).config();
        assert_eq!(config.views.folder, dir.path());
        assert!(config.views.handlebars.enabled);
        assert!(!config.views.tera.enabled);
        assert!(!config.views.minijinja.enabled);

        let config = source(&dir, None).config();
        assert!(config.views.tera.enabled);
        assert!(config.views.handlebars.enabled);
    }

    #[test]
    fn test_list_and_render() {
        let dir = TempDir::new("views").unwrap();
        write(dir.path().join("home.html"), "<h1>{{ username }}</h1>").unwrap();
        write(dir.path().join("home.hbs"), "<h2>{{username}}</h2>").unwrap();

        let views = source(&dir, Some(Engine::Tera)).views();
        assert_eq!(views.view_names(), vec![("tera", "home".to_string())]);

        let rendered = views
            .render("home", serde_json::json!({"username": "sdelamo"}))
            .unwrap();
        assert_eq!(rendered.text(), "<h1>sdelamo</h1>");
    }

    #[test]
    fn test_args() {
        let cli = Cli::try_parse_from([
            "viewkit", "render", "home", "--engine", "minijinja", "--json", "{}",
        ])
        .unwrap();

        match cli.subcommands {
            Subcommands::Render {
                view, source, json, ..
            } => {
                assert_eq!(view, "home");
                assert_eq!(source.engine, Some(Engine::Minijinja));
                assert_eq!(json.as_deref(), Some("{}"));
            }
            _ => panic!("expected render"),
        }

        assert!(Cli::try_parse_from([
            "viewkit", "render", "home", "--model", "model.json", "--json", "{}",
        ])
        .is_err());
    }

    #[tokio::test]
    async fn test_model() {
        let dir = TempDir::new("model").unwrap();
        let file = dir.path().join("model.json");
        write(&file, r#"{"fruit": "apple"}"#).unwrap();

        let value = model(Some(file), None).await.unwrap();
        assert_eq!(value["fruit"], "apple");

        let value = model(None, Some(r#"{"color": "red"}"#.into())).await.unwrap();
        assert_eq!(value["color"], "red");

        assert_eq!(model(None, None).await.unwrap(), serde_json::json!({}));
        assert!(model(None, Some("not json".into())).await.is_err());
    }
}
