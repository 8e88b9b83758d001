//! Global configuration.
//!
//! Configuration is read once from `viewkit.toml` in the working directory. If the file
//! doesn't exist, defaults are used. A few settings can be overridden with environment variables:
//!
//! - `VIEWKIT_VIEWS_FOLDER`: folder containing templates
//! - `VIEWKIT_CACHE_VIEWS`: `true`/`false`, memoize view resolution
//!
//! ### Example
//!
//! ```toml
//! [general]
//! port = 8000
//! cache_views = true
//!
//! [views]
//! folder = "views"
//!
//! [views.handlebars]
//! default_extension = "handlebars"
//!
//! [views.csp]
//! enabled = true
//! generate_nonce = true
//! policy_directives = "script-src 'nonce-{#nonceValue}'"
//! ```
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env::var;
use std::fs::read_to_string;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "viewkit.toml";

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config file not found")]
    Io(#[from] std::io::Error),

    #[error("config is already loaded")]
    ConfigLoaded,

    #[error("config not found")]
    NoConfig,
}

/// Global configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    path: Option<PathBuf>,
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub views: Views,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            general: General::default(),
            views: Views::default(),
        }
        .with_env()
    }
}

impl Config {
    /// Load configuration from `viewkit.toml` in the working directory.
    pub fn load() -> Result<Config, Error> {
        let path = PathBuf::from(CONFIG_FILE);

        if !path.exists() {
            return Err(Error::NoConfig);
        }

        Self::from_file(&path)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, Error> {
        let text = read_to_string(path.as_ref())?;
        let mut config = Self::from_toml(&text)?;
        config.path = Some(path.as_ref().to_owned());

        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Config, Error> {
        let config: Config = toml::from_str(text)?;
        Ok(config.with_env())
    }

    /// Install this configuration as the global one.
    ///
    /// Fails if the global configuration was already set or read.
    pub fn install(self) -> Result<(), Error> {
        CONFIG.set(self).map_err(|_| Error::ConfigLoaded)
    }

    pub fn get() -> &'static Config {
        get_config()
    }

    /// Path to the file this configuration was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn with_env(mut self) -> Self {
        if let Ok(folder) = var("VIEWKIT_VIEWS_FOLDER") {
            self.views.folder = PathBuf::from(folder);
        }

        if let Ok(cache) = var("VIEWKIT_CACHE_VIEWS") {
            if let Ok(cache) = cache.parse::<bool>() {
                self.general.cache_views = cache;
            }
        }

        self
    }

    /// Print the important settings to the log.
    pub fn log_info(&self) {
        match self.path {
            Some(ref path) => info!("Configuration loaded from {}", path.display()),
            None => info!("Using default configuration"),
        }

        info!(
            "Views folder: {}, view cache: {}",
            self.views.folder.display(),
            if self.general.cache_views { "on" } else { "off" }
        );

        if self.views.csp.enabled {
            info!("Content-Security-Policy filter enabled");
        }
    }
}

/// Get the global configuration. Loads it on first use.
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| or_default(Config::load()))
}

/// A missing file means defaults. A broken one does too, but it's reported.
fn or_default(config: Result<Config, Error>) -> Config {
    match config {
        Ok(config) => config,
        Err(Error::NoConfig) => Config::default(),
        Err(err) => {
            warn!("{}, using default configuration", err);
            Config::default()
        }
    }
}

/// `[general]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct General {
    #[serde(default = "General::default_host")]
    pub host: String,
    #[serde(default = "General::default_port")]
    pub port: u16,
    #[serde(default = "General::default_header_max_size")]
    pub header_max_size: usize,
    #[serde(default = "General::default_cache_views")]
    pub cache_views: bool,
    #[serde(skip, default = "General::default_tty")]
    pub tty: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            header_max_size: Self::default_header_max_size(),
            cache_views: Self::default_cache_views(),
            tty: Self::default_tty(),
        }
    }
}

impl General {
    fn default_host() -> String {
        "0.0.0.0".into()
    }

    fn default_port() -> u16 {
        8000
    }

    fn default_header_max_size() -> usize {
        16 * 1024 // 16KB
    }

    fn default_cache_views() -> bool {
        #[cfg(debug_assertions)]
        return false;
        #[cfg(not(debug_assertions))]
        return true;
    }

    fn default_tty() -> bool {
        std::io::stderr().is_terminal()
    }
}

/// `[views]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Views {
    #[serde(default = "Views::default_folder")]
    pub folder: PathBuf,
    #[serde(default)]
    pub tera: Engine,
    #[serde(default)]
    pub handlebars: Engine,
    #[serde(default)]
    pub minijinja: Engine,
    #[serde(default)]
    pub csp: Csp,
    #[serde(default)]
    pub security: Security,
}

impl Default for Views {
    fn default() -> Self {
        Self {
            folder: Self::default_folder(),
            tera: Engine::default(),
            handlebars: Engine::default(),
            minijinja: Engine::default(),
            csp: Csp::default(),
            security: Security::default(),
        }
    }
}

impl Views {
    fn default_folder() -> PathBuf {
        PathBuf::from("views")
    }
}

/// Per-engine settings, e.g. `[views.tera]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Template file extension. Each engine has its own default.
    pub default_extension: Option<String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            enabled: true,
            default_extension: None,
        }
    }
}

impl Engine {
    /// Configured extension, or the engine's default.
    pub fn extension(&self, default: &str) -> String {
        self.default_extension
            .clone()
            .unwrap_or_else(|| default.to_string())
    }
}

/// `[views.csp]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Csp {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub policy_directives: Option<String>,
    #[serde(default)]
    pub report_only: bool,
    #[serde(default)]
    pub generate_nonce: bool,
    #[serde(default = "Csp::default_filter_path")]
    pub filter_path: String,
}

impl Default for Csp {
    fn default() -> Self {
        Self {
            enabled: false,
            policy_directives: None,
            report_only: false,
            generate_nonce: false,
            filter_path: Self::default_filter_path(),
        }
    }
}

impl Csp {
    fn default_filter_path() -> String {
        "/**".into()
    }
}

/// `[views.security]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "Security::default_security_key")]
    pub security_key: String,
    #[serde(default = "Security::default_principal_name_key")]
    pub principal_name_key: String,
    #[serde(default = "Security::default_attributes_key")]
    pub attributes_key: String,
}

impl Default for Security {
    fn default() -> Self {
        Self {
            enabled: true,
            security_key: Self::default_security_key(),
            principal_name_key: Self::default_principal_name_key(),
            attributes_key: Self::default_attributes_key(),
        }
    }
}

impl Security {
    fn default_security_key() -> String {
        "security".into()
    }

    fn default_principal_name_key() -> String {
        "name".into()
    }

    fn default_attributes_key() -> String {
        "attributes".into()
    }
}

fn default_true() -> bool {
    true
}
