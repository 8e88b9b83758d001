//! Logging setup.
//!
//! Installs a `tracing_subscriber` formatter writing to stderr at the `INFO` level,
//! unless `RUST_LOG` says otherwise. Applications that bring their own subscriber
//! should skip [`Logger::init`].
//!
//! ### Example
//!
//! ```rust
//! use viewkit::prelude::*;
//!
//! Logger::init();
//! ```
use crate::config::get_config;
use once_cell::sync::OnceCell;
use tracing_subscriber::{filter::LevelFilter, fmt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub struct Logger;

impl Logger {
    /// Install the subscriber and print the configuration summary.
    ///
    /// Safe to call more than once.
    pub fn init() {
        INITIALIZED.get_or_init(|| {
            setup_logging();
            get_config().log_info();
        });
    }

    /// Install the subscriber without printing anything.
    /// Used by command-line tools that own their output.
    pub fn init_quiet() {
        INITIALIZED.get_or_init(setup_logging);
    }
}

fn setup_logging() {
    // Another subscriber may already be installed (e.g. by a test harness).
    let _ = fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(get_config().general.tty)
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_target(false)
        .finish()
        .try_init();
}
