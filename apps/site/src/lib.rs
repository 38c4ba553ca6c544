//! # SaniVita Site
//!
//! Site shell: owns the router, the admin gate and the configuration, and
//! wires the store and advisor crates together.
//!
//! ## Module Organization
//! ```text
//! sanivita_site/
//! ├── lib.rs          ◄─── You are here (logging setup, re-exports)
//! ├── router/
//! │   ├── mod.rs      ◄─── Router: navigation, URL sync, history listener
//! │   └── window.rs   ◄─── BrowserWindow trait + MemoryWindow
//! ├── admin.rs        ◄─── AdminGate password check
//! ├── config.rs       ◄─── SiteConfig (TOML + env overrides)
//! └── error.rs        ◄─── AppError for commands
//! ```
//!
//! The `sanivita` binary (`main.rs`, `cli.rs`, `commands.rs`) drives all of
//! it headlessly.

pub mod admin;
pub mod config;
pub mod error;
pub mod router;

use tracing_subscriber::EnvFilter;

pub use admin::AdminGate;
pub use config::SiteConfig;
pub use error::{AppError, AppResult, ErrorCode};
pub use router::{BrowserWindow, MemoryWindow, Router};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,sanivita=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sanivita_advisor=trace` - Trace the advisor only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr; stdout carries command output.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
