//! # Site Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SANIVITA_API_KEY=...                                               │
//! │     SANIVITA_DB_PATH=/tmp/sanivita.db                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/sanivita-site/sanivita.toml (Linux)                      │
//! │     ~/Library/Application Support/com.sanivita.site/sanivita.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [site]
//! base_url = "https://sanivita.example/"
//! brand = "SaniVita Pharma"
//!
//! [storage]
//! database_path = "/var/lib/sanivita/sanivita.db"
//!
//! [advisor]
//! model = "gemini-2.5-flash"
//! temperature = 0.7
//!
//! [admin]
//! password = "change-me"
//! ```

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use sanivita_advisor::AdvisorConfig;
use sanivita_core::BRAND_NAME;

use crate::error::{AppError, AppResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "sanivita.toml";

// =============================================================================
// Sections
// =============================================================================

/// Public site settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Address the site is served from. Relative addresses given on the
    /// command line are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_brand")]
    pub brand: String,
}

fn default_base_url() -> String {
    "http://localhost:5173/".to_string()
}

fn default_brand() -> String {
    BRAND_NAME.to_string()
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            base_url: default_base_url(),
            brand: default_brand(),
        }
    }
}

/// Where content edits are persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to `sanivita.db` in the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

/// Admin surface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSettings {
    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for AdminSettings {
    fn default() -> Self {
        AdminSettings {
            password: default_admin_password(),
        }
    }
}

// =============================================================================
// Site Configuration
// =============================================================================

/// Complete site configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub advisor: AdvisorConfig,

    #[serde(default)]
    pub admin: AdminSettings,
}

impl SiteConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (sanivita.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading site config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> AppResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| AppError::ConfigSave("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Site config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        let base = self.base_url()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::InvalidConfig(format!(
                "base_url must be http:// or https://, got: {}",
                self.site.base_url
            )));
        }

        if self.admin.password.is_empty() {
            return Err(AppError::InvalidConfig(
                "admin password must not be empty".into(),
            ));
        }

        self.advisor
            .validate()
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("SANIVITA_BASE_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.site.base_url = url;
        }

        if let Some(path) = var("SANIVITA_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        // The frontend build reads API_KEY; accept it too.
        if let Some(key) = var("SANIVITA_API_KEY").or_else(|| var("API_KEY")) {
            self.advisor.api_key = Some(key);
        }

        if let Some(model) = var("SANIVITA_MODEL") {
            debug!(model = %model, "Overriding advisor model from environment");
            self.advisor.model = model;
        }

        if let Some(temperature) = var("SANIVITA_TEMPERATURE") {
            match temperature.parse::<f32>() {
                Ok(t) => self.advisor.temperature = t,
                Err(_) => warn!(value = %temperature, "Ignoring invalid SANIVITA_TEMPERATURE"),
            }
        }

        if let Some(password) = var("SANIVITA_ADMIN_PASSWORD") {
            self.admin.password = password;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The parsed base URL.
    pub fn base_url(&self) -> AppResult<Url> {
        Ok(Url::parse(&self.site.base_url)?)
    }

    /// Resolves a command-line address against the base URL, so `?page=about`
    /// and full URLs both work.
    pub fn resolve_url(&self, input: &str) -> AppResult<Url> {
        Ok(self.base_url()?.join(input)?)
    }

    /// The SQLite file to use.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join("sanivita.db"))
            .ok_or_else(|| AppError::InvalidConfig("Could not determine app data directory".into()))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "sanivita", "site")
}
