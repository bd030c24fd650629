//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: `ACTON_PAGER_`, sections split on `__`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/acton-pager/{service_name}/config.toml
//! 4. System directory: /etc/acton-pager/{service_name}/config.toml
//! 5. Default values
//!
//! ```toml
//! [service]
//! name = "catalog"
//! log_level = "debug"
//!
//! [pagination]
//! default_view = "twitter_bootstrap4"
//! omit_first_page = true
//! ```
//!
//! The same keys from the environment: `ACTON_PAGER_PAGINATION__OMIT_FIRST_PAGE=true`.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::options::{PaginationOptions, DEFAULT_PAGE_PARAMETER, DEFAULT_PROXIMITY};

/// Prefix of environment variables overriding file configuration
pub const ENV_PREFIX: &str = "ACTON_PAGER_";

const CONFIG_DIR: &str = "acton-pager";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Pagination defaults
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

/// Pagination defaults applied to every render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// View used when a template names none
    #[serde(default = "default_view")]
    pub default_view: String,

    /// Scheme and host prepended to generated URLs, for absolute links
    #[serde(default)]
    pub base_url: Option<String>,

    /// Pages shown on each side of the current one
    #[serde(default = "default_proximity")]
    pub proximity: usize,

    /// Link page 1 without a page parameter
    #[serde(default)]
    pub omit_first_page: bool,

    /// Property path receiving the page number
    #[serde(default = "default_page_parameter")]
    pub page_parameter: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_view: default_view(),
            base_url: None,
            proximity: default_proximity(),
            omit_first_page: false,
            page_parameter: default_page_parameter(),
        }
    }
}

impl PaginationConfig {
    /// Options every template call is layered over
    #[must_use]
    pub fn default_options(&self) -> PaginationOptions {
        PaginationOptions::new()
            .with_page_parameter(self.page_parameter.clone())
            .with_omit_first_page(self.omit_first_page)
            .with_option("proximity", self.proximity)
    }
}

fn default_service_name() -> String {
    CONFIG_DIR.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_view() -> String {
    "default".to_string()
}

fn default_proximity() -> usize {
    DEFAULT_PROXIMITY
}

fn default_page_parameter() -> String {
    DEFAULT_PAGE_PARAMETER.to_string()
}

impl Config {
    /// Load configuration from all sources
    ///
    /// The service name is taken from the binary name.
    pub fn load() -> Result<Self> {
        let service_name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(default_service_name);

        Self::load_for_service(&service_name)
    }

    /// Load configuration for a specific service name
    pub fn load_for_service(service_name: &str) -> Result<Self> {
        let config_paths = Self::find_config_paths(service_name);

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so later files win
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        let config = figment.merge(Self::env()).extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the search path. Environment variables still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Self::env())
            .extract()?;

        Ok(config)
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Config file paths for a service, highest priority first
    pub fn find_config_paths(service_name: &str) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(CONFIG_DIR);
        let config_file_path = Path::new(service_name).join("config.toml");
        if let Ok(path) = xdg_dirs.place_config_file(&config_file_path) {
            paths.push(path);
        }

        paths.push(
            PathBuf::from("/etc")
                .join(CONFIG_DIR)
                .join(service_name)
                .join("config.toml"),
        );

        paths
    }
}
