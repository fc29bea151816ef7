//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.donorlink/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::locale::{DetectionOrder, LocaleError};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DonorConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path of the persisted preference store.
    pub store_path: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    pub url: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocaleConfig {
    /// Translation endpoint with a `{{lng}}` placeholder. Bundled
    /// translations are used when unset.
    pub resource_url: Option<String>,
    pub detection_order: Option<Vec<String>>,
    /// Declared document language (the `htmlTag` detection source).
    pub document_lang: Option<String>,
    /// Origin URL for the `path` and `subdomain` detection sources.
    pub origin_url: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Where emergency requests come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Http(String),
    File(PathBuf),
    Bundled,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub store_path: PathBuf,
    pub feed: FeedSource,
    pub resource_url: Option<String>,
    pub detection_order: DetectionOrder,
    pub document_lang: Option<String>,
    pub origin_url: Option<String>,
}

/// CLI flags that take part in resolution (None = not specified).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub feed_url: Option<String>,
    pub feed_file: Option<PathBuf>,
    pub store_path: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(LocaleError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.donorlink`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".donorlink"))
}

/// Returns the path to `~/.donorlink/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.donorlink/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DonorConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DonorConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DonorConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DonorConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: DonorConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# donorlink configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# store_path = "/home/me/.donorlink/storage.json"   # Or DONORLINK_STORE

# [feed]
# url = "https://api.example.org/emergencies"       # Or DONORLINK_FEED_URL
# file = "emergencies.json"                         # Used when no url is set

# [locale]
# resource_url = "https://cdn.example.org/locales/{{lng}}/translation.json"  # Or DONORLINK_LOCALE_URL
# detection_order = ["localStorage", "navigator", "htmlTag", "path", "subdomain"]
# document_lang = "hi"
# origin_url = "https://ta.example.org/"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &DonorConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    // Store: CLI → env → config → ~/.donorlink/storage.json → ./storage.json
    let store_path = cli
        .store_path
        .clone()
        .or_else(|| std::env::var("DONORLINK_STORE").ok().map(PathBuf::from))
        .or_else(|| config.general.store_path.clone().map(PathBuf::from))
        .or_else(|| config_dir().map(|d| d.join("storage.json")))
        .unwrap_or_else(|| PathBuf::from("storage.json"));

    // Feed: CLI file/url → env url → config url/file → bundled demo data
    let feed = if let Some(path) = &cli.feed_file {
        FeedSource::File(path.clone())
    } else if let Some(url) = cli
        .feed_url
        .clone()
        .or_else(|| std::env::var("DONORLINK_FEED_URL").ok())
        .or_else(|| config.feed.url.clone())
    {
        FeedSource::Http(url)
    } else if let Some(file) = &config.feed.file {
        FeedSource::File(PathBuf::from(file))
    } else {
        FeedSource::Bundled
    };

    // Translation endpoint: env → config → bundled
    let resource_url = std::env::var("DONORLINK_LOCALE_URL")
        .ok()
        .or_else(|| config.locale.resource_url.clone());

    let detection_order = match &config.locale.detection_order {
        Some(names) => DetectionOrder::from_names(names).map_err(ConfigError::Invalid)?,
        None => DetectionOrder::default(),
    };

    Ok(ResolvedConfig {
        store_path,
        feed,
        resource_url,
        detection_order,
        document_lang: config.locale.document_lang.clone(),
        origin_url: config.locale.origin_url.clone(),
    })
}
