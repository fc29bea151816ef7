use std::fmt;

use async_trait::async_trait;

use super::resources::ResourceSet;
use crate::core::locale::LanguageCode;

/// Errors that can occur while fetching a translation resource set.
/// None of them are fatal: the UI falls back to raw keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Loader misconfigured (bad template, missing placeholder).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Endpoint answered with a non-success status.
    Http { status: u16, message: String },
    /// Resource body was not a JSON object.
    Parse(String),
    /// The loader has no resources for this language.
    NotFound(LanguageCode),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Config(msg) => write!(f, "config error: {msg}"),
            LoadError::Network(msg) => write!(f, "network error: {msg}"),
            LoadError::Http { status, message } => {
                write!(f, "resource endpoint error (HTTP {status}): {message}")
            }
            LoadError::Parse(msg) => write!(f, "parse error: {msg}"),
            LoadError::NotFound(code) => write!(f, "no translations for '{code}'"),
        }
    }
}

impl std::error::Error for LoadError {}

#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Returns the name of the loader.
    fn name(&self) -> &str;

    /// Fetches the full resource set for `language`.
    async fn load(&self, language: LanguageCode) -> Result<ResourceSet, LoadError>;
}
