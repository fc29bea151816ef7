//! Translation resources compiled into the binary from `locales/`.

use async_trait::async_trait;
use log::debug;

use crate::core::locale::LanguageCode;
use crate::i18n::loader::{LoadError, ResourceLoader};
use crate::i18n::resources::ResourceSet;

include!(concat!(env!("OUT_DIR"), "/bundled_locales.rs"));

#[derive(Debug, Default, Clone, Copy)]
pub struct BundledResourceLoader;

impl BundledResourceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous lookup, also used to seed the fallback language.
    pub fn resource(&self, language: LanguageCode) -> Result<ResourceSet, LoadError> {
        let (_, json) = BUNDLED_LOCALES
            .iter()
            .find(|(code, _)| *code == language.as_str())
            .ok_or(LoadError::NotFound(language))?;
        ResourceSet::from_json_str(language, json)
    }
}

#[async_trait]
impl ResourceLoader for BundledResourceLoader {
    fn name(&self) -> &str {
        "bundled"
    }

    async fn load(&self, language: LanguageCode) -> Result<ResourceSet, LoadError> {
        debug!("Loading bundled translations for '{}'", language);
        self.resource(language)
    }
}
