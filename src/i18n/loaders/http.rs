//! Translation resources served over HTTP.
//!
//! The endpoint is addressed by a path template with a `{{lng}}`
//! placeholder, e.g. `https://cdn.example.org/locales/{{lng}}/translation.json`.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::core::locale::LanguageCode;
use crate::i18n::loader::{LoadError, ResourceLoader};
use crate::i18n::resources::ResourceSet;

pub const LANGUAGE_PLACEHOLDER: &str = "{{lng}}";

pub struct HttpResourceLoader {
    template: String,
    client: reqwest::Client,
}

impl HttpResourceLoader {
    pub fn new(template: impl Into<String>) -> Result<Self, LoadError> {
        let template = template.into();
        if !template.contains(LANGUAGE_PLACEHOLDER) {
            return Err(LoadError::Config(format!(
                "resource URL template must contain {LANGUAGE_PLACEHOLDER}: {template}"
            )));
        }
        Ok(Self {
            template,
            client: reqwest::Client::new(),
        })
    }

    pub fn url_for(&self, language: LanguageCode) -> String {
        self.template.replace(LANGUAGE_PLACEHOLDER, language.as_str())
    }
}

#[async_trait]
impl ResourceLoader for HttpResourceLoader {
    fn name(&self) -> &str {
        "http"
    }

    async fn load(&self, language: LanguageCode) -> Result<ResourceSet, LoadError> {
        let url = self.url_for(language);
        info!("Fetching translations for '{}' from {}", language, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        debug!("Translation response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Translation fetch failed for '{}': {} - {}", language, status, message);
            return Err(LoadError::Http { status, message });
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LoadError::Parse(e.to_string()))?;
        let set = ResourceSet::from_json(language, &value)?;
        info!("Loaded {} translation keys for '{}'", set.len(), language);
        Ok(set)
    }
}
