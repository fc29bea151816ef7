//! # Application Context
//!
//! The single owner of the theme and locale providers. It is constructed
//! once at startup and passed down explicitly; nothing reaches these
//! managers through a global.
//!
//! Reading a provider that was never mounted is a programming error, so
//! `theme()` / `locale()` panic instead of inventing a default.

use std::sync::Arc;

use crate::core::store::KeyValueStore;
use crate::core::theme::ThemeManager;
use crate::i18n::LocaleManager;

pub struct AppContext {
    store: Arc<dyn KeyValueStore>,
    theme: Option<ThemeManager>,
    locale: Option<LocaleManager>,
}

impl AppContext {
    /// A context with no providers mounted yet.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            theme: None,
            locale: None,
        }
    }

    /// Mounts the theme provider, initializing it from the store.
    pub fn with_theme(mut self) -> Self {
        self.theme = Some(ThemeManager::initialize(self.store.clone()));
        self
    }

    pub fn with_locale(mut self, locale: LocaleManager) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn try_theme(&self) -> Option<&ThemeManager> {
        self.theme.as_ref()
    }

    pub fn try_locale(&self) -> Option<&LocaleManager> {
        self.locale.as_ref()
    }

    /// # Panics
    /// If no theme provider is mounted.
    pub fn theme(&self) -> &ThemeManager {
        match &self.theme {
            Some(theme) => theme,
            None => panic!("theme accessed outside a theme provider"),
        }
    }

    /// # Panics
    /// If no theme provider is mounted.
    pub fn theme_mut(&mut self) -> &mut ThemeManager {
        match &mut self.theme {
            Some(theme) => theme,
            None => panic!("theme accessed outside a theme provider"),
        }
    }

    /// # Panics
    /// If no locale provider is mounted.
    pub fn locale(&self) -> &LocaleManager {
        match &self.locale {
            Some(locale) => locale,
            None => panic!("locale accessed outside a locale provider"),
        }
    }

    /// # Panics
    /// If no locale provider is mounted.
    pub fn locale_mut(&mut self) -> &mut LocaleManager {
        match &mut self.locale {
            Some(locale) => locale,
            None => panic!("locale accessed outside a locale provider"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;

    #[test]
    #[should_panic(expected = "outside a theme provider")]
    fn test_theme_without_provider_panics() {
        let ctx = AppContext::new(Arc::new(MemoryStore::new()));
        let _ = ctx.theme();
    }

    #[test]
    #[should_panic(expected = "outside a locale provider")]
    fn test_locale_without_provider_panics() {
        let mut ctx = AppContext::new(Arc::new(MemoryStore::new())).with_theme();
        let _ = ctx.locale_mut();
    }

    #[test]
    fn test_mounted_theme_is_available() {
        let ctx = AppContext::new(Arc::new(MemoryStore::new())).with_theme();
        assert!(ctx.try_theme().is_some());
        assert!(ctx.try_locale().is_none());
        assert!(!ctx.theme().is_dark());
    }
}
