//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::context::AppContext;
use crate::core::locale::{DetectionInputs, DetectionOrder, LanguageCode};
use crate::core::state::App;
use crate::core::store::{KeyValueStore, MemoryStore, StoreError};
use crate::i18n::{LoadError, LocaleManager, ResourceLoader, ResourceSet};

/// A store whose every operation fails, standing in for an inaccessible one.
pub struct FailingStore;

fn denied() -> StoreError {
    StoreError::Io(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "storage is not accessible",
    ))
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(denied())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(denied())
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(denied())
    }
}

/// A loader that answers every key as `"[<code>] <key>"` for a fixed key
/// list, and counts how often it was asked.
pub struct CountingLoader {
    calls: AtomicUsize,
    fail_for: Option<LanguageCode>,
}

impl CountingLoader {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_for: None,
        }
    }

    pub fn failing_for(language: LanguageCode) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_for: Some(language),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceLoader for CountingLoader {
    fn name(&self) -> &str {
        "counting"
    }

    async fn load(&self, language: LanguageCode) -> Result<ResourceSet, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_for == Some(language) {
            return Err(LoadError::Network("connection refused".to_string()));
        }
        let mut set = ResourceSet::new(language);
        for key in ["app.title", "app.loading", "filters.all"] {
            set.insert(key, format!("[{language}] {key}"));
        }
        Ok(set)
    }
}

/// A small English set with an interpolated entry.
pub fn english_set() -> ResourceSet {
    let mut set = ResourceSet::new(LanguageCode::En);
    set.insert("app.title", "Blood Link");
    set.insert("emergency.units", "{{count}} units needed");
    set
}

/// A fresh directory under the system temp dir, unique per call.
pub fn scratch_dir(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("donorlink-{}-{}-{}", name, std::process::id(), n));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Creates a test App with an in-memory store and the counting loader.
/// The initial English load is already applied.
pub fn test_app() -> App {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let (mut locale, _pending) = LocaleManager::initialize(
        store.clone(),
        Arc::new(CountingLoader::new()),
        &DetectionOrder::default(),
        DetectionInputs::default(),
    );
    locale.preload(english_set());
    App::new(AppContext::new(store).with_theme().with_locale(locale))
}
