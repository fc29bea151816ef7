//! # Locale Manager
//!
//! Owns the active language, its persisted copy, the translation cache and
//! the list of UI subscribers.
//!
//! ## Switching
//!
//! ```text
//! change_language("ta")
//!   ├── unsupported?  → Rejected (nothing written, nobody notified)
//!   ├── store["preferredLanguage"] = "ta"
//!   ├── current = ta, generation += 1
//!   ├── cached?       → ready, notify Changed{ready: true}   → Ready
//!   └── not cached    → loading, notify Changed{ready: false} → Loading(PendingLoad)
//!
//! PendingLoad::run().await  (on the async runtime)
//!   └── complete_load(result)
//!         ├── always cache a successful set
//!         ├── stale generation → ignored (a later selection won)
//!         └── current          → ready, notify Ready / LoadFailed
//! ```
//!
//! The manager never awaits anything itself. Whoever owns it runs the
//! `PendingLoad` and hands the `LoadResult` back, so every state change
//! happens on the owner's thread in a well-defined order.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info, warn};

use super::loader::{LoadError, ResourceLoader};
use super::resources::{ResourceSet, interpolate};
use crate::core::locale::{DetectionInputs, DetectionOrder, LanguageCode, detect_initial_locale};
use crate::core::store::{KeyValueStore, LANGUAGE_KEY};

/// Notifications delivered synchronously to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleEvent {
    /// The selected language changed. `ready` is false while its resources load.
    Changed { language: LanguageCode, ready: bool },
    /// Resources for the current language finished loading.
    Ready(LanguageCode),
    /// Resources for the current language failed to load; raw keys will show.
    LoadFailed(LanguageCode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&LocaleEvent) + Send>;

/// What `change_language` did.
pub enum ChangeOutcome {
    /// The code is not a supported language; nothing changed.
    Rejected,
    /// Resources were already cached; the new language is usable now.
    Ready(LanguageCode),
    /// Resources must be fetched; run the load and pass the result to
    /// `complete_load`.
    Loading(PendingLoad),
    /// A load for this language is already running. Its result fills the
    /// language when it arrives, so no new fetch is needed.
    AwaitingLoad(LanguageCode),
}

impl ChangeOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ChangeOutcome::Rejected)
    }

    pub fn into_pending(self) -> Option<PendingLoad> {
        match self {
            ChangeOutcome::Loading(pending) => Some(pending),
            _ => None,
        }
    }
}

/// A resource fetch tagged with the selection it belongs to.
pub struct PendingLoad {
    language: LanguageCode,
    generation: u64,
    loader: Arc<dyn ResourceLoader>,
}

impl PendingLoad {
    pub fn language(&self) -> LanguageCode {
        self.language
    }

    pub async fn run(self) -> LoadResult {
        let outcome = self.loader.load(self.language).await;
        LoadResult {
            language: self.language,
            generation: self.generation,
            outcome,
        }
    }
}

#[derive(Debug)]
pub struct LoadResult {
    pub language: LanguageCode,
    generation: u64,
    pub outcome: Result<ResourceSet, LoadError>,
}

pub struct LocaleManager {
    store: Arc<dyn KeyValueStore>,
    loader: Arc<dyn ResourceLoader>,
    current: LanguageCode,
    ready: bool,
    generation: u64,
    cache: HashMap<LanguageCode, Arc<ResourceSet>>,
    in_flight: HashSet<LanguageCode>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl LocaleManager {
    /// Detects the startup language, writes it back to the store, and
    /// returns the load that must complete before its text can render.
    pub fn initialize(
        store: Arc<dyn KeyValueStore>,
        loader: Arc<dyn ResourceLoader>,
        order: &DetectionOrder,
        mut inputs: DetectionInputs,
    ) -> (Self, Option<PendingLoad>) {
        if inputs.stored.is_none() {
            inputs.stored = match store.get(LANGUAGE_KEY) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Could not read language preference: {}", e);
                    None
                }
            };
        }
        let language = detect_initial_locale(order, &inputs);
        info!("Initial language: {} (loader: {})", language, loader.name());

        let mut manager = Self {
            store,
            loader,
            current: language,
            ready: false,
            generation: 0,
            cache: HashMap::new(),
            in_flight: HashSet::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        };
        manager.persist(language);
        let pending = manager.begin(language);
        (manager, pending)
    }

    pub fn language(&self) -> LanguageCode {
        self.current
    }

    /// False while the current language's resources are still loading.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_cached(&self, language: LanguageCode) -> bool {
        self.cache.contains_key(&language)
    }

    /// Seeds the cache, e.g. with bundled fallback strings.
    pub fn preload(&mut self, set: ResourceSet) {
        let language = set.language();
        self.cache.insert(language, Arc::new(set));
        if language == self.current && !self.ready {
            self.ready = true;
            self.notify(&LocaleEvent::Ready(language));
        }
    }

    pub fn change_language(&mut self, code: &str) -> ChangeOutcome {
        let Some(language) = LanguageCode::from_code(code) else {
            debug!("Ignoring unsupported language code '{}'", code);
            return ChangeOutcome::Rejected;
        };
        self.persist(language);
        match self.begin(language) {
            Some(pending) => ChangeOutcome::Loading(pending),
            None if self.ready => ChangeOutcome::Ready(language),
            None => ChangeOutcome::AwaitingLoad(language),
        }
    }

    /// Applies a finished load. Returns true if it changed what renders.
    pub fn complete_load(&mut self, result: LoadResult) -> bool {
        let LoadResult {
            language,
            generation,
            outcome,
        } = result;
        self.in_flight.remove(&language);

        let succeeded = match outcome {
            Ok(set) => {
                self.cache.insert(language, Arc::new(set));
                true
            }
            Err(e) => {
                warn!("Translations for '{}' unavailable, showing keys: {}", language, e);
                false
            }
        };

        let is_latest = generation == self.generation;
        let fills_current = language == self.current && !self.ready;
        if !(is_latest || fills_current) || language != self.current {
            debug!(
                "Discarding stale load for '{}' (generation {} < {})",
                language, generation, self.generation
            );
            return false;
        }
        if self.ready && !succeeded {
            return false;
        }

        self.ready = true;
        let event = if succeeded {
            LocaleEvent::Ready(language)
        } else {
            LocaleEvent::LoadFailed(language)
        };
        self.notify(&event);
        true
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&LocaleEvent) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Translates `key` in the current language, then the fallback
    /// language, then returns the key itself.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(self.lookup(key).unwrap_or(key), args)
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        [self.current, LanguageCode::FALLBACK]
            .iter()
            .filter_map(|code| self.cache.get(code))
            .find_map(|set| set.get(key))
    }

    fn persist(&self, language: LanguageCode) {
        if let Err(e) = self.store.set(LANGUAGE_KEY, language.as_str()) {
            warn!("Failed to persist language '{}': {}", language, e);
        }
    }

    /// Makes `language` current and returns a load if it is neither cached
    /// nor already being fetched.
    fn begin(&mut self, language: LanguageCode) -> Option<PendingLoad> {
        self.generation += 1;
        self.current = language;
        self.ready = self.cache.contains_key(&language);
        info!(
            "Language set to {} (generation {}, {})",
            language,
            self.generation,
            if self.ready { "cached" } else { "loading" }
        );
        self.notify(&LocaleEvent::Changed {
            language,
            ready: self.ready,
        });

        if self.ready || !self.in_flight.insert(language) {
            return None;
        }
        Some(PendingLoad {
            language,
            generation: self.generation,
            loader: self.loader.clone(),
        })
    }

    fn notify(&mut self, event: &LocaleEvent) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(event);
        }
    }
}
