//! # Theme State
//!
//! Dark/light presentation flag for the whole session.
//!
//! ```text
//! store["theme"] ──► initialize() ──► ThemeState ──► apply_effects()
//!                                        │  ▲           ├── store["theme"] = "dark" | "light"
//!                                        ▼  │           └── DocumentRoot: ±"dark" class
//!                                       toggle()
//! ```
//!
//! `apply_effects` runs after initialization and after every transition,
//! so the persisted value and the document marker never disagree once an
//! update returns.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, warn};

use crate::core::store::{KeyValueStore, THEME_KEY};

/// Class placed on the document root while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub is_dark: bool,
}

impl ThemeState {
    pub fn as_str(&self) -> &'static str {
        if self.is_dark { "dark" } else { "light" }
    }
}

/// Root presentation element. Styling code reads its classes to pick colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRoot {
    classes: BTreeSet<String>,
}

impl DocumentRoot {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn set_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    pub fn is_dark(&self) -> bool {
        self.has_class(DARK_CLASS)
    }
}

/// Reads the persisted theme. Missing, unreadable, or unexpected values
/// all mean light.
pub fn initialize(store: &dyn KeyValueStore) -> ThemeState {
    match store.get(THEME_KEY) {
        Ok(value) => ThemeState {
            is_dark: value.as_deref() == Some("dark"),
        },
        Err(e) => {
            warn!("Could not read theme preference, defaulting to light: {}", e);
            ThemeState::default()
        }
    }
}

pub fn toggle(current: ThemeState) -> ThemeState {
    ThemeState {
        is_dark: !current.is_dark,
    }
}

/// Persists `state` and mirrors it onto `root`, in that order.
///
/// A failed store write is logged and the marker is still updated.
pub fn apply_effects(state: ThemeState, store: &dyn KeyValueStore, root: &mut DocumentRoot) {
    if let Err(e) = store.set(THEME_KEY, state.as_str()) {
        warn!("Failed to persist theme '{}': {}", state.as_str(), e);
    }
    root.set_class(DARK_CLASS, state.is_dark);
    debug!("Theme applied: {}", state.as_str());
}

/// Owns the theme state together with its two mirrors.
pub struct ThemeManager {
    store: Arc<dyn KeyValueStore>,
    root: DocumentRoot,
    state: ThemeState,
}

impl ThemeManager {
    pub fn initialize(store: Arc<dyn KeyValueStore>) -> Self {
        let state = initialize(store.as_ref());
        let mut manager = Self {
            store,
            root: DocumentRoot::default(),
            state,
        };
        manager.apply();
        manager
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    pub fn is_dark(&self) -> bool {
        self.state.is_dark
    }

    pub fn root(&self) -> &DocumentRoot {
        &self.root
    }

    pub fn toggle(&mut self) -> ThemeState {
        self.set(toggle(self.state))
    }

    pub fn set(&mut self, state: ThemeState) -> ThemeState {
        self.state = state;
        self.apply();
        self.state
    }

    fn apply(&mut self) {
        apply_effects(self.state, self.store.as_ref(), &mut self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::test_support::FailingStore;

    #[test]
    fn test_initialize_defaults_to_light() {
        let store = MemoryStore::new();
        assert!(!initialize(&store).is_dark);
    }

    #[test]
    fn test_initialize_reads_dark() {
        let store = MemoryStore::with_entries([(THEME_KEY, "dark")]);
        assert!(initialize(&store).is_dark);
        let odd = MemoryStore::with_entries([(THEME_KEY, "DARK")]);
        assert!(!initialize(&odd).is_dark);
    }

    #[test]
    fn test_initialize_survives_unreadable_store() {
        assert!(!initialize(&FailingStore).is_dark);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        for is_dark in [false, true] {
            let state = ThemeState { is_dark };
            assert_eq!(toggle(toggle(state)), state);
            assert_ne!(toggle(state), state);
        }
    }

    #[test]
    fn test_apply_effects_is_idempotent() {
        let store = MemoryStore::new();
        let mut root = DocumentRoot::default();
        let state = ThemeState { is_dark: true };
        apply_effects(state, &store, &mut root);
        let snapshot = (store.get(THEME_KEY).unwrap(), root.clone());
        apply_effects(state, &store, &mut root);
        assert_eq!((store.get(THEME_KEY).unwrap(), root), snapshot);
    }

    #[test]
    fn test_toggle_keeps_store_and_marker_in_agreement() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut manager = ThemeManager::initialize(store.clone());
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert!(!manager.root().is_dark());

        let state = manager.toggle();
        assert!(state.is_dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert!(manager.root().is_dark());

        manager.toggle();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert!(!manager.root().is_dark());
    }

    #[test]
    fn test_reload_reproduces_last_written_state() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut first = ThemeManager::initialize(store.clone());
        first.toggle();
        drop(first);

        let reloaded = ThemeManager::initialize(store);
        assert!(reloaded.is_dark());
        assert!(reloaded.root().is_dark());
    }

    #[test]
    fn test_marker_follows_state_when_store_fails() {
        let mut manager = ThemeManager::initialize(Arc::new(FailingStore));
        manager.toggle();
        assert!(manager.root().is_dark());
    }
}
