//! # Translations
//!
//! Lazily loaded, cached translation resource sets and the manager that
//! switches between them.
//!
//! - [`resources`]: `ResourceSet`, nested JSON flattened to dotted keys
//! - [`loader`]: the `ResourceLoader` seam and its error type
//! - [`loaders`]: HTTP (`{{lng}}` template) and bundled implementations
//! - [`manager`]: `LocaleManager`, the locale provider

pub mod loader;
pub mod loaders;
pub mod manager;
pub mod resources;

pub use loader::{LoadError, ResourceLoader};
pub use loaders::{BundledResourceLoader, HttpResourceLoader};
pub use manager::{ChangeOutcome, LoadResult, LocaleEvent, LocaleManager, PendingLoad, SubscriptionId};
pub use resources::ResourceSet;
