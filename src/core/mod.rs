//! # Core Application Logic
//!
//! This module contains donorlink's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Filter engine        │
//!                    │  • Theme + locale state │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Store    │      │   Feed /   │
//!     │  Adapter   │      │  (file)    │      │ Resources  │
//!     │ (ratatui)  │      │            │      │  (HTTP)    │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`emergency`]: request model, urgency classification, filtering
//! - [`theme`]: dark/light state and its persisted + document mirrors
//! - [`locale`]: supported languages and startup detection
//! - [`context`]: the provider scope that owns theme and locale
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and `update()`

pub mod action;
pub mod config;
pub mod context;
pub mod emergency;
pub mod locale;
pub mod state;
pub mod store;
pub mod theme;
