//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! - `TitleBar`: app title, language, theme and status (stateless)
//! - `FilterBar`: current filter selections and match count (stateless)
//! - `EmergencyList`: scrollable emergency cards (borrows `ListState`)
//!
//! Components receive translated, formatted props. They never reach into
//! `App` or the locale provider themselves; `ui.rs` builds their props.

pub mod emergency_list;
pub mod filter_bar;
pub mod title_bar;

pub use emergency_list::{Card, EmergencyList};
pub use filter_bar::{FilterBar, FilterField};
pub use title_bar::TitleBar;
