//! # Application State
//!
//! Core business state for donorlink. This module contains domain logic
//! only, no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── ctx: AppContext                 // theme + locale providers, store
//! ├── records: Vec<EmergencyRequest>  // last feed snapshot
//! ├── filter: EmergencyFilter         // filter bar selections
//! ├── editing_location: bool          // location query has focus
//! ├── is_refreshing: bool             // feed fetch in flight
//! ├── feed_error: Option<String>      // last feed failure
//! └── status_message: String          // status line text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::context::AppContext;
use crate::core::emergency::{EmergencyFilter, EmergencyRequest, sort_by_severity};

pub struct App {
    pub ctx: AppContext,
    pub records: Vec<EmergencyRequest>,
    pub filter: EmergencyFilter,
    pub editing_location: bool,
    pub is_refreshing: bool,
    pub feed_error: Option<String>,
    pub status_message: String,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            records: Vec::new(),
            filter: EmergencyFilter::default(),
            editing_location: false,
            is_refreshing: false,
            feed_error: None,
            status_message: String::new(),
        }
    }

    /// Records passing the current filter, most severe first.
    pub fn visible_records(&self) -> Vec<&EmergencyRequest> {
        let mut view = self.filter.apply(&self.records);
        sort_by_severity(&mut view);
        view
    }

    /// Translates `key` through the locale provider.
    pub fn t(&self, key: &str) -> String {
        self.ctx.locale().t(key)
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.ctx.locale().t_with(key, args)
    }
}
