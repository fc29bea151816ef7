//! # Actions
//!
//! Everything that can happen in donorlink becomes an `Action`.
//! User presses `t`? That's `Action::ToggleTheme`.
//! Translations arrive? That's `Action::LocaleLoaded(result)`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the adapter must carry out (spawn a load, fetch the feed, quit).
//! No I/O happens here beyond the synchronous store writes the theme and
//! locale providers make.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::emergency::EmergencyRequest;
use crate::core::state::App;
use crate::i18n::{ChangeOutcome, LoadResult, PendingLoad};

#[derive(Debug)]
pub enum Action {
    ToggleTheme,
    CycleLanguage,
    SelectLanguage(String),
    CycleBloodType,
    CycleUrgency,
    BeginLocationEdit,
    LocationInput(char),
    LocationBackspace,
    EndLocationEdit,
    ClearFilters,
    Refresh,
    FeedLoaded(Result<Vec<EmergencyRequest>, String>),
    LocaleLoaded(LoadResult),
    Quit,
}

/// Work the adapter must perform after an update.
pub enum Effect {
    None,
    Quit,
    /// Run the load and dispatch `Action::LocaleLoaded` with its result.
    LoadLocale(PendingLoad),
    /// Fetch the feed and dispatch `Action::FeedLoaded`.
    FetchFeed,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ToggleTheme => {
            let state = app.ctx.theme_mut().toggle();
            let label = app.t(&format!("app.theme.{}", state.as_str()));
            app.status_message = label;
            Effect::None
        }
        Action::CycleLanguage => {
            let next = app.ctx.locale().language().next();
            change_language(app, next.as_str())
        }
        Action::SelectLanguage(code) => change_language(app, &code),
        Action::CycleBloodType => {
            app.filter.cycle_blood_type();
            Effect::None
        }
        Action::CycleUrgency => {
            app.filter.cycle_urgency();
            Effect::None
        }
        Action::BeginLocationEdit => {
            app.editing_location = true;
            Effect::None
        }
        Action::LocationInput(c) => {
            if app.editing_location {
                app.filter.location.push(c);
            }
            Effect::None
        }
        Action::LocationBackspace => {
            if app.editing_location {
                app.filter.location.pop();
            }
            Effect::None
        }
        Action::EndLocationEdit => {
            app.editing_location = false;
            Effect::None
        }
        Action::ClearFilters => {
            app.filter = Default::default();
            app.editing_location = false;
            Effect::None
        }
        Action::Refresh => {
            if app.is_refreshing {
                return Effect::None;
            }
            app.is_refreshing = true;
            app.status_message = app.t("status.refreshing");
            Effect::FetchFeed
        }
        Action::FeedLoaded(result) => {
            app.is_refreshing = false;
            match result {
                Ok(records) => {
                    info!("Feed delivered {} emergency requests", records.len());
                    app.records = records;
                    app.feed_error = None;
                    app.status_message.clear();
                }
                Err(e) => {
                    warn!("Feed failed: {}", e);
                    app.status_message = app.t_with("status.feedError", &[("error", e.as_str())]);
                    app.feed_error = Some(e);
                }
            }
            Effect::None
        }
        Action::LocaleLoaded(result) => {
            let language = result.language;
            let applied = app.ctx.locale_mut().complete_load(result);
            debug!("Locale load for '{}' applied: {}", language, applied);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn change_language(app: &mut App, code: &str) -> Effect {
    match app.ctx.locale_mut().change_language(code) {
        ChangeOutcome::Rejected => Effect::None,
        ChangeOutcome::Ready(language) | ChangeOutcome::AwaitingLoad(language) => {
            app.status_message = language.native_name().to_string();
            Effect::None
        }
        ChangeOutcome::Loading(pending) => {
            app.status_message = pending.language().native_name().to_string();
            Effect::LoadLocale(pending)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emergency::{BloodType, Urgency};
    use crate::core::locale::LanguageCode;
    use crate::core::store::{LANGUAGE_KEY, THEME_KEY};
    use crate::test_support::test_app;

    #[test]
    fn test_toggle_theme_persists() {
        let mut app = test_app();
        assert!(matches!(update(&mut app, Action::ToggleTheme), Effect::None));
        assert!(app.ctx.theme().is_dark());
        assert!(app.ctx.theme().root().is_dark());
        assert_eq!(app.ctx.store().get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(app.status_message, "app.theme.dark");
    }

    #[test]
    fn test_cycle_language_requests_load() {
        let mut app = test_app();
        let effect = update(&mut app, Action::CycleLanguage);
        let Effect::LoadLocale(pending) = effect else {
            panic!("expected a locale load");
        };
        assert_eq!(pending.language(), LanguageCode::Hi);
        assert_eq!(app.ctx.locale().language(), LanguageCode::Hi);
        assert!(!app.ctx.locale().is_ready());
        assert_eq!(
            app.ctx.store().get(LANGUAGE_KEY).unwrap().as_deref(),
            Some("hi")
        );

        let result = tokio_test::block_on(pending.run());
        update(&mut app, Action::LocaleLoaded(result));
        assert!(app.ctx.locale().is_ready());
        assert_eq!(app.t("app.title"), "[hi] app.title");
    }

    #[test]
    fn test_select_unsupported_language_is_ignored() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SelectLanguage("es".to_string()));
        assert!(matches!(effect, Effect::None));
        let effect = update(&mut app, Action::SelectLanguage("HI".to_string()));
        assert!(matches!(effect, Effect::None));
        assert_eq!(app.ctx.locale().language(), LanguageCode::En);
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn test_location_edit_only_while_editing() {
        let mut app = test_app();
        update(&mut app, Action::LocationInput('x'));
        assert!(app.filter.location.is_empty());

        update(&mut app, Action::BeginLocationEdit);
        for c in "pune".chars() {
            update(&mut app, Action::LocationInput(c));
        }
        update(&mut app, Action::LocationBackspace);
        update(&mut app, Action::EndLocationEdit);
        assert_eq!(app.filter.location, "pun");
        assert!(!app.editing_location);
    }

    #[test]
    fn test_refresh_and_feed_results() {
        let mut app = test_app();
        assert!(matches!(update(&mut app, Action::Refresh), Effect::FetchFeed));
        // A second refresh while one is in flight is ignored.
        assert!(matches!(update(&mut app, Action::Refresh), Effect::None));

        let records = vec![EmergencyRequest::new(BloodType::ONeg, Urgency::Critical, "Agra")];
        update(&mut app, Action::FeedLoaded(Ok(records)));
        assert!(!app.is_refreshing);
        assert_eq!(app.records.len(), 1);

        update(&mut app, Action::Refresh);
        update(&mut app, Action::FeedLoaded(Err("HTTP 503".to_string())));
        assert_eq!(app.records.len(), 1);
        assert_eq!(app.feed_error.as_deref(), Some("HTTP 503"));
    }

    #[test]
    fn test_clear_filters() {
        let mut app = test_app();
        update(&mut app, Action::CycleBloodType);
        update(&mut app, Action::CycleUrgency);
        assert!(!app.filter.is_empty());
        update(&mut app, Action::ClearFilters);
        assert!(app.filter.is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert!(matches!(update(&mut app, Action::Quit), Effect::Quit));
    }
}
