//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! Locale loads and feed fetches run as tokio tasks. Each task sends its
//! result back as an `Action` over a std mpsc channel, and the loop feeds
//! it through `update()` like any key press. All state changes therefore
//! happen on the loop thread.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms in `poll` and only
//! redraws after an input event, a background action, or a locale event.

mod component;
mod components;
mod event;
mod palette;
mod ui;

use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};

use ratatui::widgets::ListState;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{FeedSource, ResolvedConfig};
use crate::core::context::AppContext;
use crate::core::locale::{DetectionInputs, LanguageCode};
use crate::core::state::App;
use crate::core::store::{FileStore, KeyValueStore, MemoryStore};
use crate::feed::{BundledFeed, EmergencyFeed, FileFeed, HttpFeed};
use crate::i18n::{
    BundledResourceLoader, HttpResourceLoader, LocaleManager, PendingLoad, ResourceLoader,
};
use crate::tui::event::{TuiEvent, action_for, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub list_state: ListState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

fn build_store(config: &ResolvedConfig) -> Arc<dyn KeyValueStore> {
    match FileStore::open(&config.store_path) {
        Ok(store) => {
            info!("Preferences stored at {}", store.path().display());
            Arc::new(store)
        }
        Err(e) => {
            warn!(
                "Could not open preference store {}: {}. Preferences will not persist.",
                config.store_path.display(),
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

fn build_loader(config: &ResolvedConfig) -> Arc<dyn ResourceLoader> {
    match &config.resource_url {
        Some(template) => match HttpResourceLoader::new(template.clone()) {
            Ok(loader) => Arc::new(loader),
            Err(e) => {
                warn!("{}; using bundled translations", e);
                Arc::new(BundledResourceLoader::new())
            }
        },
        None => Arc::new(BundledResourceLoader::new()),
    }
}

/// Build a feed from the resolved feed source.
pub fn build_feed(config: &ResolvedConfig) -> Arc<dyn EmergencyFeed> {
    match &config.feed {
        FeedSource::Http(url) => Arc::new(HttpFeed::new(url.clone())),
        FeedSource::File(path) => Arc::new(FileFeed::new(path.clone())),
        FeedSource::Bundled => Arc::new(BundledFeed),
    }
}

/// Wires the store and both providers. The bundled fallback language is
/// preloaded so untranslated keys never show while a remote load runs.
pub fn build_context(config: &ResolvedConfig) -> (AppContext, Option<PendingLoad>) {
    let store = build_store(config);
    let inputs = DetectionInputs {
        stored: None,
        navigator: DetectionInputs::navigator_from_env(),
        html_lang: config.document_lang.clone(),
        origin_url: config.origin_url.clone(),
    };
    let (mut locale, pending) = LocaleManager::initialize(
        store.clone(),
        build_loader(config),
        &config.detection_order,
        inputs,
    );
    match BundledResourceLoader::new().resource(LanguageCode::FALLBACK) {
        Ok(set) => locale.preload(set),
        Err(e) => warn!("Bundled fallback translations unavailable: {}", e),
    }
    let ctx = AppContext::new(store).with_theme().with_locale(locale);
    (ctx, pending)
}

pub fn run(config: ResolvedConfig, initial_language: Option<String>) -> std::io::Result<()> {
    let feed = build_feed(&config);
    info!("Feed source: {}", feed.name());
    let (ctx, initial_load) = build_context(&config);
    let mut app = App::new(ctx);
    let mut tui = TuiState::new();

    // Locale events arrive synchronously from inside update(); they only
    // need to force the next frame.
    let locale_changed = Arc::new(AtomicBool::new(false));
    let flag = locale_changed.clone();
    app.ctx.locale_mut().subscribe(move |event| {
        debug!("Locale event: {:?}", event);
        flag.store(true, Ordering::Relaxed);
    });

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if let Some(pending) = initial_load {
        spawn_locale_load(pending, tx.clone());
    }
    let mut startup = vec![Action::Refresh];
    if let Some(code) = initial_language {
        startup.push(Action::SelectLanguage(code));
    }
    for action in startup {
        dispatch(&mut app, action, &feed, &tx);
    }

    let mut terminal = ratatui::init();
    let mut needs_redraw = true; // Force first frame

    loop {
        if locale_changed.swap(false, Ordering::Relaxed) {
            needs_redraw = true;
        }
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => continue,
                TuiEvent::ScrollUp => {
                    tui.list_state.select_previous();
                    continue;
                }
                TuiEvent::ScrollDown => {
                    tui.list_state.select_next();
                    continue;
                }
                _ => {}
            }
            let Some(action) = action_for(&event, app.editing_location) else {
                continue;
            };
            let resets_selection = matches!(
                action,
                Action::CycleBloodType
                    | Action::CycleUrgency
                    | Action::ClearFilters
                    | Action::LocationInput(_)
                    | Action::LocationBackspace
            );
            if dispatch(&mut app, action, &feed, &tx) {
                should_quit = true;
                break;
            }
            if resets_selection {
                tui.list_state.select(None);
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (locale loads, feed fetches)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &feed, &tx) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Applies an action and carries out its effect. Returns true on quit.
fn dispatch(
    app: &mut App,
    action: Action,
    feed: &Arc<dyn EmergencyFeed>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::LoadLocale(pending) => {
            spawn_locale_load(pending, tx.clone());
            false
        }
        Effect::FetchFeed => {
            spawn_feed_fetch(feed.clone(), tx.clone());
            false
        }
    }
}

fn spawn_locale_load(pending: PendingLoad, tx: mpsc::Sender<Action>) {
    info!("Spawning translation load for '{}'", pending.language());
    tokio::spawn(async move {
        let result = pending.run().await;
        if tx.send(Action::LocaleLoaded(result)).is_err() {
            warn!("Failed to send locale result: receiver dropped");
        }
    });
}

fn spawn_feed_fetch(feed: Arc<dyn EmergencyFeed>, tx: mpsc::Sender<Action>) {
    info!("Spawning feed fetch from {}", feed.name());
    tokio::spawn(async move {
        let result = match tokio::time::timeout(std::time::Duration::from_secs(30), feed.fetch()).await
        {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(_) => {
                warn!("Feed '{}' timed out after 30s", feed.name());
                Err("timed out after 30s".to_string())
            }
        };
        if tx.send(Action::FeedLoaded(result)).is_err() {
            warn!("Failed to send feed result: receiver dropped");
        }
    });
}
