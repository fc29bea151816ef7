use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::core::action::Action;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Char(char),
    Backspace,
    Enter,
    Escape,
    ScrollUp,
    ScrollDown,
    /// Ctrl+C: quits from any mode
    ForceQuit,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) if key_event.kind != KeyEventKind::Release => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Char(c)) => Some(TuiEvent::Char(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Enter),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
                (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
                _ => None,
            }
        }
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Maps a key event to a core action. While the location query is being
/// edited, characters go into the query instead of triggering shortcuts.
pub fn action_for(event: &TuiEvent, editing_location: bool) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if editing_location {
        return match event {
            TuiEvent::Char(c) => Some(Action::LocationInput(*c)),
            TuiEvent::Backspace => Some(Action::LocationBackspace),
            TuiEvent::Enter | TuiEvent::Escape => Some(Action::EndLocationEdit),
            _ => None,
        };
    }
    match event {
        TuiEvent::Char('t') => Some(Action::ToggleTheme),
        TuiEvent::Char('l') => Some(Action::CycleLanguage),
        TuiEvent::Char('b') => Some(Action::CycleBloodType),
        TuiEvent::Char('u') => Some(Action::CycleUrgency),
        TuiEvent::Char('/') => Some(Action::BeginLocationEdit),
        TuiEvent::Char('c') => Some(Action::ClearFilters),
        TuiEvent::Char('r') => Some(Action::Refresh),
        TuiEvent::Char('q') | TuiEvent::Escape => Some(Action::Quit),
        _ => None,
    }
}
