//! Frame layout. Turns `App` into component props each frame.
//!
//! ```text
//! ┌ title bar (1) ──────────────────────────────┐
//! │ filter bar (3)                              │
//! │ emergency list (rest)                       │
//! └ help line (1) ──────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::core::emergency::{EmergencyRequest, Urgency};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Card, EmergencyList, FilterBar, FilterField, TitleBar};
use crate::tui::palette::Palette;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, filter_area, list_area, help_area] = layout.areas(frame.area());

    let palette = Palette::for_root(app.ctx.theme().root());
    let ready = app.ctx.locale().is_ready();

    TitleBar {
        title: app.t("app.title"),
        language: app.ctx.locale().language().to_string(),
        theme_label: app.t(&format!("app.theme.{}", app.ctx.theme().state().as_str())),
        status_message: app.status_message.clone(),
        loading: !ready,
        palette,
    }
    .render(frame, title_area);

    let visible = app.visible_records();
    filter_bar(app, palette, visible.len()).render(frame, filter_area);

    let (cards, empty_message) = if ready {
        let cards = visible.iter().map(|r| card(app, &palette, r)).collect();
        let empty = match &app.feed_error {
            Some(e) if app.records.is_empty() => {
                app.t_with("status.feedError", &[("error", e.as_str())])
            }
            _ => app.t("emergency.empty"),
        };
        (cards, empty)
    } else {
        (Vec::new(), app.t("app.loading"))
    };
    EmergencyList {
        cards,
        empty_message,
        palette,
        state: &mut tui.list_state,
    }
    .render(frame, list_area);

    let help = Paragraph::new(Span::styled(app.t("help.keys"), palette.dim())).style(palette.base());
    frame.render_widget(help, help_area);
}

fn filter_bar(app: &App, palette: Palette, shown: usize) -> FilterBar {
    let blood_type = match app.filter.blood_type {
        Some(bt) => bt.as_str().to_string(),
        None => app.t("filters.all"),
    };
    let urgency = match &app.filter.urgency {
        Some(u) => urgency_label(app, u),
        None => app.t("filters.all"),
    };
    let shown = shown.to_string();
    let total = app.records.len().to_string();
    FilterBar {
        blood_type: FilterField {
            label: app.t("filters.bloodType"),
            value: blood_type,
        },
        urgency: FilterField {
            label: app.t("filters.urgency"),
            value: urgency,
        },
        location: FilterField {
            label: app.t("filters.location"),
            value: app.filter.location.clone(),
        },
        editing_location: app.editing_location,
        summary: app.t_with(
            "emergency.count",
            &[("shown", shown.as_str()), ("total", total.as_str())],
        ),
        palette,
    }
}

fn urgency_label(app: &App, urgency: &Urgency) -> String {
    match urgency {
        Urgency::Other(raw) => raw.clone(),
        known => app.t(&format!("urgency.{}", known.as_str())),
    }
}

fn card(app: &App, palette: &Palette, record: &EmergencyRequest) -> Card {
    let mut details = Vec::new();
    if let Some(hospital) = &record.hospital {
        details.push(hospital.clone());
    }
    if let Some(units) = record.units_needed {
        let count = units.to_string();
        details.push(app.t_with("emergency.units", &[("count", count.as_str())]));
    }
    if let Some(contact) = &record.contact {
        details.push(app.t_with("emergency.contact", &[("contact", contact.as_str())]));
    }
    if let Some(posted) = record.posted_at {
        let when = posted.format("%Y-%m-%d %H:%M UTC").to_string();
        details.push(app.t_with("emergency.posted", &[("when", when.as_str())]));
    }
    Card {
        headline: format!(
            "{} · {}",
            record.blood_type.as_str(),
            urgency_label(app, &record.urgency)
        ),
        location: record.location.clone(),
        details,
        color: palette.urgency(record.urgency.display_class()),
    }
}
