//! # EmergencyList Component
//!
//! Scrollable column of emergency cards. Each card is a colored headline
//! (blood type and urgency), the location, and wrapped detail lines.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ListState` (scroll/selection) lives in `TuiState`
//! - `EmergencyList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Display data for one request, already translated and formatted.
#[derive(Debug, Clone)]
pub struct Card {
    pub headline: String,
    pub location: String,
    pub details: Vec<String>,
    pub color: Color,
}

pub struct EmergencyList<'a> {
    pub cards: Vec<Card>,
    pub empty_message: String,
    pub palette: Palette,
    pub state: &'a mut ListState,
}

/// Cuts `s` to at most `max` terminal columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl EmergencyList<'_> {
    fn item(&self, card: &Card, width: usize) -> ListItem<'static> {
        let bar = Span::styled("▌ ", Style::default().fg(card.color));
        let headline_width = card.headline.width() + 4;
        let location = truncate_to_width(&card.location, width.saturating_sub(headline_width + 2));

        let mut lines = vec![Line::from(vec![
            bar.clone(),
            Span::styled(
                card.headline.clone(),
                Style::default().fg(card.color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {location}"), self.palette.base()),
        ])];

        let detail_width = width.saturating_sub(4).max(10);
        for detail in &card.details {
            for wrapped in textwrap::wrap(detail, detail_width) {
                lines.push(Line::from(vec![
                    bar.clone(),
                    Span::styled(wrapped.into_owned(), self.palette.dim()),
                ]));
            }
        }
        lines.push(Line::raw(""));
        ListItem::new(Text::from(lines))
    }
}

impl Component for EmergencyList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().style(self.palette.base());

        if self.cards.is_empty() {
            let empty = Paragraph::new(self.empty_message.as_str())
                .style(self.palette.dim())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let width = area.width as usize;
        let items: Vec<ListItem> = self.cards.iter().map(|c| self.item(c, width)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut *self.state);
    }
}
