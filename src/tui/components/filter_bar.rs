//! # FilterBar Component
//!
//! Bordered line showing the three filter selections and the match count.
//! The location field gets a cursor block while it is being edited.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// One labelled filter value, already translated.
pub struct FilterField {
    pub label: String,
    pub value: String,
}

pub struct FilterBar {
    pub blood_type: FilterField,
    pub urgency: FilterField,
    pub location: FilterField,
    pub editing_location: bool,
    /// e.g. "3 of 8 requests"
    pub summary: String,
    pub palette: Palette,
}

impl FilterBar {
    fn field<'a>(&self, field: &'a FilterField, active: bool) -> Vec<Span<'a>> {
        let value_style = if active {
            self.palette.emphasis()
        } else {
            self.palette.base()
        };
        let mut spans = vec![
            Span::styled(format!("{}: ", field.label), self.palette.dim()),
            Span::styled(field.value.as_str(), value_style),
        ];
        if active {
            spans.push(Span::styled("█", value_style));
        }
        spans
    }

    pub fn line(&self) -> Line<'_> {
        let separator = || Span::styled("  ·  ", self.palette.dim());
        let mut spans = self.field(&self.blood_type, false);
        spans.push(separator());
        spans.extend(self.field(&self.urgency, false));
        spans.push(separator());
        spans.extend(self.field(&self.location, self.editing_location));
        Line::from(spans)
    }
}

impl Component for FilterBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(Span::styled(self.summary.as_str(), self.palette.dim()))
            .border_style(self.palette.dim())
            .style(self.palette.base());
        frame.render_widget(Paragraph::new(self.line()).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn filter_bar(editing: bool) -> FilterBar {
        FilterBar {
            blood_type: FilterField {
                label: "Blood type".to_string(),
                value: "O+".to_string(),
            },
            urgency: FilterField {
                label: "Urgency".to_string(),
                value: "All".to_string(),
            },
            location: FilterField {
                label: "Location".to_string(),
                value: "hyd".to_string(),
            },
            editing_location: editing,
            summary: "2 of 8 requests".to_string(),
            palette: Palette::light(),
        }
    }

    #[test]
    fn test_renders_all_fields_and_summary() {
        let backend = TestBackend::new(90, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = filter_bar(false);
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Blood type: O+"));
        assert!(text.contains("Urgency: All"));
        assert!(text.contains("Location: hyd"));
        assert!(text.contains("2 of 8 requests"));
        assert!(!text.contains('█'));
    }

    #[test]
    fn test_cursor_only_while_editing() {
        let bar = filter_bar(true);
        let text: String = bar.line().spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.ends_with("hyd█"));
    }
}
