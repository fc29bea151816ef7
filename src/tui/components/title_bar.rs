//! # TitleBar Component
//!
//! Top line showing the app title, active language, theme and status.
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! While the locale is loading the translated title is not available yet,
//! so the bar shows a loading marker with the language code instead:
//!
//! 1. **Ready**: `"Blood Link | EN | Dark | Refreshing requests…"`
//! 2. **Loading**: `"⟳ ta | Dark"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub struct TitleBar {
    /// Translated app title.
    pub title: String,
    /// Active language code.
    pub language: String,
    /// Translated theme name.
    pub theme_label: String,
    /// Transient status; empty for none.
    pub status_message: String,
    /// True while the active language's translations are loading.
    pub loading: bool,
    pub palette: Palette,
}

impl TitleBar {
    pub fn text(&self) -> String {
        let head = if self.loading {
            format!("⟳ {}", self.language)
        } else {
            format!(
                "{} | {} | {}",
                self.title,
                self.language.to_uppercase(),
                self.theme_label
            )
        };
        if self.status_message.is_empty() || self.loading {
            head
        } else {
            format!("{} | {}", head, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.text(), self.palette.emphasis()));
        frame.render_widget(Paragraph::new(line).style(self.palette.base()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn bar(loading: bool, status: &str) -> TitleBar {
        TitleBar {
            title: "Blood Link".to_string(),
            language: "ta".to_string(),
            theme_label: "Dark".to_string(),
            status_message: status.to_string(),
            loading,
            palette: Palette::dark(),
        }
    }

    fn rendered(mut title_bar: TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_ready_title_with_status() {
        let text = rendered(bar(false, "Refreshing"));
        assert!(text.contains("Blood Link"));
        assert!(text.contains("TA"));
        assert!(text.contains("Dark"));
        assert!(text.contains("Refreshing"));
    }

    #[test]
    fn test_ready_title_without_status() {
        assert_eq!(bar(false, "").text(), "Blood Link | TA | Dark");
    }

    #[test]
    fn test_loading_hides_translated_text() {
        let text = bar(true, "தமிழ்").text();
        assert_eq!(text, "⟳ ta");
        assert!(!text.contains("Blood Link"));
    }
}
