//! Colors for the two themes. The active palette is picked from the
//! document root's `dark` marker, never from the theme flag directly.

use ratatui::style::{Color, Modifier, Style};

use crate::core::emergency::DisplayClass;
use crate::core::theme::DocumentRoot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub severe: Color,
    pub elevated: Color,
    pub moderate: Color,
    pub mild: Color,
    pub neutral: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(17, 24, 39),
            text: Color::Rgb(243, 244, 246),
            muted: Color::Rgb(156, 163, 175),
            accent: Color::Rgb(248, 113, 113),
            severe: Color::Rgb(239, 68, 68),
            elevated: Color::Rgb(249, 115, 22),
            moderate: Color::Rgb(234, 179, 8),
            mild: Color::Rgb(34, 197, 94),
            neutral: Color::Rgb(107, 114, 128),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(255, 255, 255),
            text: Color::Rgb(17, 24, 39),
            muted: Color::Rgb(75, 85, 99),
            accent: Color::Rgb(185, 28, 28),
            severe: Color::Rgb(220, 38, 38),
            elevated: Color::Rgb(234, 88, 12),
            moderate: Color::Rgb(202, 138, 4),
            mild: Color::Rgb(22, 163, 74),
            neutral: Color::Rgb(107, 114, 128),
        }
    }

    pub fn for_root(root: &DocumentRoot) -> Self {
        if root.is_dark() { Self::dark() } else { Self::light() }
    }

    pub fn urgency(&self, class: DisplayClass) -> Color {
        match class {
            DisplayClass::Severe => self.severe,
            DisplayClass::Elevated => self.elevated,
            DisplayClass::Moderate => self.moderate,
            DisplayClass::Mild => self.mild,
            DisplayClass::Neutral => self.neutral,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted).bg(self.background)
    }

    pub fn emphasis(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }
}
