use ratatui::style::{Color, Modifier, Style};

use crate::app::theme::ThemeMode;

/// Colors for one theme mode. Every screen styles itself from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub info: Color,
    pub error: Color,
    pub good: Color,
    pub fair: Color,
    pub poor: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::DarkGray,
                highlight_fg: Color::White,
                highlight_bg: Color::Blue,
                info: Color::Blue,
                error: Color::Red,
                good: Color::Green,
                fair: Color::Rgb(180, 120, 0),
                poor: Color::Red,
            },
            ThemeMode::Dark => Palette {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                muted: Color::Gray,
                highlight_fg: Color::Yellow,
                highlight_bg: Color::DarkGray,
                info: Color::LightBlue,
                error: Color::LightRed,
                good: Color::Green,
                fair: Color::Yellow,
                poor: Color::Red,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Green at 7+, amber at 5+, red below, muted when unrated.
    pub fn rating(&self, rating: Option<f32>) -> Color {
        match rating {
            Some(score) if score >= 7.0 => self.good,
            Some(score) if score >= 5.0 => self.fair,
            Some(_) => self.poor,
            None => self.muted,
        }
    }
}
