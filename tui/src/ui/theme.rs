use ratatui::style::{Color, Modifier, Style};

/// Calm teal-on-slate palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(18, 24, 32);
    pub const FG: Color = Color::Rgb(225, 232, 240);
    pub const FG_DIM: Color = Color::Rgb(150, 165, 180);
    pub const FG_MUTED: Color = Color::Rgb(90, 100, 115);

    pub const ACCENT_TEAL: Color = Color::Rgb(0, 200, 180);
    pub const ACCENT_GREEN: Color = Color::Rgb(90, 220, 120);
    pub const ACCENT_RED: Color = Color::Rgb(255, 90, 90);

    /// Full-screen background.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Focused form row.
    pub fn focus() -> Style {
        Style::default()
            .bg(Color::Rgb(30, 48, 56))
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn ok() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }
}
