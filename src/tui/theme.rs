//! Terminal colors and the styles the sheet renderer applies

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ThemeVariant {
    #[default]
    Mocha, // Dark
    Latte, // Light
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent_primary: Color, // Focus, selection
    pub accent_error: Color,   // Validation errors
    pub accent_muted: Color,   // Labels

    pub text_primary: Color,
    pub text_tertiary: Color, // Hints, messages

    pub border_primary: Color,
    pub border_secondary: Color, // Disabled state
    pub bg_base: Color,
    pub bg_surface: Color, // Dropdown, selection background

    pub palette_1: Color, // Cursor
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    // Catppuccin Mocha
    fn mocha() -> Self {
        Self {
            accent_primary: Color::Rgb(0xb4, 0xbe, 0xfe),   // lavender
            accent_error: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
            accent_muted: Color::Rgb(0xfa, 0xb3, 0x87),     // peach
            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),     // text
            text_tertiary: Color::Rgb(0xa6, 0xad, 0xc8),    // subtext0
            border_primary: Color::Rgb(0x7f, 0x84, 0x9c),   // overlay1
            border_secondary: Color::Rgb(0x6c, 0x70, 0x86), // overlay0
            bg_base: Color::Rgb(0x1e, 0x1e, 0x2e),          // base
            bg_surface: Color::Rgb(0x31, 0x32, 0x44),       // surface0
            palette_1: Color::Rgb(0xf5, 0xe0, 0xdc),        // rosewater
        }
    }

    // Catppuccin Latte
    fn latte() -> Self {
        Self {
            accent_primary: Color::Rgb(0x72, 0x87, 0xfd),
            accent_error: Color::Rgb(0xd2, 0x0f, 0x39),
            accent_muted: Color::Rgb(0xfe, 0x64, 0x0b),
            text_primary: Color::Rgb(0x4c, 0x4f, 0x69),
            text_tertiary: Color::Rgb(0x6c, 0x6f, 0x85),
            border_primary: Color::Rgb(0x8c, 0x8f, 0xa1),
            border_secondary: Color::Rgb(0x9c, 0xa0, 0xb0),
            bg_base: Color::Rgb(0xef, 0xf1, 0xf5),
            bg_surface: Color::Rgb(0xcc, 0xd0, 0xda),
            palette_1: Color::Rgb(0xdc, 0x8a, 0x78),
        }
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.accent_muted)
    }

    pub fn editor_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn focused_style(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn disabled_style(&self) -> Style {
        Style::default().fg(self.border_secondary)
    }

    /// Applied to editors holding rejected input
    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.accent_error)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn message_style(&self) -> Style {
        Style::default().fg(self.accent_error)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.text_tertiary)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default().bg(self.palette_1).fg(self.bg_base)
    }

    pub fn dropdown_style(&self) -> Style {
        Style::default().bg(self.bg_surface).fg(self.text_primary)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().bg(self.accent_primary).fg(self.bg_base)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border_primary)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}
