//! Style definitions, parameterized by the user's theme preference.
//!
//! `System` leans on the terminal's own colors; `Light` and `Dark` pick
//! explicit foregrounds so the panels stay readable either way.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::user::Theme;

fn strong_color(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Black,
        Theme::Dark => Color::White,
        Theme::System => Color::Reset,
    }
}

fn dim_color(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Gray,
        Theme::Dark | Theme::System => Color::DarkGray,
    }
}

fn accent_color(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Blue,
        Theme::Dark | Theme::System => Color::Cyan,
    }
}

// =============================================================================
// Panels
// =============================================================================

pub fn active_panel_border_style(theme: Theme) -> Style {
    Style::default().fg(accent_color(theme))
}

pub fn inactive_panel_border_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}

// =============================================================================
// Chat list
// =============================================================================

/// Style for chat titles in the list.
pub fn chat_name_style(theme: Theme) -> Style {
    Style::default()
        .fg(strong_color(theme))
        .add_modifier(Modifier::BOLD)
}

/// Style for the last-message preview (dimmed).
pub fn chat_preview_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}

pub fn timestamp_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}

pub fn separator_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}

pub fn group_tag_style(theme: Theme) -> Style {
    Style::default().fg(accent_color(theme))
}

// =============================================================================
// Messages
// =============================================================================

pub fn message_sender_style(theme: Theme) -> Style {
    Style::default()
        .fg(strong_color(theme))
        .add_modifier(Modifier::BOLD)
}

pub fn message_time_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}

pub fn message_text_style(theme: Theme) -> Style {
    Style::default().fg(strong_color(theme))
}

pub fn date_separator_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}

pub fn system_message_style(theme: Theme) -> Style {
    Style::default()
        .fg(dim_color(theme))
        .add_modifier(Modifier::ITALIC)
}

/// Read receipt: the message reached someone.
pub fn receipt_read_style(theme: Theme) -> Style {
    Style::default().fg(accent_color(theme))
}

/// Read receipt: sent, nobody else has seen it yet.
pub fn receipt_sent_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}

// =============================================================================
// Inputs and notices
// =============================================================================

pub fn input_prompt_style(theme: Theme) -> Style {
    Style::default().fg(accent_color(theme))
}

pub fn input_text_style(theme: Theme) -> Style {
    Style::default().fg(strong_color(theme))
}

pub fn input_placeholder_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}

pub fn field_label_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}

pub fn title_style(theme: Theme) -> Style {
    Style::default()
        .fg(accent_color(theme))
        .add_modifier(Modifier::BOLD)
}

pub fn info_notice_style(theme: Theme) -> Style {
    Style::default().fg(accent_color(theme))
}

pub fn error_notice_style() -> Style {
    Style::default().fg(Color::Red)
}

pub fn hint_style(theme: Theme) -> Style {
    Style::default().fg(dim_color(theme))
}
