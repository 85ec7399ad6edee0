//! Console palette and the semantic styles screens draw with.

use edgectl_core::NotificationLevel;
use edgectl_core::models::AppStatus;
use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

pub const TEAL: Color = Color::Rgb(94, 234, 212); // #5eead4
pub const SKY: Color = Color::Rgb(125, 211, 252); // #7dd3fc
pub const AMBER: Color = Color::Rgb(251, 191, 36); // #fbbf24
pub const GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const RED: Color = Color::Rgb(248, 113, 113); // #f87171
pub const TEXT: Color = Color::Rgb(203, 213, 225); // #cbd5e1
pub const MUTED: Color = Color::Rgb(100, 116, 139); // #64748b
pub const SELECTION_BG: Color = Color::Rgb(30, 41, 59); // #1e293b

// ── Styles ────────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(TEAL)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn table_header() -> Style {
    Style::default()
        .fg(SKY)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(TEAL)
        .bg(SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn tab(active: bool) -> Style {
    if active {
        Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(RED)
}

/// Toast accent and icon for a notification level.
pub fn level(level: NotificationLevel) -> (Color, &'static str) {
    match level {
        NotificationLevel::Success => (GREEN, "✓"),
        NotificationLevel::Error => (RED, "✗"),
        NotificationLevel::Warning => (AMBER, "!"),
        NotificationLevel::Info => (SKY, "·"),
    }
}

pub fn app_status(status: AppStatus) -> Style {
    let color = match status {
        AppStatus::Running | AppStatus::Deployed => GREEN,
        AppStatus::Error => RED,
        AppStatus::Deploying | AppStatus::Starting | AppStatus::Stopping => AMBER,
        AppStatus::Stopped | AppStatus::Unknown => MUTED,
    };
    Style::default().fg(color)
}
