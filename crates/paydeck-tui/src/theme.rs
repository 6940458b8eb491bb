//! Ledger Noir palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const TEAL: Color = Color::Rgb(45, 212, 191); // #2dd4bf
pub const AMBER: Color = Color::Rgb(251, 191, 36); // #fbbf24
pub const BLUE: Color = Color::Rgb(96, 165, 250); // #60a5fa
pub const GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const RED: Color = Color::Rgb(248, 113, 113); // #f87171

// ── Extended Palette ──────────────────────────────────────────────────

pub const FOG: Color = Color::Rgb(203, 213, 225); // #cbd5e1
pub const SLATE: Color = Color::Rgb(100, 116, 139); // #64748b
pub const BG_HIGHLIGHT: Color = Color::Rgb(30, 41, 59); // #1e293b

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(TEAL)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(SLATE)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(BLUE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(FOG)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(TEAL)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(SLATE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Big number on a stat tile.
pub fn stat_value() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Label under a stat tile value.
pub fn stat_label() -> Style {
    Style::default().fg(SLATE)
}

/// Error text.
pub fn error_style() -> Style {
    Style::default().fg(RED).add_modifier(Modifier::BOLD)
}

/// Color for a lifecycle status word.
pub fn status_color(status: &str) -> Color {
    match status {
        "completed" | "approved" | "paid" | "active" => GREEN,
        "pending" | "accrued" | "cancellation_requested" => AMBER,
        "failed" | "cancelled" | "revoked" | "inactive" => RED,
        _ => FOG,
    }
}
