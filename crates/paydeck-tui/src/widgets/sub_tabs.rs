//! Inline sub-tab bar for per-screen categorical filters.

use ratatui::text::{Line, Span};

use crate::theme;

/// Render a one-line filter tab bar, highlighting the active entry.
pub fn render_sub_tabs(labels: &[&str], active: usize) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (idx, label) in labels.iter().enumerate() {
        let style = if idx == active {
            theme::tab_active()
        } else {
            theme::tab_inactive()
        };
        spans.push(Span::styled(format!(" {label} "), style));
        if idx + 1 < labels.len() {
            spans.push(Span::styled("·", theme::key_hint()));
        }
    }
    Line::from(spans)
}
