//! Shared chrome for the paginated list screens.
//!
//! Every list screen pairs a `RemoteList<T>` (query + data state, from
//! paydeck-core) with a [`ListChrome`] (search input, row selection,
//! spinner) and the render helpers here. Screens contribute only their
//! columns and action keys.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, TableState};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use paydeck_core::{FailureKind, LoadPhase, RemoteList};

use crate::theme;

/// What a key press did to the list state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeEvent {
    /// Key consumed; no server round-trip needed.
    Consumed,
    /// The query changed — the screen must begin a fetch.
    QueryChanged,
    /// Not a chrome key; the screen handles it.
    NotHandled,
}

/// UI state shared by every list screen.
#[derive(Debug, Default)]
pub struct ListChrome {
    pub search: Input,
    pub search_active: bool,
    pub table_state: TableState,
    pub throbber: ThrobberState,
}

impl ListChrome {
    pub fn new() -> Self {
        let mut chrome = Self::default();
        chrome.table_state.select(Some(0));
        chrome
    }

    /// Handle navigation, search, paging, and retry keys.
    ///
    /// The search commits live: every edit updates the query and triggers
    /// a fetch, so rapid typing exercises the sequence guard rather than
    /// racing.
    pub fn handle_key<T>(&mut self, key: KeyEvent, list: &mut RemoteList<T>) -> ChromeEvent {
        if self.search_active {
            return match key.code {
                KeyCode::Esc => {
                    self.search_active = false;
                    if self.search.value().is_empty() {
                        ChromeEvent::Consumed
                    } else {
                        self.search = Input::default();
                        list.set_search("");
                        ChromeEvent::QueryChanged
                    }
                }
                KeyCode::Enter => {
                    self.search_active = false;
                    ChromeEvent::Consumed
                }
                _ => {
                    let before = self.search.value().to_owned();
                    self.search.handle_event(&crossterm::event::Event::Key(key));
                    if self.search.value() == before {
                        ChromeEvent::Consumed
                    } else {
                        list.set_search(self.search.value());
                        self.table_state.select(Some(0));
                        ChromeEvent::QueryChanged
                    }
                }
            };
        }

        match key.code {
            KeyCode::Char('/') => {
                self.search_active = true;
                ChromeEvent::Consumed
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1, list.rows().len());
                ChromeEvent::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1, list.rows().len());
                ChromeEvent::Consumed
            }
            KeyCode::Char('g') => {
                self.table_state.select(Some(0));
                ChromeEvent::Consumed
            }
            KeyCode::Char('G') => {
                let len = list.rows().len();
                self.table_state.select(Some(len.saturating_sub(1)));
                ChromeEvent::Consumed
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if list.page() < list.total_pages() {
                    list.next_page();
                    self.table_state.select(Some(0));
                    ChromeEvent::QueryChanged
                } else {
                    ChromeEvent::Consumed
                }
            }
            KeyCode::Char('h') | KeyCode::Left => {
                if list.page() > 1 {
                    list.prev_page();
                    self.table_state.select(Some(0));
                    ChromeEvent::QueryChanged
                } else {
                    ChromeEvent::Consumed
                }
            }
            KeyCode::Char('r') => ChromeEvent::QueryChanged,
            _ => ChromeEvent::NotHandled,
        }
    }

    /// Currently selected row index.
    pub fn selected(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Keep the selection inside the row range after a reload.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(Some(0));
        } else if self.selected() >= len {
            self.table_state.select(Some(len - 1));
        }
    }

    pub fn tick(&mut self) {
        self.throbber.calc_next();
    }

    fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let current = isize::try_from(self.selected()).unwrap_or(0);
        let max = isize::try_from(len - 1).unwrap_or(0);
        let next = (current + delta).clamp(0, max);
        self.table_state.select(Some(usize::try_from(next).unwrap_or(0)));
    }
}

// ── Render helpers ──────────────────────────────────────────────────

/// Outer block with title, record count, and active search display.
/// Returns the inner area.
pub fn render_list_block<T>(
    frame: &mut Frame,
    area: Rect,
    name: &str,
    list: &RemoteList<T>,
    chrome: &ListChrome,
) -> Rect {
    let title = if chrome.search_active || !chrome.search.value().is_empty() {
        format!(" {name} ({}) /{} ", list.count(), chrome.search.value())
    } else {
        format!(" {name} ({}) ", list.count())
    };

    let block = Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if chrome.search_active {
            theme::border_focused()
        } else {
            theme::border_default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Sortable table header cell: highlighted with a direction arrow when
/// active.
pub fn sort_header(label: &str, field: &'static str, active: Option<paydeck_core::Sort>) -> Span<'static> {
    match active {
        Some(sort) if sort.field == field => {
            let arrow = match sort.direction {
                paydeck_core::SortDirection::Ascending => "▲",
                paydeck_core::SortDirection::Descending => "▼",
            };
            Span::styled(format!("{label} {arrow}"), theme::tab_active())
        }
        _ => Span::styled(label.to_owned(), theme::table_header()),
    }
}

/// Render the table body, or the full-pane error panel when the last
/// fetch failed (401 failures are surfaced by the app-level popup, so the
/// panel shows a short hint instead of the generic message).
pub fn render_table_or_error<T>(
    frame: &mut Frame,
    area: Rect,
    list: &RemoteList<T>,
    chrome: &ListChrome,
    header: Row<'_>,
    widths: &[Constraint],
    rows: Vec<Row<'_>>,
) {
    match list.phase() {
        LoadPhase::Failed { kind, message } => {
            let text = match kind {
                FailureKind::AuthExpired => "Session expired -- sign in again.".to_owned(),
                FailureKind::Other => message.clone(),
            };
            let lines = vec![
                Line::from(""),
                Line::styled(format!("  {text}"), theme::error_style()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("  r ", theme::key_hint_key()),
                    Span::styled("retry", theme::key_hint()),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines), area);
        }
        _ => {
            let table = Table::new(rows, widths.to_vec())
                .header(header)
                .row_highlight_style(theme::table_selected());
            let mut state = chrome.table_state.clone();
            frame.render_stateful_widget(table, area, &mut state);
        }
    }
}

/// Pagination footer with key hints, plus the loading spinner while a
/// request is in flight.
pub fn render_footer<T>(
    frame: &mut Frame,
    area: Rect,
    list: &RemoteList<T>,
    chrome: &ListChrome,
    extra_hints: &[(&'static str, &'static str)],
) {
    let mut spans = Vec::new();

    if list.is_loading() {
        // Spinner occupies the first two columns.
        let throbber = Throbber::default().throbber_style(theme::title_style());
        let spinner_area = Rect {
            width: area.width.min(2),
            ..area
        };
        let mut state = chrome.throbber.clone();
        frame.render_stateful_widget(throbber, spinner_area, &mut state);
        spans.push(Span::raw("  "));
    } else {
        spans.push(Span::raw(" "));
    }

    match list.display_range() {
        Some((first, last)) => spans.push(Span::styled(
            format!(
                "{first}-{last} of {} · page {}/{} ",
                list.count(),
                list.page(),
                list.total_pages()
            ),
            theme::table_row(),
        )),
        None => spans.push(Span::styled("no records ", theme::table_row())),
    }

    let hints = [
        ("/", "search"),
        ("h/l", "page"),
        ("r", "refresh"),
    ];
    for (key, label) in hints.iter().chain(extra_hints) {
        spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
        spans.push(Span::styled(*label, theme::key_hint()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
