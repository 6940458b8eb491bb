//! Transactions screen — paginated table with status sub-tabs, sortable
//! columns, a detail panel, and cancellation decisions.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row};
use uuid::Uuid;

use paydeck_core::{
    Applied, FailureKind, LoadPhase, RemoteList, Transaction, TransactionStatus,
};

use crate::action::{Action, Notification, Payload};
use crate::component::Component;
use crate::fetch::Fetcher;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::list_frame::{self, ChromeEvent, ListChrome};
use crate::widgets::money::fmt_money;
use crate::widgets::prompt::{PromptOutcome, TextPrompt};
use crate::widgets::sub_tabs;

const PAGE_SIZE: u32 = 20;

/// Status filter tabs; `None` means no filter.
const STATUS_TABS: [(&str, Option<&str>); 6] = [
    ("All", None),
    ("Pending", Some("pending")),
    ("Cancel requests", Some("cancellation_requested")),
    ("Completed", Some("completed")),
    ("Failed", Some("failed")),
    ("Cancelled", Some("cancelled")),
];

/// Which mutation the open prompt will feed.
enum PendingDecision {
    Approve(Uuid),
    Reject(Uuid),
}

pub struct TransactionsScreen {
    fetcher: Option<Fetcher>,
    list: RemoteList<Transaction>,
    chrome: ListChrome,
    status_tab: usize,
    prompt: TextPrompt,
    pending: Option<PendingDecision>,
    detail_open: bool,
    started: bool,
}

impl TransactionsScreen {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            list: RemoteList::new(PAGE_SIZE),
            chrome: ListChrome::new(),
            status_tab: 0,
            prompt: TextPrompt::default(),
            pending: None,
            detail_open: false,
            started: false,
        }
    }

    fn refetch(&mut self) {
        let (ticket, params) = self.list.begin_fetch();
        if let Some(ref fetcher) = self.fetcher {
            fetcher.load_transactions(ticket, params);
        }
    }

    fn cycle_status_tab(&mut self) {
        self.status_tab = (self.status_tab + 1) % STATUS_TABS.len();
        let value = STATUS_TABS[self.status_tab].1.map(ToOwned::to_owned);
        self.list.set_filter("status", value);
        self.chrome.table_state.select(Some(0));
        self.refetch();
    }

    fn selected_transaction(&self) -> Option<&Transaction> {
        self.list.rows().get(self.chrome.selected())
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, tx: &Transaction) {
        let title = format!(" {} · {} ", tx.reference, tx.status);
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = |text: &str| Span::styled(format!("  {text:<14}"), theme::stat_label());
        let value = |text: String| Span::styled(text, Style::default().fg(theme::FOG));

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                label("Amount"),
                Span::styled(fmt_money(tx.amount, &tx.currency), theme::stat_value()),
                label("    Type"),
                value(tx.transaction_type.clone()),
            ]),
            Line::from(vec![
                label("Partner"),
                value(tx.partner_name.clone().unwrap_or_else(|| "-".into())),
                label("    Platform"),
                value(tx.platform_name.clone().unwrap_or_else(|| "-".into())),
            ]),
            Line::from(vec![
                label("Created"),
                value(tx.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
                label("    Updated"),
                value(tx.updated_at.map_or_else(
                    || "-".into(),
                    |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
                )),
            ]),
        ];
        if let Some(ref reason) = tx.cancellation_reason {
            lines.push(Line::from(vec![
                label("Cancel reason"),
                Span::styled(reason.clone(), Style::default().fg(theme::AMBER)),
            ]));
        }
        if let Some(ref notes) = tx.admin_notes {
            lines.push(Line::from(vec![label("Admin notes"), value(notes.clone())]));
        }
        lines.push(Line::from(""));
        if tx.status == TransactionStatus::CancellationRequested {
            lines.push(Line::from(vec![
                Span::styled("  A ", theme::key_hint_key()),
                Span::styled("approve cancellation  ", theme::key_hint()),
                Span::styled("X ", theme::key_hint_key()),
                Span::styled("reject cancellation  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("back", theme::key_hint()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("  Esc ", theme::key_hint_key()),
                Span::styled("back", theme::key_hint()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Open the notes prompt for a cancellation decision on the selected
    /// row, if it is actually awaiting one.
    fn open_decision_prompt(&mut self, approve: bool) {
        let Some(tx) = self.selected_transaction() else {
            return;
        };
        if tx.status != TransactionStatus::CancellationRequested {
            return;
        }
        let uid = tx.uid;
        if approve {
            self.pending = Some(PendingDecision::Approve(uid));
            self.prompt.open("Approval notes");
        } else {
            self.pending = Some(PendingDecision::Reject(uid));
            self.prompt.open("Rejection notes");
        }
    }
}

impl Component for TransactionsScreen {
    fn init(&mut self, fetcher: Fetcher) -> Result<()> {
        self.fetcher = Some(fetcher);
        Ok(())
    }

    fn on_focus(&mut self) {
        if !self.started {
            self.started = true;
            self.refetch();
        }
    }

    fn tick(&mut self) {
        self.chrome.tick();
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.prompt.is_active() {
            match self.prompt.handle_key(key) {
                PromptOutcome::Submitted(notes) => {
                    if let (Some(fetcher), Some(pending)) = (&self.fetcher, self.pending.take()) {
                        match pending {
                            PendingDecision::Approve(uid) => {
                                fetcher.approve_cancellation(uid, notes);
                            }
                            PendingDecision::Reject(uid) => {
                                fetcher.reject_cancellation(uid, notes);
                            }
                        }
                    }
                }
                PromptOutcome::Cancelled => {
                    self.pending = None;
                }
                PromptOutcome::Consumed => {}
            }
            return Ok(None);
        }

        if self.detail_open {
            match key.code {
                KeyCode::Esc => {
                    self.detail_open = false;
                }
                KeyCode::Char('A') => self.open_decision_prompt(true),
                KeyCode::Char('X') => self.open_decision_prompt(false),
                _ => {}
            }
            return Ok(None);
        }

        match self.chrome.handle_key(key, &mut self.list) {
            ChromeEvent::QueryChanged => {
                self.refetch();
                return Ok(None);
            }
            ChromeEvent::Consumed => return Ok(None),
            ChromeEvent::NotHandled => {}
        }

        match key.code {
            KeyCode::Char('f') => self.cycle_status_tab(),
            KeyCode::Char('c') => {
                self.list.toggle_sort("created_at");
                self.refetch();
            }
            KeyCode::Char('a') => {
                self.list.toggle_sort("amount");
                self.refetch();
            }
            KeyCode::Enter => {
                if self.selected_transaction().is_some() {
                    self.detail_open = true;
                }
            }
            KeyCode::Char('A') => self.open_decision_prompt(true),
            KeyCode::Char('X') => self.open_decision_prompt(false),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, payload: Payload) -> Result<Option<Action>> {
        match payload {
            Payload::Transactions { ticket, result } => {
                if self.list.apply(ticket, result) == Applied::CommittedPastEnd {
                    self.list.clamp_to_last_page();
                    self.refetch();
                }
                self.chrome.clamp_selection(self.list.rows().len());
                if matches!(
                    self.list.phase(),
                    LoadPhase::Failed {
                        kind: FailureKind::AuthExpired,
                        ..
                    }
                ) {
                    return Ok(Some(Action::SessionExpired));
                }
                Ok(None)
            }
            Payload::Mutation { result } => match result {
                Ok(message) => {
                    self.detail_open = false;
                    self.refetch();
                    Ok(Some(Action::Notify(Notification::success(message))))
                }
                Err(err) if err.is_auth_expired() => Ok(Some(Action::SessionExpired)),
                Err(err) => Ok(Some(Action::Notify(Notification::error(err.to_string())))),
            },
            _ => Ok(None),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let inner = list_frame::render_list_block(frame, area, "Transactions", &self.list, &self.chrome);

        let (list_area, detail_area) = if self.detail_open {
            let chunks =
                Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(inner);
            (chunks[0], Some(chunks[1]))
        } else {
            (inner, None)
        };

        let layout = Layout::vertical([
            Constraint::Length(1), // status sub-tabs
            Constraint::Min(1),    // table
            Constraint::Length(1), // footer
        ])
        .split(list_area);

        let labels: Vec<&str> = STATUS_TABS.iter().map(|(label, _)| *label).collect();
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&labels, self.status_tab)),
            layout[0],
        );

        let sort = self.list.sort();
        let header = Row::new(vec![
            Cell::from(Span::styled("Reference", theme::table_header())),
            Cell::from(list_frame::sort_header("Amount", "amount", sort)),
            Cell::from(Span::styled("Status", theme::table_header())),
            Cell::from(Span::styled("Type", theme::table_header())),
            Cell::from(Span::styled("Partner", theme::table_header())),
            Cell::from(list_frame::sort_header("Created", "created_at", sort)),
        ]);

        let rows: Vec<Row> = self
            .list
            .rows()
            .iter()
            .map(|tx| {
                let status = tx.status.to_string();
                let status_style = Style::default().fg(theme::status_color(&status));
                Row::new(vec![
                    Cell::from(tx.reference.clone()).style(theme::table_row()),
                    Cell::from(fmt_money(tx.amount, &tx.currency))
                        .style(Style::default().fg(theme::AMBER)),
                    Cell::from(status).style(status_style),
                    Cell::from(tx.transaction_type.clone()).style(theme::table_row()),
                    Cell::from(tx.partner_name.clone().unwrap_or_else(|| "-".into()))
                        .style(theme::table_row()),
                    Cell::from(tx.created_at.format("%Y-%m-%d %H:%M").to_string())
                        .style(theme::table_row()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(14),
            Constraint::Length(16),
            Constraint::Length(22),
            Constraint::Length(10),
            Constraint::Fill(2),
            Constraint::Length(16),
        ];
        list_frame::render_table_or_error(
            frame, layout[1], &self.list, &self.chrome, header, &widths, rows,
        );

        list_frame::render_footer(
            frame,
            layout[2],
            &self.list,
            &self.chrome,
            &[
                ("f", "status"),
                ("c/a", "sort"),
                ("Enter", "detail"),
                ("A/X", "decide"),
            ],
        );

        if let (Some(detail_area), Some(tx)) = (detail_area, self.selected_transaction()) {
            self.render_detail(frame, detail_area, tx);
        }

        self.prompt.render(frame, area);
    }

    fn wants_text_input(&self) -> bool {
        self.prompt.is_active() || self.chrome.search_active
    }

    fn id(&self) -> ScreenId {
        ScreenId::Transactions
    }
}
