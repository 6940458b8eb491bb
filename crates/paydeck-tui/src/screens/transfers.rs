//! Transfers screen — read-only settlement history.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row};

use paydeck_core::{Applied, FailureKind, LoadPhase, RemoteList, Transfer};

use crate::action::{Action, Payload};
use crate::component::Component;
use crate::fetch::Fetcher;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::list_frame::{self, ChromeEvent, ListChrome};
use crate::widgets::money::fmt_money;
use crate::widgets::sub_tabs;

const PAGE_SIZE: u32 = 20;

const STATUS_TABS: [(&str, Option<&str>); 4] = [
    ("All", None),
    ("Pending", Some("pending")),
    ("Completed", Some("completed")),
    ("Failed", Some("failed")),
];

pub struct TransfersScreen {
    fetcher: Option<Fetcher>,
    list: RemoteList<Transfer>,
    chrome: ListChrome,
    status_tab: usize,
    started: bool,
}

impl TransfersScreen {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            list: RemoteList::new(PAGE_SIZE),
            chrome: ListChrome::new(),
            status_tab: 0,
            started: false,
        }
    }

    fn refetch(&mut self) {
        let (ticket, params) = self.list.begin_fetch();
        if let Some(ref fetcher) = self.fetcher {
            fetcher.load_transfers(ticket, params);
        }
    }

    fn cycle_status_tab(&mut self) {
        self.status_tab = (self.status_tab + 1) % STATUS_TABS.len();
        let value = STATUS_TABS[self.status_tab].1.map(ToOwned::to_owned);
        self.list.set_filter("status", value);
        self.chrome.table_state.select(Some(0));
        self.refetch();
    }
}

impl Component for TransfersScreen {
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
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, payload: Payload) -> Result<Option<Action>> {
        if let Payload::Transfers { ticket, result } = payload {
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
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let inner =
            list_frame::render_list_block(frame, area, "Transfers", &self.list, &self.chrome);

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let labels: Vec<&str> = STATUS_TABS.iter().map(|(label, _)| *label).collect();
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&labels, self.status_tab)),
            layout[0],
        );

        let sort = self.list.sort();
        let header = Row::new(vec![
            Cell::from(Span::styled("Reference", theme::table_header())),
            Cell::from(Span::styled("Partner", theme::table_header())),
            Cell::from(list_frame::sort_header("Amount", "amount", sort)),
            Cell::from(Span::styled("Direction", theme::table_header())),
            Cell::from(Span::styled("Status", theme::table_header())),
            Cell::from(list_frame::sort_header("Created", "created_at", sort)),
        ]);

        let rows: Vec<Row> = self
            .list
            .rows()
            .iter()
            .map(|t| {
                let status = t.status.to_string();
                let status_style = Style::default().fg(theme::status_color(&status));
                Row::new(vec![
                    Cell::from(t.reference.clone()).style(Style::default().fg(theme::TEAL)),
                    Cell::from(t.partner_name.clone().unwrap_or_else(|| "-".into()))
                        .style(theme::table_row()),
                    Cell::from(fmt_money(t.amount, &t.currency))
                        .style(Style::default().fg(theme::AMBER)),
                    Cell::from(t.direction.clone()).style(theme::table_row()),
                    Cell::from(status).style(status_style),
                    Cell::from(t.created_at.format("%Y-%m-%d %H:%M").to_string())
                        .style(theme::table_row()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(14),
            Constraint::Fill(2),
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Length(10),
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
            &[("f", "status"), ("c/a", "sort")],
        );
    }

    fn wants_text_input(&self) -> bool {
        self.chrome.search_active
    }

    fn id(&self) -> ScreenId {
        ScreenId::Transfers
    }
}
