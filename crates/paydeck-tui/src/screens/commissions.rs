//! Commissions screen — accrued commission review and payout.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Clear, Paragraph, Row};
use ratatui::layout::Flex;
use ratatui::widgets::{Block, BorderType, Borders};
use uuid::Uuid;

use paydeck_core::{Applied, Commission, CommissionStatus, FailureKind, LoadPhase, RemoteList};

use crate::action::{Action, Notification, Payload};
use crate::component::Component;
use crate::fetch::Fetcher;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::list_frame::{self, ChromeEvent, ListChrome};
use crate::widgets::money::fmt_money;
use crate::widgets::sub_tabs;

const PAGE_SIZE: u32 = 20;

const STATUS_TABS: [(&str, Option<&str>); 3] =
    [("All", None), ("Accrued", Some("accrued")), ("Paid", Some("paid"))];

pub struct CommissionsScreen {
    fetcher: Option<Fetcher>,
    list: RemoteList<Commission>,
    chrome: ListChrome,
    status_tab: usize,
    /// Payout awaiting a y/n confirmation.
    confirm_pay: Option<(Uuid, String)>,
    started: bool,
}

impl CommissionsScreen {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            list: RemoteList::new(PAGE_SIZE),
            chrome: ListChrome::new(),
            status_tab: 0,
            confirm_pay: None,
            started: false,
        }
    }

    fn refetch(&mut self) {
        let (ticket, params) = self.list.begin_fetch();
        if let Some(ref fetcher) = self.fetcher {
            fetcher.load_commissions(ticket, params);
        }
    }

    fn cycle_status_tab(&mut self) {
        self.status_tab = (self.status_tab + 1) % STATUS_TABS.len();
        let value = STATUS_TABS[self.status_tab].1.map(ToOwned::to_owned);
        self.list.set_filter("status", value);
        self.chrome.table_state.select(Some(0));
        self.refetch();
    }

    fn request_payout(&mut self) {
        let Some(commission) = self.list.rows().get(self.chrome.selected()) else {
            return;
        };
        if commission.status != CommissionStatus::Accrued {
            return;
        }
        let summary = format!(
            "Pay {} to {}?",
            fmt_money(commission.amount, &commission.currency),
            commission.partner_name.as_deref().unwrap_or("(unknown)")
        );
        self.confirm_pay = Some((commission.uid, summary));
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect, summary: &str) {
        let [popup] = Layout::horizontal([Constraint::Length(54)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(popup);

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Confirm payout ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::styled(format!(" {summary}"), Style::default().fg(theme::FOG)),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", theme::key_hint_key()),
                Span::styled("pay  ", theme::key_hint()),
                Span::styled("n/Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for CommissionsScreen {
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
        if let Some((uid, _)) = self.confirm_pay.clone() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.confirm_pay = None;
                    if let Some(ref fetcher) = self.fetcher {
                        fetcher.pay_commission(uid);
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirm_pay = None;
                }
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
            KeyCode::Char('P') => self.request_payout(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, payload: Payload) -> Result<Option<Action>> {
        match payload {
            Payload::Commissions { ticket, result } => {
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
                    self.refetch();
                    Ok(Some(Action::Notify(Notification::success(message))))
                }
                Err(err) if err.is_auth_expired() => Ok(Some(Action::SessionExpired)),
                Err(err) => Ok(Some(Action::Notify(Notification::error(err.to_string())))),
            },
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let inner =
            list_frame::render_list_block(frame, area, "Commissions", &self.list, &self.chrome);

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
            Cell::from(Span::styled("Partner", theme::table_header())),
            Cell::from(Span::styled("Period", theme::table_header())),
            Cell::from(list_frame::sort_header("Amount", "amount", sort)),
            Cell::from(Span::styled("Status", theme::table_header())),
            Cell::from(list_frame::sort_header("Created", "created_at", sort)),
            Cell::from(Span::styled("Paid", theme::table_header())),
        ]);

        let rows: Vec<Row> = self
            .list
            .rows()
            .iter()
            .map(|c| {
                let status = c.status.to_string();
                let status_style = Style::default().fg(theme::status_color(&status));
                Row::new(vec![
                    Cell::from(c.partner_name.clone().unwrap_or_else(|| "-".into()))
                        .style(Style::default().fg(theme::TEAL)),
                    Cell::from(c.period.clone()).style(theme::table_row()),
                    Cell::from(fmt_money(c.amount, &c.currency))
                        .style(Style::default().fg(theme::AMBER)),
                    Cell::from(status).style(status_style),
                    Cell::from(c.created_at.format("%Y-%m-%d").to_string())
                        .style(theme::table_row()),
                    Cell::from(
                        c.paid_at
                            .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d").to_string()),
                    )
                    .style(theme::table_row()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Fill(2),
            Constraint::Length(9),
            Constraint::Length(18),
            Constraint::Length(9),
            Constraint::Length(12),
            Constraint::Length(12),
        ];
        list_frame::render_table_or_error(
            frame, layout[1], &self.list, &self.chrome, header, &widths, rows,
        );

        list_frame::render_footer(
            frame,
            layout[2],
            &self.list,
            &self.chrome,
            &[("f", "status"), ("c/a", "sort"), ("P", "pay out")],
        );

        if let Some((_, ref summary)) = self.confirm_pay {
            self.render_confirm(frame, area, summary);
        }
    }

    fn wants_text_input(&self) -> bool {
        self.confirm_pay.is_some() || self.chrome.search_active
    }

    fn id(&self) -> ScreenId {
        ScreenId::Commissions
    }
}
