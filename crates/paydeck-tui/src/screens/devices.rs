//! Devices screen — payment-terminal authorization queue.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row};
use uuid::Uuid;

use paydeck_core::{
    Applied, DeviceAuthStatus, DeviceAuthorization, FailureKind, LoadPhase, RemoteList,
};

use crate::action::{Action, Notification, Payload};
use crate::component::Component;
use crate::fetch::Fetcher;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::list_frame::{self, ChromeEvent, ListChrome};
use crate::widgets::prompt::{PromptOutcome, TextPrompt};
use crate::widgets::sub_tabs;

const PAGE_SIZE: u32 = 20;

const STATUS_TABS: [(&str, Option<&str>); 4] = [
    ("All", None),
    ("Pending", Some("pending")),
    ("Approved", Some("approved")),
    ("Revoked", Some("revoked")),
];

pub struct DevicesScreen {
    fetcher: Option<Fetcher>,
    list: RemoteList<DeviceAuthorization>,
    chrome: ListChrome,
    status_tab: usize,
    prompt: TextPrompt,
    pending_revoke: Option<Uuid>,
    started: bool,
}

impl DevicesScreen {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            list: RemoteList::new(PAGE_SIZE),
            chrome: ListChrome::new(),
            status_tab: 0,
            prompt: TextPrompt::default(),
            pending_revoke: None,
            started: false,
        }
    }

    fn refetch(&mut self) {
        let (ticket, params) = self.list.begin_fetch();
        if let Some(ref fetcher) = self.fetcher {
            fetcher.load_devices(ticket, params);
        }
    }

    fn cycle_status_tab(&mut self) {
        self.status_tab = (self.status_tab + 1) % STATUS_TABS.len();
        let value = STATUS_TABS[self.status_tab].1.map(ToOwned::to_owned);
        self.list.set_filter("status", value);
        self.chrome.table_state.select(Some(0));
        self.refetch();
    }

    fn approve_selected(&mut self) {
        let Some(device) = self.list.rows().get(self.chrome.selected()) else {
            return;
        };
        if device.status != DeviceAuthStatus::Pending {
            return;
        }
        if let Some(ref fetcher) = self.fetcher {
            fetcher.approve_device(device.uid, None);
        }
    }

    fn open_revoke_prompt(&mut self) {
        let Some(device) = self.list.rows().get(self.chrome.selected()) else {
            return;
        };
        if device.status == DeviceAuthStatus::Revoked {
            return;
        }
        self.pending_revoke = Some(device.uid);
        self.prompt
            .open(format!("Revocation reason for {}", device.serial_number));
    }
}

impl Component for DevicesScreen {
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
                PromptOutcome::Submitted(reason) => {
                    if let (Some(fetcher), Some(uid)) = (&self.fetcher, self.pending_revoke.take())
                    {
                        fetcher.revoke_device(uid, reason);
                    }
                }
                PromptOutcome::Cancelled => {
                    self.pending_revoke = None;
                }
                PromptOutcome::Consumed => {}
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
                self.list.toggle_sort("requested_at");
                self.refetch();
            }
            KeyCode::Char('A') => self.approve_selected(),
            KeyCode::Char('X') => self.open_revoke_prompt(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, payload: Payload) -> Result<Option<Action>> {
        match payload {
            Payload::Devices { ticket, result } => {
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
            list_frame::render_list_block(frame, area, "Devices", &self.list, &self.chrome);

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
            Cell::from(Span::styled("Serial", theme::table_header())),
            Cell::from(Span::styled("Label", theme::table_header())),
            Cell::from(Span::styled("Partner", theme::table_header())),
            Cell::from(Span::styled("Status", theme::table_header())),
            Cell::from(list_frame::sort_header("Requested", "requested_at", sort)),
            Cell::from(Span::styled("Decided by", theme::table_header())),
        ]);

        let rows: Vec<Row> = self
            .list
            .rows()
            .iter()
            .map(|d| {
                let status = d.status.to_string();
                let status_style = Style::default().fg(theme::status_color(&status));
                Row::new(vec![
                    Cell::from(d.serial_number.clone()).style(Style::default().fg(theme::TEAL)),
                    Cell::from(d.label.clone().unwrap_or_else(|| "-".into()))
                        .style(theme::table_row()),
                    Cell::from(d.partner_name.clone().unwrap_or_else(|| "-".into()))
                        .style(theme::table_row()),
                    Cell::from(status).style(status_style),
                    Cell::from(d.requested_at.format("%Y-%m-%d %H:%M").to_string())
                        .style(theme::table_row()),
                    Cell::from(d.decided_by.clone().unwrap_or_else(|| "-".into()))
                        .style(theme::table_row()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(14),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(16),
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
            &[("f", "status"), ("A", "approve"), ("X", "revoke")],
        );

        self.prompt.render(frame, area);
    }

    fn wants_text_input(&self) -> bool {
        self.prompt.is_active() || self.chrome.search_active
    }

    fn id(&self) -> ScreenId {
        ScreenId::Devices
    }
}
