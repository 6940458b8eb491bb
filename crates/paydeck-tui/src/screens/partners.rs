//! Partners screen — search, active filter, and activation toggling.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row};
use uuid::Uuid;

use paydeck_core::{Applied, FailureKind, LoadPhase, Partner, RemoteList};

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

const ACTIVE_TABS: [(&str, Option<&str>); 3] =
    [("All", None), ("Active", Some("true")), ("Inactive", Some("false"))];

pub struct PartnersScreen {
    fetcher: Option<Fetcher>,
    list: RemoteList<Partner>,
    chrome: ListChrome,
    active_tab: usize,
    prompt: TextPrompt,
    /// Toggle target: (partner uid, new is_active value).
    pending_toggle: Option<(Uuid, bool)>,
    started: bool,
}

impl PartnersScreen {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            list: RemoteList::new(PAGE_SIZE),
            chrome: ListChrome::new(),
            active_tab: 0,
            prompt: TextPrompt::default(),
            pending_toggle: None,
            started: false,
        }
    }

    fn refetch(&mut self) {
        let (ticket, params) = self.list.begin_fetch();
        if let Some(ref fetcher) = self.fetcher {
            fetcher.load_partners(ticket, params);
        }
    }

    fn cycle_active_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % ACTIVE_TABS.len();
        let value = ACTIVE_TABS[self.active_tab].1.map(ToOwned::to_owned);
        self.list.set_filter("is_active", value);
        self.chrome.table_state.select(Some(0));
        self.refetch();
    }

    fn open_toggle_prompt(&mut self) {
        let Some(partner) = self.list.rows().get(self.chrome.selected()) else {
            return;
        };
        let target = !partner.is_active;
        self.pending_toggle = Some((partner.uid, target));
        let verb = if target { "Activation" } else { "Deactivation" };
        self.prompt.open(format!("{verb} notes for {}", partner.name));
    }
}

impl Component for PartnersScreen {
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
                    if let (Some(fetcher), Some((uid, is_active))) =
                        (&self.fetcher, self.pending_toggle.take())
                    {
                        fetcher.set_partner_active(uid, is_active, notes);
                    }
                }
                PromptOutcome::Cancelled => {
                    self.pending_toggle = None;
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
            KeyCode::Char('f') => self.cycle_active_tab(),
            KeyCode::Char('c') => {
                self.list.toggle_sort("created_at");
                self.refetch();
            }
            KeyCode::Char('b') => {
                self.list.toggle_sort("balance");
                self.refetch();
            }
            KeyCode::Char('t') => self.open_toggle_prompt(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, payload: Payload) -> Result<Option<Action>> {
        match payload {
            Payload::Partners { ticket, result } => {
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
            list_frame::render_list_block(frame, area, "Partners", &self.list, &self.chrome);

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let labels: Vec<&str> = ACTIVE_TABS.iter().map(|(label, _)| *label).collect();
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&labels, self.active_tab)),
            layout[0],
        );

        let sort = self.list.sort();
        let header = Row::new(vec![
            Cell::from(Span::styled("Name", theme::table_header())),
            Cell::from(Span::styled("Email", theme::table_header())),
            Cell::from(Span::styled("Active", theme::table_header())),
            Cell::from(list_frame::sort_header("Balance", "balance", sort)),
            Cell::from(list_frame::sort_header("Created", "created_at", sort)),
        ]);

        let rows: Vec<Row> = self
            .list
            .rows()
            .iter()
            .map(|p| {
                let (active_label, active_color) = if p.is_active {
                    ("active", theme::GREEN)
                } else {
                    ("inactive", theme::RED)
                };
                Row::new(vec![
                    Cell::from(p.name.clone()).style(Style::default().fg(theme::TEAL)),
                    Cell::from(p.email.clone()).style(theme::table_row()),
                    Cell::from(active_label).style(Style::default().fg(active_color)),
                    Cell::from(fmt_money(p.balance, &p.currency))
                        .style(Style::default().fg(theme::AMBER)),
                    Cell::from(p.created_at.format("%Y-%m-%d").to_string())
                        .style(theme::table_row()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Length(8),
            Constraint::Length(18),
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
            &[("f", "filter"), ("c/b", "sort"), ("t", "toggle active")],
        );

        self.prompt.render(frame, area);
    }

    fn wants_text_input(&self) -> bool {
        self.prompt.is_active() || self.chrome.search_active
    }

    fn id(&self) -> ScreenId {
        ScreenId::Partners
    }
}
