//! Platforms screen — activation toggling and aggregator mapping via the
//! picker dialog.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row};
use uuid::Uuid;

use paydeck_core::{
    Aggregator, Applied, FailureKind, LoadPhase, Picker, Platform, RemoteList,
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

const ACTIVE_TABS: [(&str, Option<&str>); 3] =
    [("All", None), ("Active", Some("true")), ("Inactive", Some("false"))];

/// What the shared text prompt is collecting.
enum PendingInput {
    ToggleNotes { uid: Uuid, is_active: bool },
    ExternalId { platform: Uuid, aggregator: Uuid },
}

pub struct PlatformsScreen {
    fetcher: Option<Fetcher>,
    list: RemoteList<Platform>,
    chrome: ListChrome,
    active_tab: usize,
    prompt: TextPrompt,
    pending: Option<PendingInput>,
    /// Aggregator picker dialog state, present while the dialog is open.
    picker: Option<Picker<Aggregator>>,
    picker_filter: String,
    /// Platform the picker was opened for.
    picker_platform: Option<Uuid>,
    picker_loading: bool,
    started: bool,
}

impl PlatformsScreen {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            list: RemoteList::new(PAGE_SIZE),
            chrome: ListChrome::new(),
            active_tab: 0,
            prompt: TextPrompt::default(),
            pending: None,
            picker: None,
            picker_filter: String::new(),
            picker_platform: None,
            picker_loading: false,
            started: false,
        }
    }

    fn refetch(&mut self) {
        let (ticket, params) = self.list.begin_fetch();
        if let Some(ref fetcher) = self.fetcher {
            fetcher.load_platforms(ticket, params);
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
        let Some(platform) = self.list.rows().get(self.chrome.selected()) else {
            return;
        };
        let target = !platform.is_active;
        self.pending = Some(PendingInput::ToggleNotes {
            uid: platform.uid,
            is_active: target,
        });
        let verb = if target { "Activation" } else { "Deactivation" };
        self.prompt.open(format!("{verb} notes for {}", platform.name));
    }

    fn open_picker(&mut self) {
        let Some(platform) = self.list.rows().get(self.chrome.selected()) else {
            return;
        };
        self.picker_platform = Some(platform.uid);
        self.picker_loading = true;
        if let Some(ref fetcher) = self.fetcher {
            fetcher.load_aggregator_picker();
        }
    }

    fn close_picker(&mut self) {
        self.picker = None;
        self.picker_filter.clear();
        self.picker_platform = None;
        self.picker_loading = false;
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_picker(),
            KeyCode::Up => {
                if let Some(picker) = self.picker.as_mut() {
                    picker.move_selection(-1);
                }
            }
            KeyCode::Down => {
                if let Some(picker) = self.picker.as_mut() {
                    picker.move_selection(1);
                }
            }
            KeyCode::Enter => {
                let choice = self
                    .picker
                    .as_ref()
                    .and_then(|p| p.selected().map(|a| (a.uid, a.name.clone())));
                if let (Some((aggregator, name)), Some(platform)) =
                    (choice, self.picker_platform)
                {
                    self.pending = Some(PendingInput::ExternalId {
                        platform,
                        aggregator,
                    });
                    self.prompt.open(format!("External id on {name}"));
                    self.close_picker();
                }
            }
            KeyCode::Backspace => {
                self.picker_filter.pop();
                let filter = self.picker_filter.clone();
                if let Some(picker) = self.picker.as_mut() {
                    picker.set_filter(filter);
                }
            }
            KeyCode::Char(c) => {
                self.picker_filter.push(c);
                let filter = self.picker_filter.clone();
                if let Some(picker) = self.picker.as_mut() {
                    picker.set_filter(filter);
                }
            }
            _ => {}
        }
    }

    fn render_picker(&self, frame: &mut Frame, area: Rect, picker: &Picker<Aggregator>) {
        let [popup] = Layout::horizontal([Constraint::Length(52)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(14)])
            .flex(Flex::Center)
            .areas(popup);

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Pick aggregator ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let layout = Layout::vertical([
            Constraint::Length(1), // filter line
            Constraint::Min(1),    // candidates
            Constraint::Length(1), // hints
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" filter: ", theme::stat_label()),
                Span::styled(self.picker_filter.clone(), Style::default().fg(theme::FOG)),
            ])),
            layout[0],
        );

        let selected = picker.selected_index();
        let lines: Vec<Line> = picker
            .filtered()
            .iter()
            .enumerate()
            .map(|(idx, agg)| {
                let marker = if idx == selected { "▸ " } else { "  " };
                let style = if idx == selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                };
                Line::styled(format!("{marker}{} ({})", agg.name, agg.code), style)
            })
            .collect();
        let body = if lines.is_empty() {
            Paragraph::new(Line::styled("  no match", theme::stat_label()))
        } else {
            Paragraph::new(lines)
        };
        frame.render_widget(body, layout[1]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" type ", theme::key_hint_key()),
                Span::styled("filter  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("pick  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("close", theme::key_hint()),
            ])),
            layout[2],
        );
    }
}

impl Component for PlatformsScreen {
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
                PromptOutcome::Submitted(value) => {
                    if let (Some(fetcher), Some(pending)) = (&self.fetcher, self.pending.take()) {
                        match pending {
                            PendingInput::ToggleNotes { uid, is_active } => {
                                fetcher.set_platform_active(uid, is_active, value);
                            }
                            PendingInput::ExternalId {
                                platform,
                                aggregator,
                            } => {
                                fetcher.create_platform_mapping(platform, aggregator, value);
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

        if self.picker.is_some() {
            self.handle_picker_key(key);
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
            KeyCode::Char('t') => self.open_toggle_prompt(),
            KeyCode::Char('m') => self.open_picker(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, payload: Payload) -> Result<Option<Action>> {
        match payload {
            Payload::Platforms { ticket, result } => {
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
            Payload::AggregatorPicker { result } => {
                self.picker_loading = false;
                match result {
                    Ok(picker) => {
                        // Only open if the user hasn't cancelled meanwhile.
                        if self.picker_platform.is_some() {
                            self.picker = Some(picker);
                        }
                        Ok(None)
                    }
                    Err(err) if err.is_auth_expired() => {
                        self.picker_platform = None;
                        Ok(Some(Action::SessionExpired))
                    }
                    Err(err) => {
                        self.picker_platform = None;
                        Ok(Some(Action::Notify(Notification::error(err.to_string()))))
                    }
                }
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
            list_frame::render_list_block(frame, area, "Platforms", &self.list, &self.chrome);

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
            Cell::from(Span::styled("Code", theme::table_header())),
            Cell::from(Span::styled("Partner", theme::table_header())),
            Cell::from(Span::styled("Active", theme::table_header())),
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
                    Cell::from(p.code.clone()).style(theme::table_row()),
                    Cell::from(p.partner_name.clone().unwrap_or_else(|| "-".into()))
                        .style(theme::table_row()),
                    Cell::from(active_label).style(Style::default().fg(active_color)),
                    Cell::from(p.created_at.format("%Y-%m-%d").to_string())
                        .style(theme::table_row()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Fill(2),
            Constraint::Length(12),
            Constraint::Fill(2),
            Constraint::Length(8),
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
            &[("f", "filter"), ("t", "toggle"), ("m", "map aggregator")],
        );

        if let Some(ref picker) = self.picker {
            self.render_picker(frame, area, picker);
        }
        self.prompt.render(frame, area);
    }

    fn wants_text_input(&self) -> bool {
        self.prompt.is_active() || self.picker.is_some() || self.chrome.search_active
    }

    fn id(&self) -> ScreenId {
        ScreenId::Platforms
    }
}
