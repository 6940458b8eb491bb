//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use paydeck_core::Backoffice;

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::fetch::Fetcher;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays on the status bar.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    /// Session-expired popup visibility. Set by any 401-shaped failure;
    /// distinct from the per-screen error panels.
    session_expired: bool,
    notification: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    backoffice: Backoffice,
}

impl App {
    pub fn new(backoffice: Backoffice) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            active_screen: ScreenId::Overview,
            screens,
            running: true,
            session_expired: false,
            notification: None,
            action_tx,
            action_rx,
            backoffice,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for (id, screen) in &mut self.screens {
            let fetcher = Fetcher::new(self.backoffice.clone(), self.action_tx.clone(), *id);
            screen.init(fetcher)?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.on_focus();
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick for spinners
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => self.handle_key(key)?,
                Event::Tick => {
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.tick();
                    }
                    // Expire stale toasts
                    if self
                        .notification
                        .as_ref()
                        .is_some_and(|(_, shown_at)| shown_at.elapsed() > NOTIFICATION_TTL)
                    {
                        self.notification = None;
                    }
                }
                Event::Render => {
                    tui.draw(|frame| self.render(frame))?;
                }
                Event::Resize(_, _) => {}
            }

            // Drain data deliveries from background fetch tasks.
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(action)?;
            }
        }

        tui.exit()?;
        Ok(())
    }

    // ── Key handling ─────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl-C always quits, regardless of focus.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return Ok(());
        }

        if self.session_expired {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.session_expired = false,
                KeyCode::Char('q') => self.running = false,
                _ => {}
            }
            return Ok(());
        }

        // Global keys, unless the active screen is capturing text input.
        if !self.screen_wants_text_input() {
            match key.code {
                KeyCode::Char('q') => {
                    self.running = false;
                    return Ok(());
                }
                KeyCode::Tab => {
                    self.switch_screen(self.active_screen.next());
                    return Ok(());
                }
                KeyCode::BackTab => {
                    self.switch_screen(self.active_screen.prev());
                    return Ok(());
                }
                KeyCode::Char(c @ '1'..='7') => {
                    let idx = usize::from(u8::try_from(c).unwrap_or(b'1') - b'1');
                    if let Some(id) = ScreenId::ALL.get(idx) {
                        self.switch_screen(*id);
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        let action = self
            .screens
            .get_mut(&self.active_screen)
            .and_then(|screen| screen.handle_key_event(key).transpose())
            .transpose()?;
        if let Some(action) = action {
            self.process_action(action)?;
        }
        Ok(())
    }

    fn screen_wants_text_input(&self) -> bool {
        self.screens
            .get(&self.active_screen)
            .is_some_and(|screen| screen.wants_text_input())
    }

    fn switch_screen(&mut self, id: ScreenId) {
        if id == self.active_screen {
            return;
        }
        debug!(from = %self.active_screen, to = %id, "switching screen");
        self.active_screen = id;
        if let Some(screen) = self.screens.get_mut(&id) {
            screen.on_focus();
        }
    }

    // ── Action dispatch ──────────────────────────────────────────────

    fn process_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchScreen(id) => self.switch_screen(id),
            Action::SessionExpired => self.session_expired = true,
            Action::DismissSessionPopup => self.session_expired = false,
            Action::Notify(notification) => {
                self.notification = Some((notification, Instant::now()));
            }
            Action::Deliver { screen, payload } => {
                // Deliveries route to the screen that requested them, even
                // if the user has navigated elsewhere meanwhile.
                let follow_up = self
                    .screens
                    .get_mut(&screen)
                    .and_then(|s| s.update(payload).transpose())
                    .transpose()?;
                if let Some(follow_up) = follow_up {
                    self.process_action(follow_up)?;
                }
            }
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(1), // tab bar
            Constraint::Min(1),    // active screen
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

        self.render_tabs(frame, layout[0]);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[1]);
        }

        self.render_status_bar(frame, layout[2]);

        if self.session_expired {
            Self::render_session_popup(frame, frame.area());
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .enumerate()
            .map(|(idx, id)| Line::from(format!(" {} {id} ", idx + 1)))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active_screen.index())
            .style(theme::tab_inactive())
            .highlight_style(theme::tab_active())
            .divider("·");
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some((ref notification, _)) = self.notification {
            let color = match notification.level {
                NotificationLevel::Success => theme::GREEN,
                NotificationLevel::Warning => theme::AMBER,
                NotificationLevel::Error => theme::RED,
                NotificationLevel::Info => theme::FOG,
            };
            Line::styled(format!(" {}", notification.message), Style::default().fg(color))
        } else {
            Line::from(vec![
                Span::styled(" q ", theme::key_hint_key()),
                Span::styled("quit ", theme::key_hint()),
                Span::styled(" Tab ", theme::key_hint_key()),
                Span::styled("next screen ", theme::key_hint()),
                Span::styled(" 1-7 ", theme::key_hint_key()),
                Span::styled("jump", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_session_popup(frame: &mut Frame, area: Rect) {
        let [popup] = Layout::horizontal([Constraint::Length(52)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(6)])
            .flex(Flex::Center)
            .areas(popup);

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Session expired ")
            .title_style(theme::error_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::RED));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::from(""),
            Line::styled(
                " The API token was rejected. Issue a fresh token",
                Style::default().fg(theme::FOG),
            ),
            Line::styled(
                " and store it with `paydeck config set-token`.",
                Style::default().fg(theme::FOG),
            ),
            Line::from(vec![
                Span::styled(" Esc ", theme::key_hint_key()),
                Span::styled("dismiss  ", theme::key_hint()),
                Span::styled("q ", theme::key_hint_key()),
                Span::styled("quit", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
