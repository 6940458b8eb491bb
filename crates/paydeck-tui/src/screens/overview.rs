//! Overview screen — back-office counters and transaction breakdown.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use paydeck_core::{DashboardStats, TransactionStats};

use crate::action::{Action, Payload};
use crate::component::Component;
use crate::fetch::Fetcher;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::money::fmt_money;

/// Load phase for the two stats endpoints (no pagination involved).
enum OverviewState {
    Idle,
    Loading,
    Loaded(Box<(DashboardStats, TransactionStats)>),
    Failed(String),
}

pub struct OverviewScreen {
    fetcher: Option<Fetcher>,
    state: OverviewState,
}

impl OverviewScreen {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            state: OverviewState::Idle,
        }
    }

    fn refetch(&mut self) {
        self.state = OverviewState::Loading;
        if let Some(ref fetcher) = self.fetcher {
            fetcher.load_overview();
        }
    }

    fn render_tile(frame: &mut Frame, area: Rect, label: &str, value: &str) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(""),
            Line::styled(format!("  {value}"), theme::stat_value()),
            Line::styled(format!("  {label}"), theme::stat_label()),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_loaded(
        frame: &mut Frame,
        area: Rect,
        dashboard: &DashboardStats,
        tx_stats: &TransactionStats,
    ) {
        let rows = Layout::vertical([
            Constraint::Length(5), // tile row 1
            Constraint::Length(5), // tile row 2
            Constraint::Min(1),    // status breakdown
        ])
        .split(area);

        let top = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);
        Self::render_tile(
            frame,
            top[0],
            "transactions today",
            &dashboard.transactions_today.to_string(),
        );
        Self::render_tile(
            frame,
            top[1],
            "volume today",
            &fmt_money(dashboard.volume_today, &dashboard.currency),
        );
        Self::render_tile(
            frame,
            top[2],
            "active partners",
            &dashboard.active_partners.to_string(),
        );

        let bottom = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);
        Self::render_tile(
            frame,
            bottom[0],
            "pending cancellations",
            &dashboard.pending_cancellations.to_string(),
        );
        Self::render_tile(
            frame,
            bottom[1],
            "pending device requests",
            &dashboard.pending_device_authorizations.to_string(),
        );
        Self::render_tile(
            frame,
            bottom[2],
            "unpaid commissions",
            &fmt_money(dashboard.unpaid_commissions_total, &dashboard.currency),
        );

        // Transaction status breakdown
        let block = Block::default()
            .title(format!(
                " Transactions all time ({}) · {} ",
                tx_stats.total,
                fmt_money(tx_stats.volume, &tx_stats.currency)
            ))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(rows[2]);
        frame.render_widget(block, rows[2]);

        let mut statuses: Vec<(&String, &u64)> = tx_stats.by_status.iter().collect();
        statuses.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let mut lines = vec![Line::from("")];
        for (status, count) in statuses {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {status:<26}"),
                    Style::default().fg(theme::status_color(status)),
                ),
                Span::styled(count.to_string(), Style::default().fg(theme::FOG)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for OverviewScreen {
    fn init(&mut self, fetcher: Fetcher) -> Result<()> {
        self.fetcher = Some(fetcher);
        Ok(())
    }

    fn on_focus(&mut self) {
        if matches!(self.state, OverviewState::Idle) {
            self.refetch();
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('r') {
            self.refetch();
        }
        Ok(None)
    }

    fn update(&mut self, payload: Payload) -> Result<Option<Action>> {
        if let Payload::Overview { result } = payload {
            match result {
                Ok(stats) => self.state = OverviewState::Loaded(Box::new(stats)),
                Err(err) if err.is_auth_expired() => {
                    self.state = OverviewState::Failed(err.to_string());
                    return Ok(Some(Action::SessionExpired));
                }
                Err(err) => self.state = OverviewState::Failed(err.to_string()),
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Overview ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.state {
            OverviewState::Loaded(stats) => {
                let (dashboard, tx_stats) = stats.as_ref();
                Self::render_loaded(frame, inner, dashboard, tx_stats);
            }
            OverviewState::Failed(message) => {
                let lines = vec![
                    Line::from(""),
                    Line::styled(format!("  {message}"), theme::error_style()),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("  r ", theme::key_hint_key()),
                        Span::styled("retry", theme::key_hint()),
                    ]),
                ];
                frame.render_widget(Paragraph::new(lines), inner);
            }
            OverviewState::Idle | OverviewState::Loading => {
                frame.render_widget(
                    Paragraph::new(Line::styled("  loading…", theme::stat_label())),
                    inner,
                );
            }
        }
    }

    fn id(&self) -> ScreenId {
        ScreenId::Overview
    }
}
