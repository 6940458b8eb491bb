//! Centered single-line text prompt for mutation inputs
//! (operator notes, revocation reasons, external ids).

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::theme;

/// What a key press did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Enter with a non-empty value.
    Submitted(String),
    /// Esc, or Enter on an empty value.
    Cancelled,
    /// The prompt swallowed the key.
    Consumed,
}

/// Modal one-line input. Inactive most of the time; a screen opens it
/// with a title and routes keys here while it is active.
#[derive(Debug, Default)]
pub struct TextPrompt {
    title: String,
    input: Input,
    active: bool,
}

impl TextPrompt {
    pub fn open(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.input = Input::default();
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        match key.code {
            KeyCode::Esc => {
                self.active = false;
                PromptOutcome::Cancelled
            }
            KeyCode::Enter => {
                self.active = false;
                let value = self.input.value().trim().to_owned();
                if value.is_empty() {
                    PromptOutcome::Cancelled
                } else {
                    PromptOutcome::Submitted(value)
                }
            }
            _ => {
                self.input.handle_event(&crossterm::event::Event::Key(key));
                PromptOutcome::Consumed
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let [popup] = Layout::horizontal([Constraint::Length(60)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(popup);

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        // Keep the tail visible when the value overflows the popup.
        let width = usize::from(inner.width.saturating_sub(1));
        let scroll = self.input.visual_scroll(width);
        let visible: String = self.input.value().chars().skip(scroll).collect();
        let text = Line::styled(format!(" {visible}"), Style::default().fg(theme::FOG));
        frame.render_widget(Paragraph::new(text), inner);
    }
}
