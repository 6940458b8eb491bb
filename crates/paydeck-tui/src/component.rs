//! Component trait — the building block for every screen.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::{Action, Payload};
use crate::fetch::Fetcher;
use crate::screen::ScreenId;

/// Every screen implements Component.
///
/// Lifecycle: `init` → (`handle_key_event` | `update` | `tick` | `render`)*,
/// with `on_focus` fired each time the screen becomes active.
pub trait Component: Send {
    /// Called once when the screen is mounted. Receives the fetcher used
    /// to spawn background requests for this screen.
    fn init(&mut self, fetcher: Fetcher) -> Result<()>;

    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a data delivery addressed to this screen.
    fn update(&mut self, _payload: Payload) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Periodic tick for spinner animation.
    fn tick(&mut self) {}

    /// The screen became active. Typically triggers the initial fetch.
    fn on_focus(&mut self) {}

    /// Whether the screen is currently capturing text input (search box,
    /// prompt, dialog). Suppresses global single-key shortcuts.
    fn wants_text_input(&self) -> bool {
        false
    }

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Identity, used for action routing.
    fn id(&self) -> ScreenId;
}
