use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::{
    action::Action,
    core::state::SessionState,
    theme::Theme,
    tui::{Event, EventResponse, Frame},
};

pub mod form;
pub mod popups;
pub mod status_bar;
pub mod toast;

/// `Component` is a trait that represents a visual and interactive element of the user interface.
///
/// Components never mutate `SessionState`; they translate input into
/// `Action`s and render whatever the state currently says.
pub trait Component {
    fn handle_events(
        &mut self,
        event: Event,
        state: &SessionState,
    ) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event, state)?,
            Event::Paste(text) => self.handle_paste(&text, state)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(
        &mut self,
        _key: KeyEvent,
        _state: &SessionState,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn handle_paste(
        &mut self,
        _text: &str,
        _state: &SessionState,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &SessionState, theme: &Theme)
    -> Result<()>;
}
