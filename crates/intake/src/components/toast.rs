use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    action::Action,
    components::Component,
    core::state::SessionState,
    notify::{Notification, NotificationSlot, Severity},
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

const WIDTH: u16 = 44;

/// Top-right toast showing the single visible notification.
pub struct Toast {
    slot: NotificationSlot,
}

impl Toast {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: NotificationSlot::new(ttl),
        }
    }

    pub fn show(&mut self, notification: Notification) {
        self.slot.show(notification, Instant::now());
    }

    /// Drop the notification once its time is up. Returns whether it changed.
    pub fn expire(&mut self) -> bool {
        self.slot.expire(Instant::now())
    }

    pub fn visible(&self) -> Option<&Notification> {
        self.slot.visible()
    }

    fn area(area: Rect, notification: &Notification) -> Rect {
        let width = WIDTH.min(area.width);
        let inner_width = width.saturating_sub(2).max(1) as usize;
        let lines = notification.description.chars().count().div_ceil(inner_width).max(1) as u16;
        let height = (lines + 3).min(area.height);
        Rect {
            x: area.x + area.width - width,
            y: area.y,
            width,
            height,
        }
    }
}

impl Component for Toast {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &SessionState,
    ) -> Result<Option<EventResponse<Action>>> {
        // Esc closes the toast unless the review overlay wants it
        if key.code == KeyCode::Esc && !state.confirmation_visible && self.slot.visible().is_some() {
            self.slot.dismiss();
        }
        Ok(None)
    }

    fn draw(
        &mut self,
        f: &mut Frame<'_>,
        area: Rect,
        _state: &SessionState,
        theme: &Theme,
    ) -> Result<()> {
        let Some(notification) = self.slot.visible() else {
            return Ok(());
        };
        let accent = match notification.severity {
            Severity::Default => UiGroup::Success,
            Severity::Destructive => UiGroup::Error,
        };
        let rect = Self::area(area, notification);
        f.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(symbols::border::ROUNDED)
            .border_style(theme.style(accent))
            .title(Span::styled(format!(" {} ", notification.title), theme.style(accent)))
            .style(theme.style(UiGroup::Base));
        f.render_widget(
            Paragraph::new(Line::from(notification.description.as_str()))
                .block(block)
                .wrap(Wrap { trim: true }),
            rect,
        );
        Ok(())
    }
}
