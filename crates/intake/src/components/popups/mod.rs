//! Modal overlays and their rendering helpers.
//!
//! Intended usage:
//! 1) Draw the form as usual
//! 2) If an overlay is active:
//!    - call `render_backdrop(frame, area, theme)`
//!    - compute a centered rect with `centered_rect_fixed(area, width, height)`
//!    - call `draw_popup_frame(frame, popup_area, "Title", theme)`
//!    - draw the content inside the returned inner area

use ratatui::{
    layout::Rect,
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::theme::{Theme, UiGroup};
use crate::tui::Frame;

pub mod review;

/// Dim the page below an overlay. Terminals have no transparency, so the
/// backdrop is a solid background.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    frame.render_widget(Block::default().style(theme.style(UiGroup::Backdrop)), area);
}

/// Centered rectangle of `width` x `height`, clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    Rect {
        x: area.x.saturating_add(area.width.saturating_sub(w) / 2),
        y: area.y.saturating_add(area.height.saturating_sub(h) / 2),
        width: w,
        height: h,
    }
}

/// Clear `area` and draw a rounded, titled shell. Returns the inner area.
pub fn draw_popup_frame(
    frame: &mut Frame<'_>,
    area: Rect,
    title: impl Into<String>,
    theme: &Theme,
) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.into()))
        .title_style(theme.style(UiGroup::Title))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .border_style(theme.style(UiGroup::Border))
        .style(theme.style(UiGroup::Base));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
