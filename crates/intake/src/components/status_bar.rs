use color_eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    components::Component,
    core::state::{SessionState, WorkflowPhase},
    theme::{Theme, UiGroup},
    tui::Frame,
};

/// Bottom bar: workflow phase, key hints for that phase, active palette.
#[derive(Default)]
pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn hints(phase: WorkflowPhase) -> &'static [(&'static str, &'static str)] {
        match phase {
            WorkflowPhase::Idle => &[
                ("Tab/↓", "next"),
                ("S-Tab/↑", "prev"),
                ("Ctrl+S", "confirm"),
                ("Ctrl+T", "theme"),
                ("Ctrl+Q", "quit"),
            ],
            WorkflowPhase::Confirming => &[
                ("Enter", "send"),
                ("Esc", "back"),
                ("Ctrl+T", "theme"),
                ("Ctrl+Q", "quit"),
            ],
            WorkflowPhase::Sending => &[("Ctrl+Q", "quit")],
        }
    }
}

impl Component for StatusBar {
    fn draw(
        &mut self,
        f: &mut Frame<'_>,
        area: Rect,
        state: &SessionState,
        theme: &Theme,
    ) -> Result<()> {
        let bar = theme.style(UiGroup::Statusline);
        let phase = state.phase();

        let mut spans = vec![Span::styled(format!(" {phase} "), theme.style(UiGroup::Button))];
        for (key, what) in Self::hints(phase) {
            spans.push(Span::styled(format!("  {key}"), bar));
            spans.push(Span::styled(format!(" {what}"), bar));
        }

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(8)]).areas(area);
        f.render_widget(Paragraph::new(Line::from(spans)).style(bar), left);
        f.render_widget(
            Paragraph::new(format!("{} ", theme.label()))
                .style(bar)
                .alignment(Alignment::Right),
            right,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::theme::ColorMode;

    fn render(state: &SessionState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        let theme = Theme::new(ColorMode::Ansi16, state.dark_mode);
        terminal
            .draw(|f| StatusBar::new().draw(f, f.area(), state, &theme).unwrap())
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_phase_and_palette() {
        let idle = render(&SessionState::default());
        assert!(idle.contains("Idle"));
        assert!(idle.contains("Ctrl+S confirm"));
        assert!(idle.contains("light"));

        let sending = render(&SessionState {
            confirmation_visible: true,
            submitting: true,
            dark_mode: true,
            ..SessionState::default()
        });
        assert!(sending.contains("Sending"));
        assert!(!sending.contains("send"));
        assert!(sending.contains("dark"));
    }
}
