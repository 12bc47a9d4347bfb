use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{centered_rect_fixed, draw_popup_frame, render_backdrop};
use crate::{
    action::Action,
    components::Component,
    core::state::SessionState,
    domain::FieldId,
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

const TITLE: &str = "Confirm Your Details";
const DESCRIPTION: &str = "Please review your information before submitting";

/// Modal summary of the pending record.
///
/// - Enter: send (ignored while a submission is in flight)
/// - Esc: back to the form (ignored while a submission is in flight)
///
/// Every other key is swallowed so the form below stays untouched.
pub struct ReviewPopup {
    width: u16,
}

impl Default for ReviewPopup {
    fn default() -> Self {
        Self { width: 64 }
    }
}

impl ReviewPopup {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows<'a>(state: &'a SessionState, theme: &Theme, width: u16) -> Vec<Line<'a>> {
        FieldId::all()
            .map(|field| {
                let label = format!("{}:", field.summary_label());
                let value = state.record.get(field);
                let pad = (width as usize).saturating_sub(label.chars().count() + value.chars().count());
                Line::from(vec![
                    Span::styled(label, theme.style(UiGroup::Title)),
                    Span::styled(" ".repeat(pad.max(1)), theme.style(UiGroup::Base)),
                    Span::styled(value, theme.style(UiGroup::Dimmed)),
                ])
            })
            .collect()
    }

    fn button(state: &SessionState, theme: &Theme) -> Line<'static> {
        let (label, group) = if state.submitting {
            ("[ Sending... ]", UiGroup::ButtonDisabled)
        } else {
            ("[ Send ]", UiGroup::Button)
        };
        Line::from(Span::styled(label, theme.style(group))).alignment(Alignment::Center)
    }
}

impl Component for ReviewPopup {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &SessionState,
    ) -> Result<Option<EventResponse<Action>>> {
        if state.submitting {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter => Some(Action::Send),
            KeyCode::Esc => Some(Action::DismissReview),
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn draw(
        &mut self,
        f: &mut Frame<'_>,
        area: Rect,
        state: &SessionState,
        theme: &Theme,
    ) -> Result<()> {
        if area.width < 10 || area.height < 8 {
            return Ok(());
        }
        render_backdrop(f, area, theme);

        // description, blank, 6 rows, blank, button, blank, hints + border
        let dialog = centered_rect_fixed(area, self.width, 15);
        let inner = draw_popup_frame(f, dialog, TITLE, theme);
        let inner = Rect {
            x: inner.x.saturating_add(1),
            width: inner.width.saturating_sub(2),
            ..inner
        };

        let [desc, _, rows, _, button, _, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        f.render_widget(
            Paragraph::new(DESCRIPTION)
                .style(theme.style(UiGroup::Dimmed))
                .alignment(Alignment::Center),
            desc,
        );
        f.render_widget(
            Paragraph::new(Self::rows(state, theme, rows.width)).wrap(Wrap { trim: false }),
            rows,
        );
        f.render_widget(Paragraph::new(Self::button(state, theme)), button);

        let hint = if state.submitting {
            Line::from(Span::styled("waiting for the endpoint", theme.style(UiGroup::Dimmed)))
        } else {
            Line::from(vec![
                Span::styled("Enter", theme.style(UiGroup::Title)),
                Span::styled(": Send   ", theme.style(UiGroup::Dimmed)),
                Span::styled("Esc", theme.style(UiGroup::Title)),
                Span::styled(": Back", theme.style(UiGroup::Dimmed)),
            ])
        };
        f.render_widget(Paragraph::new(hint.alignment(Alignment::Center)), hints);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::domain::FieldRecord;
    use crate::theme::ColorMode;

    fn reviewing(submitting: bool) -> SessionState {
        SessionState {
            record: FieldRecord {
                name: "Jane Doe".into(),
                mobile: "9876543210".into(),
                email: "jane@co.com".into(),
                department: "Eng".into(),
                role: "SWE".into(),
                address: "1 Rd".into(),
            },
            confirmation_visible: true,
            submitting,
            ..SessionState::default()
        }
    }

    fn render(state: &SessionState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let theme = Theme::new(ColorMode::Ansi16, false);
        terminal
            .draw(|f| ReviewPopup::new().draw(f, f.area(), state, &theme).unwrap())
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn press(code: KeyCode, state: &SessionState) -> Option<EventResponse<Action>> {
        ReviewPopup::new()
            .handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), state)
            .unwrap()
    }

    #[test]
    fn lists_every_field_with_summary_labels() {
        let screen = render(&reviewing(false));
        assert!(screen.contains(TITLE));
        for (label, value) in [
            ("Name:", "Jane Doe"),
            ("Mobile:", "9876543210"),
            ("Email:", "jane@co.com"),
            ("Department:", "Eng"),
            ("Role:", "SWE"),
            ("Address:", "1 Rd"),
        ] {
            assert!(screen.contains(label), "missing {label}");
            assert!(screen.contains(value), "missing {value}");
        }
        assert!(screen.contains("[ Send ]"));
    }

    #[test]
    fn button_reads_sending_while_in_flight() {
        let screen = render(&reviewing(true));
        assert!(screen.contains("[ Sending... ]"));
        assert!(!screen.contains("[ Send ]"));
    }

    #[test]
    fn enter_sends_and_esc_dismisses() {
        let state = reviewing(false);
        assert_eq!(
            press(KeyCode::Enter, &state),
            Some(EventResponse::Stop(Action::Send))
        );
        assert_eq!(
            press(KeyCode::Esc, &state),
            Some(EventResponse::Stop(Action::DismissReview))
        );
    }

    #[test]
    fn keys_are_inert_while_sending() {
        let state = reviewing(true);
        assert_eq!(press(KeyCode::Enter, &state), None);
        assert_eq!(press(KeyCode::Esc, &state), None);
    }
}
