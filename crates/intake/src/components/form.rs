use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_input::{Input, InputRequest};

use crate::{
    action::Action,
    components::Component,
    core::state::SessionState,
    domain::{FieldId, FieldRecord},
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

const TITLE: &str = "User Registration Form";
const SUBTITLE: &str = "Please fill in your details below";
const CONFIRM_LABEL: &str = "[ Confirm Details ]";
const MAX_WIDTH: u16 = 72;

/// The six labelled single-line inputs.
///
/// The widget keeps its own editing buffers (cursor, scroll) and reports
/// every change as `Action::EditField`; `sync` pulls the record back in after
/// the reducer replaced it (e.g. the reset after a successful submission).
pub struct FormComponent {
    inputs: Vec<(FieldId, Input)>,
    focus: usize,
}

impl Default for FormComponent {
    fn default() -> Self {
        Self {
            inputs: FieldId::all().map(|f| (f, Input::default())).collect(),
            focus: 0,
        }
    }
}

impl FormComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_field(&self) -> FieldId {
        self.inputs[self.focus].0
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
    }

    fn on_last_field(&self) -> bool {
        self.focus + 1 == self.inputs.len()
    }

    /// Adopt values the reducer changed behind the editor's back.
    pub fn sync(&mut self, record: &FieldRecord) {
        let mut changed = false;
        for (field, input) in self.inputs.iter_mut() {
            let value = record.get(*field);
            if input.value() != value {
                *input = Input::new(value.to_string());
                changed = true;
            }
        }
        if changed && record.is_empty() {
            self.focus = 0;
        }
    }

    fn edit(&mut self, request: InputRequest) -> Option<Action> {
        let (field, input) = &mut self.inputs[self.focus];
        if let (InputRequest::InsertChar(_), Some(max)) = (&request, field.max_len()) {
            if input.value().chars().count() >= max {
                return None;
            }
        }
        // cursor-only moves are not edits
        input
            .handle(request)
            .filter(|changed| changed.value)
            .map(|_| Action::EditField(*field, input.value().to_string()))
    }

    fn draw_field(
        f: &mut Frame<'_>,
        area: Rect,
        field: FieldId,
        input: &Input,
        focused: bool,
        show_cursor: bool,
        theme: &Theme,
    ) {
        let (border, label) = if focused {
            (UiGroup::FocusedLabel, UiGroup::FocusedLabel)
        } else {
            (UiGroup::Border, UiGroup::Label)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(symbols::border::ROUNDED)
            .border_style(theme.style(border))
            .title(Span::styled(format!(" {} ", field.label()), theme.style(label)))
            .style(theme.style(UiGroup::Base));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let width = inner.width.max(1) as usize;
        let scroll = input.visual_scroll(width.saturating_sub(1));
        let content = if input.value().is_empty() && !focused {
            Paragraph::new(field.placeholder()).style(theme.style(UiGroup::Placeholder))
        } else {
            Paragraph::new(input.value())
                .style(theme.style(UiGroup::Input))
                .scroll((0, scroll as u16))
        };
        f.render_widget(content, inner);

        if focused && show_cursor {
            let offset = input.visual_cursor().saturating_sub(scroll) as u16;
            f.set_cursor_position((inner.x + offset.min(inner.width.saturating_sub(1)), inner.y));
        }
    }
}

/// Map a key press to a line-editing request.
pub fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let request = match key.code {
        KeyCode::Char(c) if !ctrl && !alt => InputRequest::InsertChar(c),
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('k') if ctrl => InputRequest::DeleteTillEnd,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Backspace if ctrl || alt => InputRequest::DeletePrevWord,
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left if ctrl || alt => InputRequest::GoToPrevWord,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right if ctrl || alt => InputRequest::GoToNextWord,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(request)
}

impl Component for FormComponent {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &SessionState,
    ) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                Ok(None)
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                Ok(None)
            }
            KeyCode::Enter if self.on_last_field() => {
                Ok(Some(EventResponse::Stop(Action::Confirm)))
            }
            KeyCode::Enter => {
                self.focus_next();
                Ok(None)
            }
            _ => Ok(input_request(key)
                .and_then(|req| self.edit(req))
                .map(EventResponse::Stop)),
        }
    }

    fn handle_paste(
        &mut self,
        text: &str,
        _state: &SessionState,
    ) -> Result<Option<EventResponse<Action>>> {
        let last = text
            .chars()
            .filter(|c| !c.is_control())
            .filter_map(|c| self.edit(InputRequest::InsertChar(c)))
            .last();
        Ok(last.map(EventResponse::Stop))
    }

    fn draw(
        &mut self,
        f: &mut Frame<'_>,
        area: Rect,
        state: &SessionState,
        theme: &Theme,
    ) -> Result<()> {
        f.render_widget(Block::default().style(theme.style(UiGroup::Base)), area);

        let width = area.width.min(MAX_WIDTH);
        let column = Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        };

        let mut constraints = vec![Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)];
        constraints.extend(self.inputs.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(column);

        f.render_widget(
            Paragraph::new(TITLE)
                .style(theme.style(UiGroup::Title))
                .alignment(Alignment::Center),
            rows[0],
        );
        f.render_widget(
            Paragraph::new(SUBTITLE)
                .style(theme.style(UiGroup::Dimmed))
                .alignment(Alignment::Center),
            rows[1],
        );

        let show_cursor = !state.confirmation_visible;
        for (i, (field, input)) in self.inputs.iter().enumerate() {
            Self::draw_field(f, rows[3 + i], *field, input, i == self.focus, show_cursor, theme);
        }

        let button = rows[3 + self.inputs.len() + 1];
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(CONFIRM_LABEL, theme.style(UiGroup::Button))))
                .alignment(Alignment::Center),
            button,
        );
        Ok(())
    }
}
