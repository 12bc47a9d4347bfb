use std::sync::Arc;

use app::Application;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tracing::{debug, warn};

use crate::{
    action::Action,
    components::{
        Component, form::FormComponent, popups::review::ReviewPopup, status_bar::StatusBar,
        toast::Toast,
    },
    config::Config,
    core::{
        effects::Effect,
        executor::TaskExecutor,
        reducer::reduce,
        state::SessionState,
    },
    services::Collaborator,
    theme::Theme,
    tui::{Event, EventResponse},
};

/// The interactive form: session state plus the widgets rendering it.
pub struct IntakeApp {
    pub state: SessionState,
    pub config: Config,
    pub theme: Theme,
    pub form: FormComponent,
    pub review: ReviewPopup,
    pub toast: Toast,
    pub status_bar: StatusBar,
}

impl Application for IntakeApp {
    const APP_ID: &'static str = "intake";
}

impl IntakeApp {
    pub fn new(config: Config) -> Self {
        Self {
            state: SessionState::new(config.dark_mode),
            theme: Theme::from_env(config.dark_mode),
            toast: Toast::new(config.toast_ttl()),
            form: FormComponent::new(),
            review: ReviewPopup::new(),
            status_bar: StatusBar::new(),
            config,
        }
    }

    pub async fn run<C: Collaborator>(&mut self, collaborator: Arc<C>) -> Result<()> {
        crate::core::r#loop::AppLoop::new(self, collaborator)?.run().await
    }

    /// Translate one terminal event into actions.
    ///
    /// Order: global chords, then the review overlay (modal) or the toast
    /// and the form.
    pub fn route_event(&mut self, event: Event) -> Result<Vec<Action>> {
        let response = match event {
            Event::Tick => return Ok(vec![Action::Tick]),
            Event::Render => return Ok(vec![Action::Render]),
            Event::Resize(w, h) => return Ok(vec![Action::Resize(w, h)]),
            Event::Quit => return Ok(vec![Action::Quit]),
            Event::Error => {
                warn!("terminal event stream reported an error");
                return Ok(Vec::new());
            }
            Event::Key(key) => {
                if let Some(action) = global_action(key) {
                    return Ok(vec![action]);
                }
                self.route_to_components(Event::Key(key))?
            }
            ev @ Event::Paste(_) => self.route_to_components(ev)?,
            _ => None,
        };
        Ok(response
            .map(|r| match r {
                EventResponse::Continue(a) | EventResponse::Stop(a) => vec![a],
            })
            .unwrap_or_default())
    }

    fn route_to_components(&mut self, event: Event) -> Result<Option<EventResponse<Action>>> {
        if self.state.confirmation_visible {
            return self.review.handle_events(event, &self.state);
        }
        if let Some(resp) = self.toast.handle_events(event.clone(), &self.state)? {
            return Ok(Some(resp));
        }
        self.form.handle_events(event, &self.state)
    }

    /// Reduce one action and carry out the resulting effects.
    pub fn dispatch(&mut self, action: Action, executor: &TaskExecutor) {
        if action == Action::Tick {
            self.toast.expire();
            return;
        }
        debug!(action = %action, phase = %self.state.phase(), "dispatch");
        for effect in reduce(&mut self.state, action) {
            match effect {
                Effect::Notify(notification) => self.toast.show(notification),
                Effect::Async(task) => {
                    executor.spawn(task);
                }
                Effect::Log(line) => line.emit(),
            }
        }
        self.theme.sync(self.state.dark_mode);
        self.form.sync(&self.state.record);
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let [main, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        self.form.draw(frame, main, &self.state, &self.theme)?;
        if self.state.confirmation_visible {
            self.review.draw(frame, main, &self.state, &self.theme)?;
        }
        self.status_bar.draw(frame, footer, &self.state, &self.theme)?;
        self.toast.draw(frame, main, &self.state, &self.theme)?;
        Ok(())
    }
}

/// Chords that work everywhere, independent of focus.
pub fn global_action(key: KeyEvent) -> Option<Action> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('s') => Some(Action::Confirm),
        _ => None,
    }
}
