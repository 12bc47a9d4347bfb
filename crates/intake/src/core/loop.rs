use std::sync::Arc;

use color_eyre::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    action::Action,
    core::{app::IntakeApp, executor::TaskExecutor},
    services::Collaborator,
    tui::Tui,
};

/// The application event loop.
///
/// Owns the terminal and borrows the `IntakeApp` mutably:
/// - terminal events are routed to actions (`IntakeApp::route_event`)
/// - actions are drained from one channel; task completions arrive on the
///   same channel from the `TaskExecutor`
/// - `Render` / `Resize` draw, everything else is dispatched to the reducer
pub struct AppLoop<'a, C: Collaborator> {
    app: &'a mut IntakeApp,
    tui: Tui,
    collaborator: Arc<C>,
}

impl<'a, C: Collaborator> AppLoop<'a, C> {
    pub fn new(app: &'a mut IntakeApp, collaborator: Arc<C>) -> Result<Self> {
        let tui = Tui::new()?
            .tick_rate(app.config.tick_rate)
            .frame_rate(app.config.frame_rate)
            .paste(true);
        Ok(Self {
            app,
            tui,
            collaborator,
        })
    }

    /// Run until the session requests quit.
    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
        let executor = TaskExecutor::new(self.collaborator.clone(), action_tx.clone());

        self.tui.enter()?;
        info!("form session started");

        let mut pending: Vec<Action> = Vec::new();
        loop {
            tokio::select! {
                event = self.tui.next() => {
                    let Some(event) = event else { break };
                    pending.extend(self.app.route_event(event)?);
                }
                Some(action) = action_rx.recv() => pending.push(action),
            }
            while let Ok(action) = action_rx.try_recv() {
                pending.push(action);
            }

            for action in pending.drain(..) {
                match action {
                    Action::Render => self.draw(&action_tx)?,
                    Action::Resize(w, h) => {
                        self.tui.resize(Rect::new(0, 0, w, h))?;
                        self.draw(&action_tx)?;
                    }
                    other => self.app.dispatch(other, &executor),
                }
            }

            if self.app.state.quit_requested {
                if self.app.state.submitting {
                    info!("quitting with a submission still in flight");
                }
                break;
            }
        }

        self.tui.exit()?;
        info!("form session ended");
        Ok(())
    }

    fn draw(&mut self, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let app = &mut *self.app;
        self.tui.draw(|f| {
            if let Err(err) = app.render(f) {
                action_tx
                    .send(Action::Error(format!("Failed to draw: {err:?}")))
                    .ok();
            }
        })?;
        Ok(())
    }
}
