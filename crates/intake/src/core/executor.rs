/*!
Task Executor

Decouples the reducer's declarative `Effect::Async(TaskKind)` outputs from the
concrete side effects (network submission).

- Scheduling requests travel over an unbounded channel to one background
  worker (tokio). Tasks run one after another in arrival order.
- Every task gets a monotonic id; completion is reported back into the event
  loop as `Action::TaskFinished(id, TaskResultKind)`.
- No cancellation and no timeout: a submitted task runs until the
  collaborator answers.
- Pending tasks are dropped when the executor and all its clones are gone.
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::action::Action;
use crate::core::effects::{TaskKind, TaskResultKind};
use crate::domain::SubmissionPayload;
use crate::services::Collaborator;

/// Monotonic task identifier type.
pub type TaskId = u64;

/// Public handle for scheduling background tasks.
///
/// Cloneable & cheap: internally only wraps an `mpsc::UnboundedSender`.
#[derive(Clone)]
pub struct TaskExecutor {
    tx: mpsc::UnboundedSender<Dispatch>,
    next_id: Arc<AtomicU64>,
}

/// Internal dispatch envelope.
struct Dispatch {
    id: TaskId,
    kind: TaskKind,
}

impl TaskExecutor {
    /// Create a new executor and spawn its worker loop.
    ///
    /// Completion actions are sent on `action_tx`. Must be called inside a
    /// tokio runtime.
    pub fn new<C: Collaborator>(
        collaborator: Arc<C>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Dispatch>();
        Worker {
            rx,
            action_tx,
            collaborator,
        }
        .spawn();
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Schedule a new asynchronous task.
    ///
    /// Returns the allocated TaskId (can be used later for correlation).
    pub fn spawn(&self, kind: TaskKind) -> TaskId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        info!(task = id, kind = %kind, "task scheduled");
        if let Err(e) = self.tx.send(Dispatch { id, kind }) {
            warn!("TaskExecutor channel closed; failed to schedule task: {}", e);
        }
        id
    }
}

/// Background worker driving task execution.
struct Worker<C> {
    rx: mpsc::UnboundedReceiver<Dispatch>,
    action_tx: mpsc::UnboundedSender<Action>,
    collaborator: Arc<C>,
}

impl<C: Collaborator> Worker<C> {
    fn spawn(mut self) {
        tokio::spawn(async move {
            while let Some(dispatch) = self.rx.recv().await {
                let id = dispatch.id;
                let result = self.handle(dispatch).await;
                if self.action_tx.send(Action::TaskFinished(id, result)).is_err() {
                    warn!(task = id, "event loop gone; dropping task result");
                }
            }
            // Channel closed: executor is shutting down.
            info!("TaskExecutor worker stopped (channel closed)");
        });
    }

    async fn handle(&self, dispatch: Dispatch) -> TaskResultKind {
        match dispatch.kind {
            TaskKind::Submit(record) => {
                let payload = SubmissionPayload::stamped_now(&record);
                info!(
                    task = dispatch.id,
                    submission_date = %payload.submission_date,
                    "submitting record"
                );
                match self.collaborator.submit(payload).await {
                    Ok(()) => {
                        info!(task = dispatch.id, "submission stored");
                        TaskResultKind::Submitted
                    }
                    Err(e) => {
                        warn!(task = dispatch.id, error = %e, "submission failed");
                        TaskResultKind::SubmitFailed {
                            error: e.to_string(),
                        }
                    }
                }
            }
        }
    }
}

/// In-memory collaborator for workflow tests.
#[cfg(test)]
pub(crate) mod fake {
    use std::future::Future;
    use std::sync::Mutex;

    use reqwest::StatusCode;
    use tokio::sync::Notify;

    use crate::domain::SubmissionPayload;
    use crate::services::{Collaborator, TransportError};

    pub struct FakeCollaborator {
        status: StatusCode,
        gate: Option<Notify>,
        pub received: Mutex<Vec<SubmissionPayload>>,
    }

    impl FakeCollaborator {
        pub fn answering(status: StatusCode) -> Self {
            Self {
                status,
                gate: None,
                received: Mutex::new(Vec::new()),
            }
        }

        /// Hold every answer until `release` is called.
        pub fn gated(mut self) -> Self {
            self.gate = Some(Notify::new());
            self
        }

        pub fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.notify_one();
            }
        }

        pub fn received(&self) -> Vec<SubmissionPayload> {
            self.received.lock().unwrap().clone()
        }
    }

    impl Collaborator for FakeCollaborator {
        fn submit(
            &self,
            payload: SubmissionPayload,
        ) -> impl Future<Output = Result<(), TransportError>> + Send {
            self.received.lock().unwrap().push(payload);
            async move {
                if let Some(gate) = &self.gate {
                    gate.notified().await;
                }
                if self.status.is_success() {
                    Ok(())
                } else {
                    Err(TransportError::Status(self.status))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeCollaborator;
    use super::*;
    use crate::core::reducer::reduce;
    use crate::core::state::SessionState;
    use crate::core::effects::Effect;
    use crate::domain::FieldRecord;
    use crate::notify::Notification;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    fn jane() -> FieldRecord {
        FieldRecord {
            name: "Jane Doe".into(),
            mobile: "9876543210".into(),
            email: "jane@co.com".into(),
            department: "Eng".into(),
            role: "SWE".into(),
            address: "1 Rd".into(),
        }
    }

    fn run_effects(effects: Vec<Effect>, executor: &TaskExecutor) -> Vec<Notification> {
        let mut shown = Vec::new();
        for effect in effects {
            match effect {
                Effect::Async(kind) => {
                    executor.spawn(kind);
                }
                Effect::Notify(n) => shown.push(n),
                Effect::Log(_) => {}
            }
        }
        shown
    }

    async fn confirm_and_send(
        collaborator: Arc<FakeCollaborator>,
    ) -> (SessionState, TaskExecutor, mpsc::UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let executor = TaskExecutor::new(collaborator, action_tx);
        let mut state = SessionState {
            record: jane(),
            ..SessionState::default()
        };
        reduce(&mut state, Action::Confirm);
        let effects = reduce(&mut state, Action::Send);
        run_effects(effects, &executor);
        (state, executor, action_rx)
    }

    #[tokio::test]
    async fn accepted_submission_resets_the_form() {
        let collaborator = Arc::new(FakeCollaborator::answering(StatusCode::OK));
        let (mut state, executor, mut rx) = confirm_and_send(collaborator.clone()).await;

        let finished = rx.recv().await.unwrap();
        assert!(matches!(
            finished,
            Action::TaskFinished(_, TaskResultKind::Submitted)
        ));
        let shown = run_effects(reduce(&mut state, finished), &executor);

        assert_eq!(shown, vec![Notification::submitted()]);
        assert!(state.record.is_empty());
        assert!(!state.confirmation_visible);
        assert!(!state.submitting);

        let received = collaborator.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].mobile, "9876543210");
        assert!(received[0].submission_date.ends_with('Z'));
    }

    #[tokio::test]
    async fn rejected_submission_keeps_review_open() {
        let collaborator = Arc::new(FakeCollaborator::answering(
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
        let (mut state, executor, mut rx) = confirm_and_send(collaborator).await;

        let finished = rx.recv().await.unwrap();
        let shown = run_effects(reduce(&mut state, finished), &executor);

        assert_eq!(shown, vec![Notification::submit_failed()]);
        assert!(state.confirmation_visible);
        assert!(!state.submitting);
        assert_eq!(state.record, jane());
    }

    #[tokio::test]
    async fn sends_during_flight_never_reach_the_collaborator() {
        let collaborator = Arc::new(FakeCollaborator::answering(StatusCode::OK).gated());
        let (mut state, executor, mut rx) = confirm_and_send(collaborator.clone()).await;

        for _ in 0..3 {
            let effects = reduce(&mut state, Action::Send);
            run_effects(effects, &executor);
        }
        collaborator.release();

        let finished = rx.recv().await.unwrap();
        reduce(&mut state, finished);
        assert!(rx.try_recv().is_err());
        assert_eq!(collaborator.received().len(), 1);
    }

    #[tokio::test]
    async fn task_ids_are_monotonic() {
        let (action_tx, _rx) = mpsc::unbounded_channel();
        let executor = TaskExecutor::new(
            Arc::new(FakeCollaborator::answering(StatusCode::OK)),
            action_tx,
        );
        let a = executor.spawn(TaskKind::Submit(jane()));
        let b = executor.spawn(TaskKind::Submit(jane()));
        assert!(a > 0);
        assert_eq!(b, a + 1);
    }
}
