/*!
Effect & task model.

The reducer never performs I/O. It returns a list of `Effect`s which the
event loop (or the headless runner) interprets:

- `Effect::Notify` shows a notification,
- `Effect::Async(TaskKind)` is handed to the `TaskExecutor`,
- `Effect::Log` is written to the log at the level it carries.

Task completion comes back as `Action::TaskFinished(id, TaskResultKind)`.
*/

use std::fmt;

use tracing::{Level, debug, info, warn};

use crate::core::executor::TaskId;
use crate::domain::{FieldId, FieldRecord};
use crate::notify::Notification;

/// Declarative instruction emitted by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notification),
    /// Schedule / spawn an asynchronous task (background work).
    Async(TaskKind),
    /// Lightweight side-effect: write one log line.
    Log(LogLine),
}

impl Effect {
    pub fn log(line: LogLine) -> Self {
        Effect::Log(line)
    }

    pub fn async_task(kind: TaskKind) -> Self {
        Effect::Async(kind)
    }

    pub fn notify(notification: Notification) -> Self {
        Effect::Notify(notification)
    }
}

/// A log line with its level and the structured fields the workflow knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub message: String,
    pub task: Option<TaskId>,
    pub field: Option<FieldId>,
}

impl LogLine {
    fn at(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            task: None,
            field: None,
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::at(Level::DEBUG, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::at(Level::INFO, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::at(Level::WARN, message)
    }

    pub fn task(mut self, id: TaskId) -> Self {
        self.task = Some(id);
        self
    }

    pub fn field(mut self, field: FieldId) -> Self {
        self.field = Some(field);
        self
    }

    pub fn emit(&self) {
        let field: Option<&'static str> = self.field.map(Into::into);
        let task = self.task;
        let message = &self.message;
        // Levels order from ERROR (lowest) to TRACE (highest).
        if self.level <= Level::WARN {
            warn!(task, field, "{message}");
        } else if self.level >= Level::DEBUG {
            debug!(task, field, "{message}");
        } else {
            info!(task, field, "{message}");
        }
    }
}

/// Asynchronous work units. Each variant carries everything the executor
/// needs; the submission timestamp is taken by the executor at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Submit(FieldRecord),
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Submit(_) => f.write_str("Submit"),
        }
    }
}

/// Results produced by the TaskExecutor for completion callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResultKind {
    Submitted,
    SubmitFailed { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldId;

    #[test]
    fn construct_log_effect() {
        let e = Effect::log(LogLine::warn("hello").task(3).field(FieldId::Role));
        match e {
            Effect::Log(line) => {
                assert_eq!(line.level, Level::WARN);
                assert_eq!(line.message, "hello");
                assert_eq!(line.task, Some(3));
                assert_eq!(line.field, Some(FieldId::Role));
            }
            _ => panic!("expected Log variant"),
        }
    }

    #[test]
    fn submit_task_display_keeps_field_values_out() {
        let record = FieldRecord::default().set_field(FieldId::Email, "jane@co.com");
        let label = TaskKind::Submit(record).to_string();
        assert_eq!(label, "Submit");
    }
}
