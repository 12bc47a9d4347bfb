use strum::Display;

use crate::core::effects::TaskResultKind;
use crate::core::executor::TaskId;
use crate::domain::FieldId;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Error(String),
    /// Replace the value of one field (emitted on every keystroke).
    EditField(FieldId, String),
    /// Validate and open the review overlay.
    Confirm,
    /// Submit the reviewed record.
    Send,
    /// Close the review overlay without sending.
    DismissReview,
    ToggleTheme,
    /// Completion callback of a background task.
    TaskFinished(TaskId, TaskResultKind),
}
