//! `intake submit`: the same confirm/send workflow without a terminal UI.
//!
//! The record goes through the reducer exactly like keyboard input would:
//! Confirm (validation), the review summary is printed, then Send and the
//! task completion. Notifications are printed instead of shown as toasts.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use color_eyre::{Result, eyre::eyre};
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    action::Action,
    core::{
        effects::Effect, executor::TaskExecutor, reducer::reduce, state::SessionState,
    },
    domain::{FieldId, FieldRecord, SubmissionPayload, ValidationOutcome, validate},
    notify::Notification,
    services::Collaborator,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessOutcome {
    Invalid { field: FieldId, message: &'static str },
    DryRun,
    Submitted,
    Failed,
}

impl HeadlessOutcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            HeadlessOutcome::Submitted | HeadlessOutcome::DryRun => ExitCode::SUCCESS,
            HeadlessOutcome::Invalid { .. } => ExitCode::from(2),
            HeadlessOutcome::Failed => ExitCode::FAILURE,
        }
    }
}

pub async fn submit_headless<C: Collaborator>(
    record: FieldRecord,
    collaborator: Arc<C>,
    dry_run: bool,
    out: &mut impl Write,
) -> Result<HeadlessOutcome> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let executor = TaskExecutor::new(collaborator, action_tx);
    let mut state = SessionState {
        record,
        ..SessionState::default()
    };

    let effects = reduce(&mut state, Action::Confirm);
    apply(effects, &executor, out)?;
    if !state.confirmation_visible {
        let ValidationOutcome::Invalid { field, message } = validate(&state.record) else {
            return Err(eyre!("review did not open for a valid record"));
        };
        info!(%field, "headless submission rejected by validation");
        return Ok(HeadlessOutcome::Invalid { field, message });
    }

    write_summary(&state.record, out)?;

    if dry_run {
        let payload = SubmissionPayload::stamped_now(&state.record);
        writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
        return Ok(HeadlessOutcome::DryRun);
    }

    let effects = reduce(&mut state, Action::Send);
    apply(effects, &executor, out)?;
    writeln!(out, "Sending...")?;

    let finished = action_rx
        .recv()
        .await
        .ok_or_else(|| eyre!("task executor stopped before the submission finished"))?;
    let effects = reduce(&mut state, finished);
    apply(effects, &executor, out)?;

    Ok(if state.record.is_empty() && !state.confirmation_visible {
        HeadlessOutcome::Submitted
    } else {
        HeadlessOutcome::Failed
    })
}

fn write_summary(record: &FieldRecord, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Confirm Your Details")?;
    for field in FieldId::all() {
        writeln!(out, "  {:<12}{}", format!("{}:", field.summary_label()), record.get(field))?;
    }
    Ok(())
}

fn apply(effects: Vec<Effect>, executor: &TaskExecutor, out: &mut impl Write) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::Notify(n) => write_notification(&n, out)?,
            Effect::Async(task) => {
                executor.spawn(task);
            }
            Effect::Log(line) => line.emit(),
        }
    }
    Ok(())
}

fn write_notification(n: &Notification, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}: {}", n.title, n.description)?;
    Ok(())
}
