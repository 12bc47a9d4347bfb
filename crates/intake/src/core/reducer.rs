//! Reducer: intents -> state transitions + effects.
//!
//! All workflow rules live here:
//!
//! ```text
//! Idle --Confirm(valid)--> Confirming --Send--> Sending --Submitted--> Idle
//!                                         ^                  |
//!                                         +---SubmitFailed---+
//! ```
//!
//! Policy:
//!   - Must be side-effect free. Everything observable is returned as `Effect`.
//!   - Does not panic on unknown / unhandled intents; they are ignored.
//!   - Mutates only `SessionState`.

use crate::action::Action as Intent;
use crate::core::effects::{Effect, LogLine, TaskKind, TaskResultKind};
use crate::core::state::SessionState;
use crate::domain::{FieldRecord, ValidationOutcome, validate};
use crate::notify::Notification;

pub fn reduce(state: &mut SessionState, intent: Intent) -> Vec<Effect> {
    match intent {
        Intent::EditField(field, value) => {
            state.record = state.record.set_field(field, value);
            Vec::new()
        }
        Intent::Confirm => confirm(state),
        Intent::Send => send(state),
        Intent::TaskFinished(id, result) => {
            if !state.submitting {
                return vec![Effect::log(
                    LogLine::debug("completion without a submission in flight; ignored").task(id),
                )];
            }
            match result {
                TaskResultKind::Submitted => {
                    state.record = FieldRecord::reset_record();
                    state.confirmation_visible = false;
                    state.submitting = false;
                    vec![
                        Effect::notify(Notification::submitted()),
                        Effect::log(LogLine::info("submission stored, form reset").task(id)),
                    ]
                }
                TaskResultKind::SubmitFailed { error } => {
                    state.submitting = false;
                    vec![
                        Effect::notify(Notification::submit_failed()),
                        Effect::log(LogLine::warn(format!("submission failed: {error}")).task(id)),
                    ]
                }
            }
        }
        Intent::DismissReview => {
            if state.submitting {
                return vec![Effect::log(LogLine::debug("review stays open while sending"))];
            }
            state.confirmation_visible = false;
            Vec::new()
        }
        Intent::ToggleTheme => {
            state.dark_mode = !state.dark_mode;
            Vec::new()
        }
        Intent::Quit => {
            state.quit_requested = true;
            Vec::new()
        }
        Intent::Error(message) => vec![Effect::notify(Notification::error(message))],
        // Tick / Render / Resize are loop concerns.
        _ => Vec::new(),
    }
}

fn confirm(state: &mut SessionState) -> Vec<Effect> {
    if state.confirmation_visible {
        return Vec::new();
    }
    match validate(&state.record) {
        ValidationOutcome::Valid => {
            state.confirmation_visible = true;
            vec![Effect::log(LogLine::info("record valid, review opened"))]
        }
        ValidationOutcome::Invalid { field, message } => vec![
            Effect::notify(Notification::error(message)),
            Effect::log(LogLine::info("validation failed").field(field)),
        ],
    }
}

fn send(state: &mut SessionState) -> Vec<Effect> {
    if !state.can_send() {
        let reason = if state.submitting {
            "send ignored: submission already in flight"
        } else {
            "send ignored: review is not open"
        };
        return vec![Effect::log(LogLine::debug(reason))];
    }
    state.submitting = true;
    vec![Effect::async_task(TaskKind::Submit(state.record.clone()))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::WorkflowPhase;
    use crate::domain::FieldId;
    use pretty_assertions::assert_eq;

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

    fn session_with(record: FieldRecord) -> SessionState {
        SessionState {
            record,
            ..SessionState::default()
        }
    }

    fn confirming() -> SessionState {
        let mut state = session_with(jane());
        reduce(&mut state, Intent::Confirm);
        state
    }

    fn notifications(effects: &[Effect]) -> Vec<&Notification> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn spawned(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::Async(_)))
            .count()
    }

    #[test]
    fn edit_field_updates_record_only() {
        let mut state = SessionState::default();
        let effects = reduce(&mut state, Intent::EditField(FieldId::Role, "SWE".into()));
        assert!(effects.is_empty());
        assert_eq!(state.record.role, "SWE");
        assert_eq!(state.phase(), WorkflowPhase::Idle);
    }

    #[test]
    fn valid_confirm_opens_review() {
        let state = confirming();
        assert!(state.confirmation_visible);
        assert_eq!(state.phase(), WorkflowPhase::Confirming);
    }

    #[test]
    fn invalid_confirm_notifies_and_stays_idle() {
        for field in FieldId::all() {
            let mut state = session_with(jane().set_field(field, ""));
            let before = state.clone();
            let effects = reduce(&mut state, Intent::Confirm);

            assert_eq!(state, before, "no transition for empty {field}");
            assert_eq!(spawned(&effects), 0);
            let shown = notifications(&effects);
            assert_eq!(shown.len(), 1);
            assert!(shown[0].is_destructive());
            assert_eq!(shown[0].title, "Error");
        }
    }

    #[test]
    fn invalid_mobile_message_reaches_the_user() {
        let mut state = session_with(jane().set_field(FieldId::Mobile, "12345"));
        let effects = reduce(&mut state, Intent::Confirm);
        assert_eq!(
            notifications(&effects)[0].description,
            "Please enter a valid 10-digit mobile number"
        );
    }

    #[test]
    fn send_spawns_exactly_one_submission() {
        let mut state = confirming();
        let effects = reduce(&mut state, Intent::Send);
        assert_eq!(
            effects,
            vec![Effect::Async(TaskKind::Submit(jane()))]
        );
        assert!(state.submitting);
        assert_eq!(state.phase(), WorkflowPhase::Sending);
    }

    #[test]
    fn second_send_while_in_flight_is_rejected() {
        let mut state = confirming();
        reduce(&mut state, Intent::Send);
        let again = reduce(&mut state, Intent::Send);
        assert_eq!(spawned(&again), 0);
        assert!(state.submitting);
    }

    #[test]
    fn send_without_review_does_nothing() {
        let mut state = session_with(jane());
        let effects = reduce(&mut state, Intent::Send);
        assert_eq!(spawned(&effects), 0);
        assert!(!state.submitting);
    }

    fn log_lines(effects: &[Effect]) -> Vec<&LogLine> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Log(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn rejected_sends_log_at_debug() {
        let mut closed = session_with(jane());
        let effects = reduce(&mut closed, Intent::Send);
        assert_eq!(
            log_lines(&effects),
            vec![&LogLine::debug("send ignored: review is not open")]
        );

        let mut sending = confirming();
        reduce(&mut sending, Intent::Send);
        let effects = reduce(&mut sending, Intent::Send);
        assert_eq!(
            log_lines(&effects),
            vec![&LogLine::debug("send ignored: submission already in flight")]
        );
    }

    #[test]
    fn failed_submission_logs_a_warning_with_its_task() {
        let mut state = confirming();
        reduce(&mut state, Intent::Send);
        let effects = reduce(
            &mut state,
            Intent::TaskFinished(
                4,
                TaskResultKind::SubmitFailed {
                    error: "endpoint answered 503".into(),
                },
            ),
        );
        let lines = log_lines(&effects);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, tracing::Level::WARN);
        assert_eq!(lines[0].task, Some(4));
    }

    #[test]
    fn validation_failure_logs_the_field() {
        let mut state = session_with(jane().set_field(FieldId::Email, "nope"));
        let effects = reduce(&mut state, Intent::Confirm);
        assert_eq!(
            log_lines(&effects),
            vec![&LogLine::info("validation failed").field(FieldId::Email)]
        );
    }

    #[test]
    fn success_resets_record_and_closes_review() {
        let mut state = confirming();
        reduce(&mut state, Intent::Send);
        let effects = reduce(&mut state, Intent::TaskFinished(1, TaskResultKind::Submitted));

        assert_eq!(state.record, FieldRecord::reset_record());
        assert!(!state.confirmation_visible);
        assert!(!state.submitting);
        assert_eq!(notifications(&effects), vec![&Notification::submitted()]);
    }

    #[test]
    fn failure_keeps_review_open_for_manual_retry() {
        let mut state = confirming();
        reduce(&mut state, Intent::Send);
        let effects = reduce(
            &mut state,
            Intent::TaskFinished(
                1,
                TaskResultKind::SubmitFailed {
                    error: "endpoint answered 500".into(),
                },
            ),
        );

        assert!(state.confirmation_visible);
        assert!(!state.submitting);
        assert_eq!(state.record, jane());
        assert_eq!(notifications(&effects), vec![&Notification::submit_failed()]);

        let retry = reduce(&mut state, Intent::Send);
        assert_eq!(spawned(&retry), 1);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = confirming();
        let before = state.clone();
        let effects = reduce(&mut state, Intent::TaskFinished(9, TaskResultKind::Submitted));
        assert_eq!(state, before);
        assert!(notifications(&effects).is_empty());
    }

    #[test]
    fn dismiss_closes_review_unless_sending() {
        let mut state = confirming();
        reduce(&mut state, Intent::DismissReview);
        assert_eq!(state.phase(), WorkflowPhase::Idle);

        let mut sending = confirming();
        reduce(&mut sending, Intent::Send);
        reduce(&mut sending, Intent::DismissReview);
        assert!(sending.confirmation_visible);
    }

    #[test]
    fn toggle_theme_flips_only_dark_mode() {
        let mut state = confirming();
        reduce(&mut state, Intent::ToggleTheme);
        assert!(state.dark_mode);
        assert!(state.confirmation_visible);
        reduce(&mut state, Intent::ToggleTheme);
        assert!(!state.dark_mode);
    }

    #[test]
    fn quit_sets_quit_requested() {
        let mut state = SessionState::default();
        reduce(&mut state, Intent::Quit);
        assert!(state.quit_requested);
    }
}
