//! Core subsystem of the form.
//!
//!   - `state`    : `SessionState`, the single owned session value
//!   - `reducer`  : actions -> state transitions + effects
//!   - `effects`  : declarative `Effect` / `TaskKind` model
//!   - `executor` : background task scheduler (runs `TaskKind` asynchronously)
//!   - `app`      : `IntakeApp`, widgets + event routing
//!   - `loop`     : terminal event loop driving `IntakeApp`
pub mod app;
pub mod effects;
pub mod executor;
pub mod r#loop;
pub mod reducer;
pub mod state;
