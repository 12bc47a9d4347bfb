use std::panic::PanicHookInfo;
use std::sync::OnceLock;

use color_eyre::{Result, config::PanicHook};
use tracing::error;

static INIT: OnceLock<()> = OnceLock::new();

/// Install the color-eyre report hooks and a panic hook that gives the
/// terminal back before printing anything. Calling it twice is a no-op.
pub fn init() -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(format!(
            "{} {} crashed. The log file in the data directory has the details.",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |info| on_panic(&panic_hook, info)));
    let _ = INIT.set(());
    Ok(())
}

fn on_panic(hook: &PanicHook, info: &PanicHookInfo<'_>) {
    if let Err(e) = crate::tui::restore_if_active() {
        error!("terminal restore failed during panic: {e:?}");
    }

    let report = hook.panic_report(info).to_string();
    error!("panic: {}", strip_ansi_escapes::strip_str(&report));

    // release: short human-panic notice plus a crash dump
    #[cfg(not(debug_assertions))]
    {
        let metadata = human_panic::metadata!();
        let dump = human_panic::handle_dump(&metadata, info);
        if human_panic::print_msg(dump, &metadata).is_err() {
            eprintln!("{report}");
        }
    }

    // debug: full backtrace
    #[cfg(debug_assertions)]
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(info);

    std::process::exit(libc::EXIT_FAILURE);
}
