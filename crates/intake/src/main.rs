use std::process::ExitCode;
use std::sync::Arc;

use app::AppBuilder;
use clap::Parser;
use color_eyre::Result;
use tracing::info;

use intake::{
    cli::{Cli, Cmd},
    config::Config,
    core::app::IntakeApp,
    headless,
    services::HttpCollaborator,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    intake::errors::init()?;

    // the log mirror on stderr would tear the terminal UI
    let ctx = AppBuilder::<IntakeApp>::new(env!("CARGO_PKG_VERSION"))?
        .console_log(cli.is_headless())
        .build_simple()?;
    let config = Config::load(&ctx.paths().config_dir, &cli)?;
    info!(
        version = ctx.version(),
        endpoint = %config.endpoint,
        "{} starting",
        ctx.app_id()
    );

    let collaborator = Arc::new(HttpCollaborator::new(config.endpoint.clone())?);

    match cli.cmd {
        Some(Cmd::Submit(args)) => {
            let mut stdout = std::io::stdout().lock();
            let outcome =
                headless::submit_headless(args.record(), collaborator, args.dry_run, &mut stdout)
                    .await?;
            Ok(outcome.exit_code())
        }
        Some(Cmd::Run) | None => {
            IntakeApp::new(config).run(collaborator).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
