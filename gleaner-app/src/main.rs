use clap::Parser;
use gleaner_app::cli::Cli;
use gleaner_app::console::Console;
use gleaner_app::{load_config, log_config};
use gleaner_common::observability::init_logging;
use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1) Config: file, then environment overlay
    let cfg = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {e:#}");
            return ExitCode::from(2);
        }
    };

    // 2) Logging
    if let Err(e) = init_logging(log_config(&cfg.log, cli.verbose)) {
        eprintln!("warning: file logging disabled: {e:#}");
    }

    // 3) Run
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    match gleaner_app::run(cli.command, &cfg, &mut console).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: "gleaner", error = %format!("{e:#}"), "run aborted");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
