mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use edgectl_core::{Console, FileSessionStore};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Offline commands: no controller, no session
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Schema(args) => commands::schema::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "edgectl", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(&cli.global, &cfg);
            let console_config = config::resolve_console_config(&cfg, &profile_name, &cli.global)?;

            // One session file per profile, shared by every client and run.
            let session = Arc::new(FileSessionStore::new(config::session_path(&profile_name)));
            let console = Console::new(console_config, session, None)?;

            tracing::debug!(command = ?cmd, profile = %profile_name, "dispatching command");
            match cmd {
                Command::Login(args) => {
                    commands::session::login(&console, &cfg, &profile_name, args, &cli.global).await
                }
                Command::Logout => {
                    commands::session::logout(&console, &cli.global);
                    Ok(())
                }
                Command::Status => {
                    commands::session::status(&console, &profile_name, &cli.global);
                    Ok(())
                }
                cmd => commands::dispatch(cmd, &console, &profile_name, &cli.global).await,
            }
        }
    }
}
