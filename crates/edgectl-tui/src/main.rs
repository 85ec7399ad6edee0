//! `edgectl-tui`: terminal console for an edge controller.
//!
//! Built on [ratatui](https://ratatui.rs). Routes mirror the web console:
//! the node list and per-node tabs, the app catalog, and traffic
//! policies. Every controller call runs off the UI loop and reports back
//! as toasts.
//!
//! Logs go to a daily file under the state directory so they never
//! corrupt the terminal.

mod action;
mod app;
mod boundary;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use edgectl_core::{Console, ConsoleConfig, FileSessionStore, Route, UnauthorizedHook};

use crate::action::Action;
use crate::app::App;

/// Terminal console for edge nodes, apps, and traffic policies.
#[derive(Parser, Debug)]
#[command(name = "edgectl-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short, long, env = "EDGECTL_PROFILE")]
    profile: Option<String>,

    /// Controller URL, overriding the profile
    #[arg(long, env = "EDGECTL_CONTROLLER")]
    controller: Option<String>,

    /// Log filter for the log file (e.g. "debug", "edgectl_core=trace")
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Route to open first (e.g. "/nodes", "/policies/add")
    start: Option<String>,
}

/// File-based tracing. Returns a guard that must be held for the
/// lifetime of the application so logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let file_appender = tracing_appender::rolling::daily(edgectl_config::log_dir(), "edgectl-tui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Console settings plus the username to prefill. `--controller` wins
/// over the profile's URL.
fn console_config(
    cli: &Cli,
    cfg: &edgectl_config::Config,
    profile_name: &str,
) -> Result<(ConsoleConfig, Option<String>)> {
    let profile = cfg.profile(profile_name).ok();

    let mut config = match profile {
        Some(profile) => profile.to_console_config(&cfg.defaults)?,
        None => ConsoleConfig::new(edgectl_config::parse_url(
            "controller_url",
            cli.controller.as_deref().unwrap_or("http://localhost:8080"),
        )?),
    };
    if let Some(url) = &cli.controller {
        config.controller_url = edgectl_config::parse_url("controller_url", url)?;
    }
    Ok((config, profile.and_then(|p| p.username.clone())))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches to raw mode
    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let cfg = edgectl_config::load_config_or_default();
    let profile_name = cfg.active_profile_name(cli.profile.as_deref());
    let (config, username) = console_config(&cli, &cfg, &profile_name)?;

    info!(
        profile = %profile_name,
        controller = %config.controller_url,
        "starting edgectl-tui"
    );

    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let hook_tx = action_tx.clone();
    let on_unauthorized: UnauthorizedHook = Arc::new(move |_path: &str| {
        let _ = hook_tx.send(Action::SessionExpired);
    });

    // Shares the CLI's session file, so `edgectl login` carries over.
    let session = Arc::new(FileSessionStore::new(edgectl_config::session_path(&profile_name)));
    let console = Arc::new(Console::new(config, session, Some(on_unauthorized))?);

    let start = cli.start.as_deref().map_or(Route::Root, Route::parse);
    let mut app = App::new(console, username, action_tx, action_rx);
    app.run(start).await
}
