//! Command dispatch: bridges CLI args -> core views -> output formatting.

pub mod apps;
pub mod assignments;
pub mod config_cmd;
pub mod dns;
pub mod interfaces;
pub mod node_apps;
pub mod nodes;
pub mod pfd;
pub mod policies;
pub mod schema;
pub mod session;
pub mod subscriptions;
pub mod userplanes;
pub mod util;

use edgectl_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
///
/// Every resource command needs a stored session; without one the CLI
/// stops before any request goes out.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !console.is_authenticated() {
        return Err(CliError::NotLoggedIn {
            profile: profile_name.to_owned(),
        });
    }

    match cmd {
        Command::Nodes(args) => nodes::handle(console, args, global).await,
        Command::Interfaces(args) => interfaces::handle(console, args, global).await,
        Command::NodeApps(args) => node_apps::handle(console, args, global).await,
        Command::Dns(args) => dns::handle(console, args, global).await,
        Command::Nfd(args) => dns::handle_nfd(console, args, global).await,
        Command::Apps(args) => apps::handle(console, args, global).await,
        Command::Policies(args) => policies::handle(console, args, global).await,
        Command::Userplanes(args) => userplanes::handle(console, args, global).await,
        Command::Subscriptions(args) => subscriptions::handle(console, args, global).await,
        Command::Pfd(args) => pfd::handle(console, args, global).await,
        // Session, schema, config, and completions are handled before dispatch
        Command::Login(_)
        | Command::Logout
        | Command::Status
        | Command::Schema(_)
        | Command::Config(_)
        | Command::Completions(_) => Err(CliError::Internal(
            "command must be handled before dispatch".into(),
        )),
    }
}
