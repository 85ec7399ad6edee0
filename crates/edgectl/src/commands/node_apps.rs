//! Handlers for apps deployed on a node.

use owo_colors::OwoColorize;
use tabled::Tabled;

use edgectl_core::models::LifecycleCommand;
use edgectl_core::{Console, NodeAppRow, NodeAppsView, PolicyResource};

use crate::cli::{GlobalOpts, NodeAppsArgs, NodeAppsCommand};
use crate::error::CliError;
use crate::output::{self, Styles};

use super::{assignments, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct NodeAppTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl NodeAppTableRow {
    fn new(row: &NodeAppRow, styles: &Styles) -> Self {
        Self {
            id: row.id.clone(),
            name: row.name.clone(),
            version: row.version.clone(),
            vendor: row.vendor.clone(),
            kind: row.kind.map(|k| k.to_string()).unwrap_or_default(),
            status: row.status.style(styles.status(row.status)).to_string(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: NodeAppsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NodeAppsCommand::List { node } => {
            let mut view = NodeAppsView::new(console.controller(), console.orchestration(), node);
            let pb = output::spinner("Loading deployed apps", global);
            let outcome = view.load().await;
            pb.finish_and_clear();
            util::finish(outcome, global)?;

            let styles = Styles::for_mode(&global.color);
            let out = output::render_list(
                &global.output,
                view.rows(),
                |r| NodeAppTableRow::new(r, &styles),
                |r| r.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NodeAppsCommand::Deploy { node, app } => {
            let mut view = NodeAppsView::new(console.controller(), console.orchestration(), node);
            util::finish(view.deploy(&app).await, global)
        }

        NodeAppsCommand::Remove { node, app } => {
            if !util::confirm(&format!("Remove app {app} from node {node}?"), global.yes)? {
                return Ok(());
            }
            let mut view = NodeAppsView::new(console.controller(), console.orchestration(), node);
            util::finish(view.remove(&app).await, global)
        }

        NodeAppsCommand::Policy(policy) => {
            assignments::handle(console, PolicyResource::App, policy.command, global).await
        }

        NodeAppsCommand::Start { node, app } => {
            lifecycle(console, node, &app, LifecycleCommand::Start, global).await
        }
        NodeAppsCommand::Stop { node, app } => {
            lifecycle(console, node, &app, LifecycleCommand::Stop, global).await
        }
        NodeAppsCommand::Restart { node, app } => {
            lifecycle(console, node, &app, LifecycleCommand::Restart, global).await
        }
    }
}

async fn lifecycle(
    console: &Console,
    node: String,
    app: &str,
    command: LifecycleCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut view = NodeAppsView::new(console.controller(), console.orchestration(), node);
    util::finish(view.command(app, command).await, global)
}
