//! Edge node command handlers.

use tabled::Tabled;

use edgectl_core::models::{NewNode, Node};
use edgectl_core::{Console, NodeView, NodesView};

use crate::cli::{GlobalOpts, NodesArgs, NodesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Serial")]
    serial: String,
}

impl From<&Node> for NodeRow {
    fn from(n: &Node) -> Self {
        Self {
            id: n.id.clone(),
            name: n.name.clone(),
            location: n.location.clone(),
            serial: n.serial.clone(),
        }
    }
}

fn detail(n: &Node) -> String {
    output::detail(&[
        ("ID", n.id.clone()),
        ("Name", n.name.clone()),
        ("Location", n.location.clone()),
        ("Serial", n.serial.clone()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(console: &Console, args: NodesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        NodesCommand::List => {
            let mut view = NodesView::new(console.controller());
            let pb = output::spinner("Loading edge nodes", global);
            let outcome = view.load().await;
            pb.finish_and_clear();
            let nodes = util::loaded(outcome, view.state(), global)?;

            let out = output::render_list(&global.output, &nodes, |n| NodeRow::from(n), |n| n.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NodesCommand::Get { node } => {
            let node = load_node(console, &node, global).await?.0;
            let out = output::render_single(&global.output, &node, detail, |n| n.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NodesCommand::Add {
            name,
            location,
            serial,
        } => {
            let mut view = NodesView::new(console.controller());
            let outcome = view
                .add(&NewNode {
                    name,
                    location,
                    serial,
                })
                .await;
            util::finish(outcome, global)
        }

        NodesCommand::Update {
            node,
            name,
            location,
            serial,
        } => {
            let (current, mut view) = load_node(console, &node, global).await?;
            let edited = Node {
                name: name.unwrap_or(current.name),
                location: location.unwrap_or(current.location),
                serial: serial.unwrap_or(current.serial),
                ..current
            };
            util::finish(view.save(edited).await, global)
        }
    }
}

async fn load_node(
    console: &Console,
    node_id: &str,
    global: &GlobalOpts,
) -> Result<(Node, NodeView), CliError> {
    let mut view = NodeView::new(console.controller(), node_id);
    let pb = output::spinner("Loading edge node", global);
    let outcome = view.load().await;
    pb.finish_and_clear();
    let node = util::loaded(outcome, view.state(), global)?;
    Ok((node, view))
}
