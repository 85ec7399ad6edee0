//! Node interface command handlers.

use tabled::Tabled;

use edgectl_core::models::Interface;
use edgectl_core::{Console, InterfacesView, PolicyResource};

use crate::cli::{GlobalOpts, InterfacesArgs, InterfacesCommand};
use crate::error::CliError;
use crate::output;

use super::{assignments, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "VLAN")]
    vlan: u32,
    #[tabled(rename = "Zones")]
    zones: String,
    #[tabled(rename = "Fallback")]
    fallback: String,
}

impl From<&Interface> for InterfaceRow {
    fn from(i: &Interface) -> Self {
        Self {
            id: i.id.clone(),
            description: i.description.clone(),
            driver: i.driver.to_string(),
            kind: i.kind.to_string(),
            mac: i.mac_address.clone(),
            vlan: i.vlan,
            zones: util::join(&i.zones),
            fallback: i.fallback_interface.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        InterfacesCommand::List { node } => {
            let view = load(console, node, global).await?;
            let out = output::render_list(
                &global.output,
                view.interfaces(),
                |i| InterfaceRow::from(i),
                |i| i.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InterfacesCommand::Update {
            node,
            interface,
            description,
            driver,
            kind,
            zones,
            fallback,
        } => {
            let mut view = load(console, node, global).await?;
            let current = view
                .interfaces()
                .iter()
                .find(|i| i.id == interface)
                .cloned()
                .ok_or_else(|| CliError::NotFound {
                    message: format!("Interface {interface} not found on node {}", view.node_id()),
                })?;

            let edited = Interface {
                description: description.unwrap_or(current.description),
                driver: driver.unwrap_or(current.driver),
                kind: kind.unwrap_or(current.kind),
                zones: zones.unwrap_or(current.zones),
                fallback_interface: fallback.unwrap_or(current.fallback_interface),
                ..current
            };

            // The node only sees the change once the whole list is committed.
            util::finish(view.stage(edited), global)?;
            util::finish(view.commit().await, global)
        }

        InterfacesCommand::Policy(policy) => {
            assignments::handle(console, PolicyResource::Interface, policy.command, global).await
        }
    }
}

async fn load(console: &Console, node: String, global: &GlobalOpts) -> Result<InterfacesView, CliError> {
    let mut view = InterfacesView::new(console.controller(), node);
    let pb = output::spinner("Loading interfaces", global);
    let outcome = view.load().await;
    pb.finish_and_clear();
    util::finish(outcome, global)?;
    Ok(view)
}
