//! Policy assignment on node interfaces and deployed apps.

use serde::Serialize;

use edgectl_core::{Console, PolicyControls, PolicyResource};

use crate::cli::{GlobalOpts, ResourcePolicyCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct Assignment<'a> {
    resource: &'a str,
    policy: Option<&'a str>,
}

pub async fn handle(
    console: &Console,
    resource: PolicyResource,
    command: ResourcePolicyCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        ResourcePolicyCommand::Get { node, resource: id } => {
            let mut controls = controls(console, resource, node, id);
            let outcome = controls.load().await;
            util::finish(outcome, global)?;

            let assignment = Assignment {
                resource: controls.resource_id(),
                policy: controls.policy_id(),
            };
            let out = output::render_single(
                &global.output,
                &assignment,
                |a| a.policy.map_or_else(|| "(no policy)".to_owned(), str::to_owned),
                |a| a.policy.unwrap_or_default().to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ResourcePolicyCommand::Assign {
            node,
            resource: id,
            policy,
        } => {
            let mut controls = controls(console, resource, node, id);
            util::finish(controls.assign(&policy).await, global)
        }

        ResourcePolicyCommand::Remove { node, resource: id } => {
            if !util::confirm(
                &format!("Remove the traffic policy from {resource} {id}?"),
                global.yes,
            )? {
                return Ok(());
            }
            let mut controls = controls(console, resource, node, id);
            util::finish(controls.remove().await, global)
        }
    }
}

fn controls(console: &Console, resource: PolicyResource, node: String, id: String) -> PolicyControls {
    PolicyControls::new(console.controller(), console.orchestration(), node, resource, id)
}
