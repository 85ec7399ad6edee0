//! Traffic policy command handlers.
//!
//! Document shape follows the orchestration mode: native traffic rules,
//! or Kube-OVN ingress/egress rules under `/kube_ovn/policies`.

use tabled::Tabled;

use edgectl_core::models::{PolicyDocument, PolicySummary};
use edgectl_core::{Console, PoliciesView, PolicyEditView};

use crate::cli::{CrudCommand, GlobalOpts, PoliciesArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PolicyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&PolicySummary> for PolicyRow {
    fn from(p: &PolicySummary) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
        }
    }
}

fn detail(doc: &PolicyDocument) -> String {
    let kind = match doc {
        PolicyDocument::Native(_) => "traffic",
        PolicyDocument::KubeOvn(_) => "kube-ovn",
    };
    output::detail(&[
        ("ID", doc.id().to_owned()),
        ("Name", doc.name().to_owned()),
        ("Kind", kind.to_owned()),
        ("Rules", doc.rule_count().to_string()),
    ])
}

pub async fn handle(
    console: &Console,
    args: PoliciesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mode = console.orchestration();
    match args.command {
        CrudCommand::List => {
            let mut view = PoliciesView::new(console.controller(), mode);
            let pb = output::spinner("Loading policies", global);
            let outcome = view.load().await;
            pb.finish_and_clear();
            let policies = util::loaded(outcome, view.state(), global)?;

            let out = output::render_list(
                &global.output,
                &policies,
                |p| PolicyRow::from(p),
                |p| p.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Get { id } => {
            let mut view = PolicyEditView::new(console.controller(), mode, Some(id));
            util::finish(view.load().await, global)?;
            let Some(doc) = view.state().data() else {
                return Ok(());
            };

            let out = output::render_single(&global.output, doc, detail, |d| d.id().to_owned());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Create(payload) => {
            let doc = read_document(console, &payload.from_file)?;
            let mut view = PolicyEditView::new(console.controller(), mode, None);
            util::finish(view.save(doc).await, global)
        }

        CrudCommand::Update { id, payload } => {
            let doc = read_document(console, &payload.from_file)?;
            let mut view = PolicyEditView::new(console.controller(), mode, Some(id));
            util::finish(view.save(doc).await, global)
        }

        CrudCommand::Delete { id } => {
            if !util::confirm(&format!("Delete policy {id}?"), global.yes)? {
                return Ok(());
            }
            let mut view = PoliciesView::new(console.controller(), mode);
            util::finish(view.delete(&id).await, global)
        }
    }
}

fn read_document(console: &Console, path: &std::path::Path) -> Result<PolicyDocument, CliError> {
    let value = util::read_json_file(path)?;
    PolicyDocument::from_value(console.orchestration(), value).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("not a {} policy: {e}", console.orchestration()),
    })
}
