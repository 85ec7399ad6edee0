//! CNCA PFD transaction handlers.

use tabled::Tabled;

use edgectl_core::models::{PfdData, PfdTransaction};
use edgectl_core::{Console, PfdView};

use crate::cli::{CrudCommand, GlobalOpts, PfdAppCommand, PfdArgs, PfdCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Applications")]
    apps: String,
    #[tabled(rename = "Reports")]
    reports: usize,
}

impl From<&PfdTransaction> for TransactionRow {
    fn from(tx: &PfdTransaction) -> Self {
        Self {
            id: transaction_id(tx),
            apps: util::join(&app_ids(tx)),
            reports: tx.pfd_reports.len(),
        }
    }
}

fn transaction_id(tx: &PfdTransaction) -> String {
    tx.id().unwrap_or_default().to_owned()
}

fn app_ids(tx: &PfdTransaction) -> Vec<String> {
    tx.pfd_datas
        .iter()
        .map(|d| d.external_app_id.clone())
        .collect()
}

fn transaction_detail(tx: &PfdTransaction) -> String {
    let reports = tx
        .pfd_reports
        .iter()
        .map(|r| format!("{} ({})", util::join(&r.external_app_ids), r.failure_code))
        .collect::<Vec<_>>();
    output::detail(&[
        ("ID", transaction_id(tx)),
        ("Self", tx.self_link.clone()),
        ("Features", tx.supp_feat.clone()),
        ("Applications", util::join(&app_ids(tx))),
        ("Reports", util::join(&reports)),
    ])
}

fn app_detail(data: &PfdData) -> String {
    let optional = |v: Option<u32>| v.map_or_else(|| "-".into(), |n| n.to_string());
    let pfds = data
        .pfds
        .iter()
        .map(|p| p.pfd_id.clone())
        .collect::<Vec<_>>();
    output::detail(&[
        ("App", data.external_app_id.clone()),
        ("Self", data.self_link.clone()),
        ("PFDs", util::join(&pfds)),
        ("Allowed delay", optional(data.allowed_delay)),
        ("Caching time", optional(data.caching_time)),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(console: &Console, args: PfdArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut view = PfdView::new(console.cnca()?);
    match args.command {
        PfdCommand::Crud(CrudCommand::List) => {
            let pb = output::spinner("Loading PFD transactions", global);
            let outcome = view.load().await;
            pb.finish_and_clear();
            let transactions = util::loaded(outcome, view.state(), global)?;

            let out = output::render_list(
                &global.output,
                &transactions,
                |tx| TransactionRow::from(tx),
                transaction_id,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PfdCommand::Crud(CrudCommand::Get { id }) => {
            let tx = view.get(&id).await?;
            let out = output::render_single(&global.output, &tx, transaction_detail, transaction_id);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PfdCommand::Crud(CrudCommand::Create(payload)) => {
            let tx: PfdTransaction = util::read_payload(&payload.from_file)?;
            util::finish(view.create(&tx).await, global)
        }

        PfdCommand::Crud(CrudCommand::Update { id, payload }) => {
            let tx: PfdTransaction = util::read_payload(&payload.from_file)?;
            util::finish(view.update(&id, &tx).await, global)
        }

        PfdCommand::Crud(CrudCommand::Delete { id }) => {
            if !util::confirm(&format!("Delete PFD transaction {id}?"), global.yes)? {
                return Ok(());
            }
            util::finish(view.delete(&id).await, global)
        }

        PfdCommand::App(app) => match app.command {
            PfdAppCommand::Get { transaction, app } => {
                let data = view.get_app(&transaction, &app).await?;
                let out = output::render_single(&global.output, &data, app_detail, |d| {
                    d.external_app_id.clone()
                });
                output::print_output(&out, global.quiet);
                Ok(())
            }

            PfdAppCommand::Update {
                transaction,
                app,
                payload,
            } => {
                let data: PfdData = util::read_payload(&payload.from_file)?;
                util::finish(view.update_app(&transaction, &app, &data).await, global)
            }

            PfdAppCommand::Delete { transaction, app } => {
                if !util::confirm(
                    &format!("Delete application {app} from transaction {transaction}?"),
                    global.yes,
                )? {
                    return Ok(());
                }
                util::finish(view.delete_app(&transaction, &app).await, global)
            }
        },
    }
}
