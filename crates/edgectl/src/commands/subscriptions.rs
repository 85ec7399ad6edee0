//! CNCA traffic-influence subscription handlers.

use tabled::Tabled;

use edgectl_core::models::Subscription;
use edgectl_core::{Console, SubscriptionsView};

use crate::cli::{CrudCommand, GlobalOpts, SubscriptionsArgs, SubscriptionsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SubscriptionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "App")]
    app: String,
    #[tabled(rename = "Transaction")]
    transaction: String,
    #[tabled(rename = "DNN")]
    dnn: String,
    #[tabled(rename = "Routes")]
    routes: usize,
}

impl From<&Subscription> for SubscriptionRow {
    fn from(s: &Subscription) -> Self {
        Self {
            id: subscription_id(s),
            service: s.af_service_id.clone(),
            app: s.af_app_id.clone(),
            transaction: s.af_trans_id.clone(),
            dnn: s.dnn.clone(),
            routes: s.traffic_routes.len(),
        }
    }
}

fn subscription_id(s: &Subscription) -> String {
    s.id().unwrap_or_default().to_owned()
}

fn detail(s: &Subscription) -> String {
    let ue = [&s.gpsi, &s.ipv4_addr, &s.ipv6_addr, &s.mac_addr]
        .into_iter()
        .find(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| {
            if s.any_ue_ind {
                "any".into()
            } else {
                s.external_group_id.clone()
            }
        });
    let routes = s
        .traffic_routes
        .iter()
        .map(|r| r.dnai.clone())
        .collect::<Vec<_>>();
    output::detail(&[
        ("ID", subscription_id(s)),
        ("Self", s.self_link.clone()),
        ("AF service", s.af_service_id.clone()),
        ("AF app", s.af_app_id.clone()),
        ("AF transaction", s.af_trans_id.clone()),
        ("DNN", s.dnn.clone()),
        ("UE", ue),
        ("Relocation", s.app_relo_ind.to_string()),
        ("DNAI change", s.dnai_chg_type.clone()),
        ("Notify", s.notification_destination.clone()),
        ("Filters", s.traffic_filters.len().to_string()),
        ("Routes", util::join(&routes)),
    ])
}

pub async fn handle(
    console: &Console,
    args: SubscriptionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut view = SubscriptionsView::new(console.cnca()?);
    match args.command {
        SubscriptionsCommand::Crud(CrudCommand::List) => {
            let pb = output::spinner("Loading subscriptions", global);
            let outcome = view.load().await;
            pb.finish_and_clear();
            let subs = util::loaded(outcome, view.state(), global)?;

            let out = output::render_list(
                &global.output,
                &subs,
                |s| SubscriptionRow::from(s),
                subscription_id,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubscriptionsCommand::Crud(CrudCommand::Get { id }) => {
            let sub = view.get(&id).await?;
            let out = output::render_single(&global.output, &sub, detail, subscription_id);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubscriptionsCommand::Crud(CrudCommand::Create(payload)) => {
            let sub: Subscription = util::read_payload(&payload.from_file)?;
            util::finish(view.create(&sub).await, global)
        }

        SubscriptionsCommand::Crud(CrudCommand::Update { id, payload }) => {
            let sub: Subscription = util::read_payload(&payload.from_file)?;
            util::finish(view.update(&id, &sub).await, global)
        }

        SubscriptionsCommand::Crud(CrudCommand::Delete { id }) => {
            if !util::confirm(&format!("Delete subscription {id}?"), global.yes)? {
                return Ok(());
            }
            util::finish(view.delete(&id).await, global)
        }

        SubscriptionsCommand::Patch { id, payload } => {
            let patch = util::read_json_file(&payload.from_file)?;
            util::finish(view.patch(&id, &patch).await, global)
        }
    }
}
