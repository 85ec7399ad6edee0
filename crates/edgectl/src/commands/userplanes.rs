//! CUPS userplane command handlers.

use tabled::Tabled;

use edgectl_core::models::Userplane;
use edgectl_core::{Console, UserplanesView};

use crate::cli::{CrudCommand, GlobalOpts, UserplanesArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct UserplaneRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "UUID")]
    uuid: String,
    #[tabled(rename = "Function")]
    function: String,
    #[tabled(rename = "Selectors")]
    selectors: usize,
    #[tabled(rename = "Entitlements")]
    entitlements: usize,
}

impl From<&Userplane> for UserplaneRow {
    fn from(u: &Userplane) -> Self {
        Self {
            id: u.id.clone(),
            uuid: u.uuid.clone(),
            function: u.function.to_string(),
            selectors: u.selectors.len(),
            entitlements: u.entitlements.len(),
        }
    }
}

fn detail(u: &Userplane) -> String {
    let endpoint = |ep: Option<String>| ep.unwrap_or_else(|| "-".into());
    let config = &u.config;
    output::detail(&[
        ("ID", u.id.clone()),
        ("UUID", u.uuid.clone()),
        ("Function", u.function.to_string()),
        (
            "Sxa",
            endpoint(config.sxa.as_ref().map(|e| {
                format!("cp {} / up {}", e.cp_ip_address, e.up_ip_address)
            })),
        ),
        (
            "Sxb",
            endpoint(config.sxb.as_ref().map(|e| {
                format!("cp {} / up {}", e.cp_ip_address, e.up_ip_address)
            })),
        ),
        (
            "SGi",
            endpoint(config.sgi.as_ref().map(|e| e.up_ip_address.clone())),
        ),
        ("Breakout", config.breakout.len().to_string()),
        ("DNS", config.dns.len().to_string()),
        (
            "Selectors",
            util::join(&u.selectors.iter().map(|s| s.id.clone()).collect::<Vec<_>>()),
        ),
        (
            "Entitlements",
            util::join(&u.entitlements.iter().map(|e| e.id.clone()).collect::<Vec<_>>()),
        ),
    ])
}

pub async fn handle(
    console: &Console,
    args: UserplanesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut view = UserplanesView::new(console.cups()?);
    match args.command {
        CrudCommand::List => {
            let pb = output::spinner("Loading userplanes", global);
            let outcome = view.load().await;
            pb.finish_and_clear();
            let userplanes = util::loaded(outcome, view.state(), global)?;

            let out = output::render_list(
                &global.output,
                &userplanes,
                |u| UserplaneRow::from(u),
                |u| u.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Get { id } => {
            let userplane = view.get(&id).await?;
            let out = output::render_single(&global.output, &userplane, detail, |u| u.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Create(payload) => {
            let userplane: Userplane = util::read_payload(&payload.from_file)?;
            util::finish(view.create(&userplane).await, global)
        }

        CrudCommand::Update { id, payload } => {
            let mut userplane: Userplane = util::read_payload(&payload.from_file)?;
            // The path id wins over whatever the payload carries.
            userplane.id = id;
            util::finish(view.update(&userplane).await, global)
        }

        CrudCommand::Delete { id } => {
            if !util::confirm(&format!("Delete userplane {id}?"), global.yes)? {
                return Ok(());
            }
            util::finish(view.delete(&id).await, global)
        }
    }
}
