//! Application catalog command handlers.

use tabled::Tabled;

use edgectl_core::models::App;
use edgectl_core::{AppView, AppsView, Console};

use crate::cli::{AppsArgs, CrudCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Vendor")]
    vendor: String,
}

impl From<&App> for AppRow {
    fn from(a: &App) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            kind: a.kind.to_string(),
            version: a.version.clone(),
            vendor: a.vendor.clone(),
        }
    }
}

fn detail(a: &App) -> String {
    let ports = a
        .ports
        .iter()
        .map(|p| format!("{}/{}", p.port, p.protocol))
        .collect::<Vec<_>>();
    let epa = a
        .epa_features
        .iter()
        .map(|f| format!("{}={}", f.key, f.value))
        .collect::<Vec<_>>();
    output::detail(&[
        ("ID", a.id.clone()),
        ("Name", a.name.clone()),
        ("Type", a.kind.to_string()),
        ("Version", a.version.clone()),
        ("Vendor", a.vendor.clone()),
        ("Description", a.description.clone()),
        ("Cores", a.cores.to_string()),
        ("Memory (MB)", a.memory.to_string()),
        ("Ports", util::join(&ports)),
        ("Source", a.source.clone()),
        ("EPA features", util::join(&epa)),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(console: &Console, args: AppsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        CrudCommand::List => {
            let mut view = AppsView::new(console.controller());
            let pb = output::spinner("Loading applications", global);
            let outcome = view.load().await;
            pb.finish_and_clear();
            let apps = util::loaded(outcome, view.state(), global)?;

            let out = output::render_list(&global.output, &apps, |a| AppRow::from(a), |a| a.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Get { id } => {
            let mut view = AppView::new(console.controller(), id);
            let outcome = view.load().await;
            let app = util::loaded(outcome, view.state(), global)?;

            let out = output::render_single(&global.output, &app, detail, |a| a.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Create(payload) => {
            let app: App = util::read_payload(&payload.from_file)?;
            let mut view = AppsView::new(console.controller());
            util::finish(view.create(&app).await, global)
        }

        CrudCommand::Update { id, payload } => {
            let app: App = util::read_payload(&payload.from_file)?;
            let mut view = AppView::new(console.controller(), id);
            util::finish(view.save(app).await, global)
        }

        CrudCommand::Delete { id } => {
            if !util::confirm(&format!("Delete application {id}?"), global.yes)? {
                return Ok(());
            }
            let mut view = AppsView::new(console.controller());
            util::finish(view.delete(&id).await, global)
        }
    }
}
