//! Node DNS and feature-discovery command handlers.

use tabled::Tabled;

use edgectl_core::models::{DnsConfig, NfdTag};
use edgectl_core::{Console, DnsView, NfdView};

use crate::cli::{DnsArgs, DnsCommand, GlobalOpts, NfdArgs, NfdCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DnsEntryRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct NfdRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&NfdTag> for NfdRow {
    fn from(t: &NfdTag) -> Self {
        Self {
            id: t.id.clone(),
            value: t.value.clone(),
        }
    }
}

/// A-records then forwarders, one row each.
fn dns_table(config: &DnsConfig) -> String {
    let records = config.records.a.iter().map(|r| DnsEntryRow {
        kind: if r.alias { "A (alias)" } else { "A" },
        name: r.name.clone(),
        value: util::join(&r.values),
        description: r.description.clone(),
    });
    let forwarders = config
        .configurations
        .forwarders
        .iter()
        .map(|f| DnsEntryRow {
            kind: "forwarder",
            name: f.name.clone(),
            value: f.value.clone(),
            description: f.description.clone(),
        });
    let rows: Vec<DnsEntryRow> = records.chain(forwarders).collect();

    let header = if config.name.is_empty() {
        "(no DNS configuration)".to_owned()
    } else {
        format!("DNS configuration: {}", config.name)
    };
    if rows.is_empty() {
        return header;
    }
    format!(
        "{header}\n{}",
        tabled::Table::new(rows).with(tabled::settings::Style::rounded())
    )
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(console: &Console, args: DnsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DnsCommand::Get { node } => {
            let mut view = DnsView::new(console.controller(), node);
            let pb = output::spinner("Loading DNS configuration", global);
            let outcome = view.load().await;
            pb.finish_and_clear();
            let config = util::loaded(outcome, view.state(), global)?;

            let out = output::render_single(&global.output, &config, dns_table, |c| c.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DnsCommand::Apply { node, payload } => {
            let config: DnsConfig = util::read_payload(&payload.from_file)?;
            let mut view = DnsView::new(console.controller(), node);
            util::finish(view.apply(config).await, global)
        }

        DnsCommand::Delete { node } => {
            if !util::confirm(&format!("Delete the DNS configuration on node {node}?"), global.yes)? {
                return Ok(());
            }
            let mut view = DnsView::new(console.controller(), node);
            util::finish(view.delete().await, global)
        }
    }
}

pub async fn handle_nfd(
    console: &Console,
    args: NfdArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NfdCommand::List { node } => {
            let mut view = NfdView::new(console.controller(), node);
            let outcome = view.load().await;
            let tags = util::loaded(outcome, view.state(), global)?;

            let out = output::render_list(&global.output, &tags, |t| NfdRow::from(t), |t| t.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
