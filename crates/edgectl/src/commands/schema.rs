//! Offline schema commands: no controller or session needed.

use serde::Serialize;
use serde_json::json;
use tabled::Tabled;

use edgectl_core::schema::{self, descriptor_for};
use edgectl_core::{FormField, SchemaKind};

use crate::cli::{GlobalOpts, SchemaArgs, SchemaCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    kind: String,
    #[tabled(rename = "Required")]
    required: bool,
    #[tabled(rename = "Read-only")]
    read_only: bool,
    #[tabled(rename = "Options")]
    options: String,
}

impl From<FormField> for FieldRow {
    fn from(f: FormField) -> Self {
        Self {
            key: f.key,
            title: f.title,
            kind: f.kind.to_string(),
            required: f.required,
            read_only: f.read_only,
            options: util::join(&f.options),
        }
    }
}

pub fn handle(args: SchemaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SchemaCommand::Show { kind } => {
            let descriptor = descriptor_for(kind);
            let doc = json!({
                "kind": kind.to_string(),
                "schema": descriptor.schema,
                "form": descriptor.form,
            });
            let out = output::render_single(
                &global.output,
                &doc,
                |d| output::render_json(d, false),
                |_| kind.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SchemaCommand::Fields { kind } => {
            let rows: Vec<FieldRow> = descriptor_for(kind)
                .fields()
                .into_iter()
                .map(FieldRow::from)
                .collect();
            let out = output::render_list(&global.output, &rows, clone_row, |r| r.key.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SchemaCommand::Validate { kind, payload } => {
            let value = util::read_json_file(&payload.from_file)?;
            check(kind, &value)?;
            if !global.quiet {
                eprintln!("✓ Payload is a valid {kind}");
            }
            Ok(())
        }
    }
}

fn clone_row(r: &FieldRow) -> FieldRow {
    FieldRow {
        key: r.key.clone(),
        title: r.title.clone(),
        kind: r.kind.clone(),
        required: r.required,
        read_only: r.read_only,
        options: r.options.clone(),
    }
}

/// Validate `value` as `kind`, folding every field error into one report.
pub fn check(kind: SchemaKind, value: &serde_json::Value) -> Result<(), CliError> {
    let errors = schema::validate(&descriptor_for(kind), value);
    if errors.is_empty() {
        return Ok(());
    }
    Err(CliError::SchemaViolation {
        kind: kind.to_string(),
        details: errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn node_add_requires_name_and_serial() {
        let err = check(SchemaKind::NodeAdd, &json!({ "location": "rack 3" })).unwrap_err();
        let CliError::SchemaViolation { kind, details } = err else {
            panic!("expected schema violation");
        };
        assert_eq!(kind, "node-add");
        assert!(details.contains("name"));
        assert!(details.contains("serial"));
    }

    #[test]
    fn field_rows_keep_form_order() {
        let rows: Vec<FieldRow> = descriptor_for(SchemaKind::NodeAdd)
            .fields()
            .into_iter()
            .map(FieldRow::from)
            .collect();
        assert_eq!(rows.first().unwrap().key, "name");
        assert!(rows.iter().all(|r| !r.read_only));
    }
}
