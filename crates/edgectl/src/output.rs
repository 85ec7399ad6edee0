//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Notifications and spinners go to stderr so stdout stays parseable.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use edgectl_core::models::AppStatus;
use edgectl_core::{Notification, NotificationLevel};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};
use tabled::{Table, Tabled, settings::Style as TableStyle};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

// ── Color helpers ───────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

#[derive(Clone, Debug, Default)]
pub struct Styles {
    pub bold: Style,
    pub success: Style,
    pub failure: Style,
    pub warning: Style,
    pub dim: Style,
}

impl Styles {
    pub fn for_mode(mode: &ColorMode) -> Self {
        let mut styles = Self::default();
        if should_color(mode) {
            styles.bold = Style::new().bold();
            styles.success = Style::new().green();
            styles.failure = Style::new().red();
            styles.warning = Style::new().yellow();
            styles.dim = Style::new().dimmed();
        }
        styles
    }

    /// Style for a deployed app's lifecycle status.
    pub fn status(&self, status: AppStatus) -> Style {
        match status {
            AppStatus::Running | AppStatus::Deployed => self.success,
            AppStatus::Error => self.failure,
            AppStatus::Stopped | AppStatus::Unknown => self.dim,
            AppStatus::Deploying | AppStatus::Starting | AppStatus::Stopping => self.warning,
        }
    }
}

// ── Notifications ───────────────────────────────────────────────────

/// Print a view notification to stderr. Errors are left to the
/// miette report; everything else is suppressed by `--quiet`.
pub fn print_notification(notification: &Notification, global: &GlobalOpts) {
    if global.quiet || notification.is_error() {
        return;
    }
    let styles = Styles::for_mode(&global.color);
    let (marker, style) = match notification.level {
        NotificationLevel::Success => ("✓", styles.success),
        NotificationLevel::Warning => ("!", styles.warning),
        NotificationLevel::Info | NotificationLevel::Error => ("·", styles.dim),
    };
    eprintln!("{} {}", marker.style(style), notification.message);
}

// ── Spinner ─────────────────────────────────────────────────────────

/// Spinner on stderr while a request is in flight. Hidden when stderr
/// is not a terminal or output is quiet.
pub fn spinner(message: &str, global: &GlobalOpts) -> ProgressBar {
    if global.quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ── Render dispatchers ──────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, which returns a pre-formatted
/// key/value block.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Key/value detail block: one aligned `key: value` per line.
pub fn detail(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ───────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(TableStyle::rounded()).to_string()
}

/// Pretty-printed JSON, or compact single-line JSON.
pub(crate) fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}"))
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("# serialization failed: {e}"))
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: String,
        name: String,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "ID")]
        id: String,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                id: "a".into(),
                name: "first".into(),
            },
            Item {
                id: "b".into(),
                name: "second".into(),
            },
        ]
    }

    #[test]
    fn plain_lists_one_id_per_line() {
        let out = render_list(
            &OutputFormat::Plain,
            &items(),
            |i| ItemRow { id: i.id.clone() },
            |i| i.id.clone(),
        );
        assert_eq!(out, "a\nb");
    }

    #[test]
    fn table_uses_rounded_borders() {
        let out = render_list(
            &OutputFormat::Table,
            &items(),
            |i| ItemRow { id: i.id.clone() },
            |i| i.id.clone(),
        );
        assert!(out.contains('╭'), "{out}");
        assert!(out.contains("ID"));
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render_json(&items(), true);
        assert_eq!(
            out,
            r#"[{"id":"a","name":"first"},{"id":"b","name":"second"}]"#
        );
    }

    #[test]
    fn detail_aligns_keys() {
        let out = detail(&[("ID", "n1".into()), ("Location", "lab".into())]);
        assert_eq!(out, "ID        n1\nLocation  lab");
    }
}
