use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use edgectl_core::models::DnsConfig;
use edgectl_core::{DnsView, schema};

use crate::action::{Action, Confirm, Loaded, Pending};
use crate::component::{Component, ScreenCtx};
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::spinner::Spinner;
use crate::widgets::table::{centered, panel};

pub struct DnsTab {
    node_id: String,
    ctx: Option<ScreenCtx>,
    view: Option<DnsView>,
    edit: Option<Form>,
    saving: bool,
    spinner: Spinner,
}

enum Op {
    Load,
    Apply(DnsConfig),
    Delete,
}

impl DnsTab {
    pub fn new(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_owned(),
            ctx: None,
            view: None,
            edit: None,
            saving: false,
            spinner: Spinner::default(),
        }
    }

    fn run(&self, op: Op) {
        let (Some(ctx), Some(view)) = (&self.ctx, &self.view) else {
            return;
        };
        let mut view = view.clone();
        ctx.spawn(async move {
            let outcome = match op {
                Op::Load => view.load().await,
                Op::Apply(config) => view.apply(config).await,
                Op::Delete => view.delete().await,
            };
            (Loaded::Dns(view), outcome)
        });
    }

    fn config(&self) -> Option<&DnsConfig> {
        self.view.as_ref().and_then(|v| v.state().data())
    }

    fn submit(&mut self, value: serde_json::Value) {
        match serde_json::from_value::<DnsConfig>(value) {
            Ok(config) => {
                self.saving = true;
                self.run(Op::Apply(config));
            }
            Err(e) => {
                if let Some(form) = &mut self.edit {
                    form.set_error(format!("Invalid DNS config: {e}"));
                }
            }
        }
    }
}

impl Component for DnsTab {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        self.view = Some(DnsView::new(ctx.console().controller(), &self.node_id));
        self.ctx = Some(ctx);
        self.run(Op::Load);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(form) = &mut self.edit {
            if !self.saving {
                match form.handle_key(key) {
                    FormEvent::Submitted(value) => self.submit(value),
                    FormEvent::Cancelled => self.edit = None,
                    FormEvent::Consumed => {}
                }
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('e') => {
                let value = self
                    .config()
                    .and_then(|c| serde_json::to_value(c).ok())
                    .unwrap_or_default();
                self.edit = Some(Form::new(schema::dns_config_apply(), &value));
            }
            KeyCode::Char('D') | KeyCode::Delete if self.config().is_some_and(|c| !c.is_empty()) => {
                return Ok(Some(Action::Confirm(Confirm {
                    prompt: format!("Delete the DNS config on node {}?", self.node_id),
                    on_yes: Pending::DeleteDns,
                })));
            }
            KeyCode::Char('r') => self.run(Op::Load),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.spinner.tick(),
            Action::Confirmed(Pending::DeleteDns) => self.run(Op::Delete),
            Action::Settled {
                loaded: Loaded::Dns(view),
                outcome,
                ..
            } => {
                if self.saving {
                    self.saving = false;
                    if outcome.is_ok() {
                        self.edit = None;
                    }
                }
                self.view = Some(view.clone());
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = &self.view else { return };
        if view.state().is_loading() {
            self.spinner.render(frame, area, "Loading DNS config...");
            return;
        }

        let mut lines = Vec::new();
        match view.state().data() {
            Some(config) if !config.is_empty() => {
                lines.push(Line::from(vec![
                    Span::styled("Name  ", theme::key_hint()),
                    Span::styled(config.name.clone(), theme::table_row()),
                ]));
                lines.push(Line::from(""));
                lines.push(Line::styled("A records", theme::table_header()));
                for record in &config.records.a {
                    let alias = if record.alias { " (alias)" } else { "" };
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {}{alias}  ", record.name), theme::table_row()),
                        Span::styled(record.values.join(", "), theme::key_hint()),
                    ]));
                }
                lines.push(Line::from(""));
                lines.push(Line::styled("Forwarders", theme::table_header()));
                for forwarder in &config.configurations.forwarders {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {}  ", forwarder.value), theme::table_row()),
                        Span::styled(forwarder.name.clone(), theme::key_hint()),
                    ]));
                }
            }
            _ => lines.push(Line::styled(
                "No DNS config on this node. Press e to apply one.",
                theme::key_hint(),
            )),
        }
        frame.render_widget(Paragraph::new(lines).block(panel("DNS")), area);

        if let Some(form) = &self.edit {
            form.render(frame, centered(area, 72, 12));
        }
    }

    fn captures_input(&self) -> bool {
        self.edit.is_some()
    }

    fn hints(&self) -> &'static str {
        "e apply  D delete  r reload"
    }

    fn id(&self) -> &'static str {
        "node-dns"
    }
}
