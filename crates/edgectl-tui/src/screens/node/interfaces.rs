use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Cell, Row, Table};

use edgectl_core::models::Interface;
use edgectl_core::{InterfacesView, PolicyResource, schema};

use crate::action::{Action, Loaded, Pending};
use crate::component::{Component, ScreenCtx};
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::spinner::Spinner;
use crate::widgets::table::{Cursor, centered, panel};

use super::policy::{PanelEvent, PolicyPanel};

/// Interface edits are staged locally and sent together on commit.
pub struct InterfacesTab {
    node_id: String,
    ctx: Option<ScreenCtx>,
    view: Option<InterfacesView>,
    cursor: Cursor,
    spinner: Spinner,
    edit: Option<Form>,
    policy: Option<PolicyPanel>,
}

enum Op {
    Load,
    Commit,
}

impl InterfacesTab {
    pub fn new(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_owned(),
            ctx: None,
            view: None,
            cursor: Cursor::default(),
            spinner: Spinner::default(),
            edit: None,
            policy: None,
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
                Op::Commit => view.commit().await,
            };
            (Loaded::Interfaces(view), outcome)
        });
    }

    fn interfaces(&self) -> &[Interface] {
        self.view
            .as_ref()
            .map(InterfacesView::interfaces)
            .unwrap_or_default()
    }

    fn stage(&mut self, value: serde_json::Value) {
        let edited = match serde_json::from_value::<Interface>(value) {
            Ok(edited) => edited,
            Err(e) => {
                if let Some(form) = &mut self.edit {
                    form.set_error(format!("Invalid interface: {e}"));
                }
                return;
            }
        };
        let Some(view) = &mut self.view else { return };
        let outcome = view.stage(edited);
        let staged = outcome.is_ok();
        if let Some(ctx) = &self.ctx {
            for notification in outcome.notifications {
                ctx.send(Action::Notify(notification));
            }
        }
        if staged {
            self.edit = None;
        }
    }
}

impl Component for InterfacesTab {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        self.view = Some(InterfacesView::new(ctx.console().controller(), &self.node_id));
        self.ctx = Some(ctx);
        self.run(Op::Load);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.policy.is_some() {
            let event = match (&mut self.policy, &self.ctx) {
                (Some(panel), Some(ctx)) => panel.handle_key(ctx, key),
                _ => PanelEvent::Consumed,
            };
            return Ok(match event {
                PanelEvent::Close => {
                    self.policy = None;
                    None
                }
                PanelEvent::Emit(action) => Some(action),
                PanelEvent::Consumed => None,
            });
        }
        if let Some(form) = &mut self.edit {
            match form.handle_key(key) {
                FormEvent::Submitted(value) => self.stage(value),
                FormEvent::Cancelled => self.edit = None,
                FormEvent::Consumed => {}
            }
            return Ok(None);
        }

        let len = self.interfaces().len();
        if self.cursor.handle_key(key, len) {
            return Ok(None);
        }
        let selected = self.interfaces().get(self.cursor.selected()).cloned();
        match key.code {
            KeyCode::Char('c') => self.run(Op::Commit),
            KeyCode::Char('r') => self.run(Op::Load),
            KeyCode::Char('e') => {
                if let Some(iface) = selected {
                    let value = serde_json::to_value(&iface).unwrap_or_default();
                    self.edit = Some(Form::new(schema::interface(), &value));
                }
            }
            KeyCode::Char('p') => {
                if let (Some(iface), Some(ctx)) = (selected, &self.ctx) {
                    self.policy = Some(PolicyPanel::open(
                        ctx,
                        &self.node_id,
                        PolicyResource::Interface,
                        &iface.id,
                        format!("interface {}", iface.id),
                    ));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.spinner.tick(),
            Action::Confirmed(Pending::RemovePolicyAssignment) => {
                if let (Some(panel), Some(ctx)) = (&self.policy, &self.ctx) {
                    panel.remove(ctx);
                }
            }
            Action::Settled {
                loaded: Loaded::Interfaces(view),
                ..
            } => {
                self.view = Some(view.clone());
                let len = self.interfaces().len();
                self.cursor.clamp(len);
            }
            Action::Settled { loaded, .. } => {
                if let Some(panel) = &mut self.policy {
                    panel.update(loaded);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = &self.view else { return };
        if view.state().is_loading() {
            self.spinner.render(frame, area, "Loading interfaces...");
            return;
        }

        let header = Row::new([
            "ID", "Description", "Driver", "Type", "MAC", "VLAN", "Zones", "Fallback",
        ])
        .style(theme::table_header());
        let rows = view.interfaces().iter().map(|i| {
            Row::new(vec![
                Cell::from(i.id.clone()),
                Cell::from(i.description.clone()),
                Cell::from(i.driver.to_string()),
                Cell::from(i.kind.to_string()),
                Cell::from(i.mac_address.clone()),
                Cell::from(i.vlan.to_string()),
                Cell::from(i.zones.join(", ")),
                Cell::from(i.fallback_interface.clone()),
            ])
            .style(theme::table_row())
        });

        let title = if view.is_dirty() {
            format!("Interfaces ({}) · uncommitted changes", view.interfaces().len())
        } else {
            format!("Interfaces ({})", view.interfaces().len())
        };
        let table = Table::new(
            rows,
            [
                Constraint::Fill(1),
                Constraint::Fill(2),
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Length(18),
                Constraint::Length(5),
                Constraint::Fill(1),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .block(panel(&title))
        .row_highlight_style(theme::table_selected());
        frame.render_stateful_widget(table, area, &mut self.cursor.state());

        if let Some(form) = &self.edit {
            form.render(frame, centered(area, 72, 14));
        }
        if let Some(panel) = &self.policy {
            panel.render(frame, area);
        }
    }

    fn captures_input(&self) -> bool {
        self.edit.is_some() || self.policy.is_some()
    }

    fn hints(&self) -> &'static str {
        "e edit  c commit  p policy  r reload"
    }

    fn id(&self) -> &'static str {
        "node-interfaces"
    }
}
