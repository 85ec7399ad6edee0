use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Cell, Row, Table};

use edgectl_core::models::LifecycleCommand;
use edgectl_core::{NodeAppRow, NodeAppsView, PolicyResource};

use crate::action::{Action, Confirm, Loaded, Pending};
use crate::component::{Component, ScreenCtx};
use crate::theme;
use crate::widgets::picker::{Picker, PickerEvent};
use crate::widgets::spinner::Spinner;
use crate::widgets::table::{Cursor, centered, panel};

use super::policy::{PanelEvent, PolicyPanel};

/// Apps deployed on the node, with lifecycle commands and per-app
/// policies.
pub struct AppsTab {
    node_id: String,
    ctx: Option<ScreenCtx>,
    view: Option<NodeAppsView>,
    cursor: Cursor,
    spinner: Spinner,
    deploy: Option<Picker>,
    policy: Option<PolicyPanel>,
}

enum Op {
    Load,
    Deploy(String),
    Command(String, LifecycleCommand),
    Remove(String),
}

impl AppsTab {
    pub fn new(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_owned(),
            ctx: None,
            view: None,
            cursor: Cursor::default(),
            spinner: Spinner::default(),
            deploy: None,
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
                Op::Deploy(id) => view.deploy(&id).await,
                Op::Command(id, command) => view.command(&id, command).await,
                Op::Remove(id) => view.remove(&id).await,
            };
            (Loaded::NodeApps(view), outcome)
        });
    }

    fn rows(&self) -> &[NodeAppRow] {
        self.view
            .as_ref()
            .map(NodeAppsView::rows)
            .unwrap_or_default()
    }

    fn selected(&self) -> Option<&NodeAppRow> {
        self.rows().get(self.cursor.selected())
    }

    fn open_deploy(&mut self) {
        let Some(data) = self.view.as_ref().and_then(|v| v.state().data()) else {
            return;
        };
        let items = data
            .catalog
            .iter()
            .filter(|app| !data.rows.iter().any(|row| row.id == app.id))
            .map(|app| (app.id.clone(), format!("{} {}", app.name, app.version)))
            .collect();
        self.deploy = Some(Picker::new("Deploy app", items));
    }
}

impl Component for AppsTab {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        let console = ctx.console();
        self.view = Some(NodeAppsView::new(
            console.controller(),
            console.orchestration(),
            &self.node_id,
        ));
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
        if let Some(picker) = &mut self.deploy {
            match picker.handle_key(key) {
                PickerEvent::Picked(app_id) => {
                    self.deploy = None;
                    self.run(Op::Deploy(app_id));
                }
                PickerEvent::Cancelled => self.deploy = None,
                PickerEvent::Consumed => {}
            }
            return Ok(None);
        }

        let len = self.rows().len();
        if self.cursor.handle_key(key, len) {
            return Ok(None);
        }
        match key.code {
            KeyCode::Char('d') => {
                self.open_deploy();
                return Ok(None);
            }
            KeyCode::Char('r') => {
                self.run(Op::Load);
                return Ok(None);
            }
            _ => {}
        }

        let Some(row) = self.selected().cloned() else {
            return Ok(None);
        };
        match key.code {
            KeyCode::Char('s') => self.run(Op::Command(row.id, LifecycleCommand::Start)),
            KeyCode::Char('x') => self.run(Op::Command(row.id, LifecycleCommand::Stop)),
            KeyCode::Char('R') => self.run(Op::Command(row.id, LifecycleCommand::Restart)),
            KeyCode::Char('D') | KeyCode::Delete => {
                return Ok(Some(Action::Confirm(Confirm {
                    prompt: format!("Remove {} from this node?", display_name(&row)),
                    on_yes: Pending::RemoveNodeApp(row.id),
                })));
            }
            KeyCode::Char('p') => {
                if let Some(ctx) = &self.ctx {
                    self.policy = Some(PolicyPanel::open(
                        ctx,
                        &self.node_id,
                        PolicyResource::App,
                        &row.id,
                        format!("app {}", display_name(&row)),
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
            Action::Confirmed(Pending::RemoveNodeApp(id)) => self.run(Op::Remove(id.clone())),
            Action::Confirmed(Pending::RemovePolicyAssignment) => {
                if let (Some(panel), Some(ctx)) = (&self.policy, &self.ctx) {
                    panel.remove(ctx);
                }
            }
            Action::Settled {
                loaded: Loaded::NodeApps(view),
                ..
            } => {
                self.view = Some(view.clone());
                let len = self.rows().len();
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
            self.spinner.render(frame, area, "Loading node apps...");
            return;
        }

        let header = Row::new(["Name", "Version", "Vendor", "Type", "Status", "ID"])
            .style(theme::table_header());
        let rows = view.rows().iter().map(|r| {
            Row::new(vec![
                Cell::from(display_name(r)),
                Cell::from(r.version.clone()),
                Cell::from(r.vendor.clone()),
                Cell::from(r.kind.map(|k| k.to_string()).unwrap_or_default()),
                Cell::from(r.status.to_string()).style(theme::app_status(r.status)),
                Cell::from(r.id.clone()),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Fill(2),
            ],
        )
        .header(header)
        .block(panel(&format!("Apps ({})", view.rows().len())))
        .row_highlight_style(theme::table_selected());
        frame.render_stateful_widget(table, area, &mut self.cursor.state());

        if let Some(picker) = &self.deploy {
            picker.render(frame, centered(area, 56, 14));
        }
        if let Some(panel) = &self.policy {
            panel.render(frame, area);
        }
    }

    fn captures_input(&self) -> bool {
        self.deploy.is_some() || self.policy.is_some()
    }

    fn hints(&self) -> &'static str {
        "d deploy  s start  x stop  R restart  D remove  p policy  r reload"
    }

    fn id(&self) -> &'static str {
        "node-apps"
    }
}

/// Apps missing from the catalog fall back to their id.
fn display_name(row: &NodeAppRow) -> String {
    if row.name.is_empty() {
        row.id.clone()
    } else {
        row.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncatalogued_apps_show_their_id() {
        let row = NodeAppRow {
            id: "a9".into(),
            ..NodeAppRow::default()
        };
        assert_eq!(display_name(&row), "a9");
    }
}
