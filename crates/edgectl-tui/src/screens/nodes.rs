//! Edge node list with the add-node dialog.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Cell, Row, Table};
use serde_json::json;

use edgectl_core::models::NewNode;
use edgectl_core::schema;
use edgectl_core::{NodeTab, NodesView, Route};

use crate::action::{Action, Loaded};
use crate::component::{Component, ScreenCtx};
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::spinner::Spinner;
use crate::widgets::table::{Cursor, centered, panel};

#[derive(Default)]
pub struct NodesScreen {
    ctx: Option<ScreenCtx>,
    view: Option<NodesView>,
    cursor: Cursor,
    spinner: Spinner,
    add: Option<Form>,
    saving: bool,
}

impl NodesScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&self) {
        let (Some(ctx), Some(view)) = (&self.ctx, &self.view) else {
            return;
        };
        let mut view = view.clone();
        ctx.spawn(async move {
            let outcome = view.load().await;
            (Loaded::Nodes(view), outcome)
        });
    }

    fn submit_add(&mut self, value: serde_json::Value) {
        let node: NewNode = match serde_json::from_value(value) {
            Ok(node) => node,
            Err(e) => {
                if let Some(form) = &mut self.add {
                    form.set_error(format!("Invalid node: {e}"));
                }
                return;
            }
        };
        let (Some(ctx), Some(view)) = (&self.ctx, &self.view) else {
            return;
        };
        self.saving = true;
        let mut view = view.clone();
        ctx.spawn(async move {
            let outcome = view.add(&node).await;
            (Loaded::Nodes(view), outcome)
        });
    }

    fn selected_id(&self) -> Option<String> {
        let view = self.view.as_ref()?;
        view.nodes().get(self.cursor.selected()).map(|n| n.id.clone())
    }

    fn len(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.nodes().len())
    }
}

impl Component for NodesScreen {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        self.view = Some(NodesView::new(ctx.console().controller()));
        self.ctx = Some(ctx);
        self.load();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(form) = &mut self.add {
            if self.saving {
                return Ok(None);
            }
            match form.handle_key(key) {
                FormEvent::Submitted(value) => self.submit_add(value),
                FormEvent::Cancelled => self.add = None,
                FormEvent::Consumed => {}
            }
            return Ok(None);
        }

        let len = self.len();
        if self.cursor.handle_key(key, len) {
            return Ok(None);
        }
        Ok(match key.code {
            KeyCode::Enter => self.selected_id().map(|id| {
                Action::Navigate(Route::Node {
                    id,
                    tab: NodeTab::Dashboard,
                })
            }),
            KeyCode::Char('a') => {
                self.add = Some(Form::new(schema::node_add(), &json!({})));
                None
            }
            KeyCode::Char('r') => {
                self.load();
                None
            }
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.spinner.tick(),
            Action::Settled {
                loaded: Loaded::Nodes(view),
                outcome,
                ..
            } => {
                if self.saving {
                    self.saving = false;
                    if outcome.is_ok() {
                        self.add = None;
                    }
                }
                self.view = Some(view.clone());
                let len = self.len();
                self.cursor.clamp(len);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = &self.view else { return };
        if view.state().is_loading() {
            self.spinner.render(frame, area, "Loading edge nodes...");
            return;
        }

        let header = Row::new(["Name", "Location", "Serial", "ID"]).style(theme::table_header());
        let rows = view.nodes().iter().map(|n| {
            Row::new(vec![
                Cell::from(n.name.clone()),
                Cell::from(n.location.clone()),
                Cell::from(n.serial.clone()),
                Cell::from(n.id.clone()),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Fill(1),
                Constraint::Fill(2),
            ],
        )
        .header(header)
        .block(panel(&format!("Edge Nodes ({})", view.nodes().len())))
        .row_highlight_style(theme::table_selected());
        frame.render_stateful_widget(table, area, &mut self.cursor.state());

        if let Some(form) = &self.add {
            form.render(frame, centered(area, 64, 12));
        }
    }

    fn captures_input(&self) -> bool {
        self.add.is_some()
    }

    fn hints(&self) -> &'static str {
        "Enter open  a add  r reload"
    }

    fn id(&self) -> &'static str {
        "nodes"
    }
}
