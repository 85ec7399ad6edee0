use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use edgectl_core::models::Node;
use edgectl_core::{NodeView, ViewState, schema};

use crate::action::{Action, Loaded};
use crate::component::{Component, ScreenCtx};
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::spinner::Spinner;
use crate::widgets::table::{centered, panel};

/// Node details with an edit form.
pub struct DashboardTab {
    node_id: String,
    ctx: Option<ScreenCtx>,
    view: Option<NodeView>,
    edit: Option<Form>,
    saving: bool,
    spinner: Spinner,
}

enum Op {
    Load,
    Save(Node),
}

impl DashboardTab {
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
                Op::Save(node) => view.save(node).await,
            };
            (Loaded::Node(view), outcome)
        });
    }

    fn submit(&mut self, value: serde_json::Value) {
        match serde_json::from_value::<Node>(value) {
            Ok(node) => {
                self.saving = true;
                self.run(Op::Save(node));
            }
            Err(e) => {
                if let Some(form) = &mut self.edit {
                    form.set_error(format!("Invalid node: {e}"));
                }
            }
        }
    }
}

impl Component for DashboardTab {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        self.view = Some(NodeView::new(ctx.console().controller(), &self.node_id));
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
                let node = self.view.as_ref().and_then(|v| v.state().data());
                if let Some(node) = node {
                    let value = serde_json::to_value(node).unwrap_or_default();
                    self.edit = Some(Form::new(schema::node(), &value));
                }
            }
            KeyCode::Char('r') => self.run(Op::Load),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.spinner.tick(),
            Action::Settled {
                loaded: Loaded::Node(view),
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
        let node = match view.state() {
            ViewState::Loading => {
                self.spinner.render(frame, area, "Loading node...");
                return;
            }
            ViewState::LoadedWithError(_) => {
                frame.render_widget(
                    Paragraph::new(Line::styled("Node details unavailable", theme::error_text()))
                        .block(panel(&format!("Node {}", self.node_id))),
                    area,
                );
                return;
            }
            ViewState::Loaded(node) => node,
        };

        let row = |label: &str, value: &str| {
            Line::from(vec![
                Span::styled(format!("{label:>10}  "), theme::key_hint()),
                Span::styled(value.to_owned(), theme::table_row()),
            ])
        };
        let lines = vec![
            row("ID", &node.id),
            row("Name", &node.name),
            row("Location", &node.location),
            row("Serial", &node.serial),
        ];
        frame.render_widget(Paragraph::new(lines).block(panel(&node.name)), area);

        if let Some(form) = &self.edit {
            form.render(frame, centered(area, 64, 12));
        }
    }

    fn captures_input(&self) -> bool {
        self.edit.is_some()
    }

    fn hints(&self) -> &'static str {
        "←/→ tab  e edit  r reload"
    }

    fn id(&self) -> &'static str {
        "node-dashboard"
    }
}
