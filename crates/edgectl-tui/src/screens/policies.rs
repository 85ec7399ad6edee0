//! Traffic policies: list, add, edit. The document shape follows the
//! console's orchestration mode.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use edgectl_core::models::{PolicyDocument, PolicySummary};
use edgectl_core::{OrchestrationMode, PoliciesView, PolicyEditView, Route, ViewState, schema};

use crate::action::{Action, Confirm, Loaded, Pending};
use crate::component::{Component, ScreenCtx};
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::spinner::Spinner;
use crate::widgets::table::{Cursor, panel};

// ── List ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct PoliciesScreen {
    ctx: Option<ScreenCtx>,
    view: Option<PoliciesView>,
    cursor: Cursor,
    spinner: Spinner,
}

impl PoliciesScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn run(&self, delete: Option<String>) {
        let (Some(ctx), Some(view)) = (&self.ctx, &self.view) else {
            return;
        };
        let mut view = view.clone();
        ctx.spawn(async move {
            let outcome = match delete {
                Some(id) => view.delete(&id).await,
                None => view.load().await,
            };
            (Loaded::Policies(view), outcome)
        });
    }

    fn policies(&self) -> &[PolicySummary] {
        self.view
            .as_ref()
            .map(PoliciesView::policies)
            .unwrap_or_default()
    }
}

impl Component for PoliciesScreen {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        let console = ctx.console();
        self.view = Some(PoliciesView::new(console.controller(), console.orchestration()));
        self.ctx = Some(ctx);
        self.run(None);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.policies().len();
        if self.cursor.handle_key(key, len) {
            return Ok(None);
        }
        let selected = self.policies().get(self.cursor.selected());
        Ok(match key.code {
            KeyCode::Enter => selected.map(|p| Action::Navigate(Route::PolicyEdit { id: p.id.clone() })),
            KeyCode::Char('a') => Some(Action::Navigate(Route::PolicyAdd)),
            KeyCode::Char('D') | KeyCode::Delete => selected.map(|p| {
                Action::Confirm(Confirm {
                    prompt: format!("Delete policy {}?", p.name),
                    on_yes: Pending::DeletePolicy(p.id.clone()),
                })
            }),
            KeyCode::Char('r') => {
                self.run(None);
                None
            }
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.spinner.tick(),
            Action::Confirmed(Pending::DeletePolicy(id)) => self.run(Some(id.clone())),
            Action::Settled {
                loaded: Loaded::Policies(view),
                ..
            } => {
                self.view = Some(view.clone());
                let len = self.policies().len();
                self.cursor.clamp(len);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = &self.view else { return };
        if view.state().is_loading() {
            self.spinner.render(frame, area, "Loading policies...");
            return;
        }

        let header = Row::new(["Name", "ID"]).style(theme::table_header());
        let rows = view.policies().iter().map(|p| {
            Row::new(vec![Cell::from(p.name.clone()), Cell::from(p.id.clone())])
                .style(theme::table_row())
        });
        let table = Table::new(rows, [Constraint::Fill(2), Constraint::Fill(3)])
            .header(header)
            .block(panel(&format!("Traffic Policies ({})", view.policies().len())))
            .row_highlight_style(theme::table_selected());
        frame.render_stateful_widget(table, area, &mut self.cursor.state());
    }

    fn hints(&self) -> &'static str {
        "Enter edit  a add  D delete  r reload"
    }

    fn id(&self) -> &'static str {
        "policies"
    }
}

// ── Editor ────────────────────────────────────────────────────────────

/// `/policies/add` and `/policies/:id/edit`. The form opens as soon as
/// the document (or a blank one) is loaded.
pub struct PolicyEditScreen {
    policy_id: Option<String>,
    mode: OrchestrationMode,
    ctx: Option<ScreenCtx>,
    view: Option<PolicyEditView>,
    form: Option<Form>,
    saving: bool,
    spinner: Spinner,
}

enum EditOp {
    Load,
    Save(PolicyDocument),
    Delete,
}

impl PolicyEditScreen {
    pub fn new(policy_id: Option<String>) -> Self {
        Self {
            policy_id,
            mode: OrchestrationMode::default(),
            ctx: None,
            view: None,
            form: None,
            saving: false,
            spinner: Spinner::default(),
        }
    }

    fn run(&self, op: EditOp) {
        let (Some(ctx), Some(view)) = (&self.ctx, &self.view) else {
            return;
        };
        let mut view = view.clone();
        ctx.spawn(async move {
            let outcome = match op {
                EditOp::Load => view.load().await,
                EditOp::Save(doc) => view.save(doc).await,
                EditOp::Delete => view.delete().await,
            };
            (Loaded::PolicyEdit(view), outcome)
        });
    }

    fn open_form(&mut self) {
        let Some(ViewState::Loaded(doc)) = self.view.as_ref().map(PolicyEditView::state) else {
            return;
        };
        let value = serde_json::to_value(doc).unwrap_or_default();
        self.form = Some(Form::new(schema::policy_for(self.mode), &value));
    }

    fn title(&self) -> String {
        match &self.policy_id {
            Some(id) => format!("Edit policy {id}"),
            None => "Add policy".into(),
        }
    }
}

impl Component for PolicyEditScreen {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        let console = ctx.console();
        self.mode = console.orchestration();
        self.view = Some(PolicyEditView::new(
            console.controller(),
            self.mode,
            self.policy_id.clone(),
        ));
        self.ctx = Some(ctx);
        self.run(EditOp::Load);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.saving {
            return Ok(None);
        }
        if key.code == KeyCode::Char('d') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(self.policy_id.as_ref().map(|id| {
                Action::Confirm(Confirm {
                    prompt: format!("Delete policy {id}?"),
                    on_yes: Pending::DeletePolicy(id.clone()),
                })
            }));
        }

        let Some(form) = &mut self.form else {
            return Ok(None);
        };
        match form.handle_key(key) {
            FormEvent::Submitted(value) => match PolicyDocument::from_value(self.mode, value) {
                Ok(doc) => {
                    self.saving = true;
                    self.run(EditOp::Save(doc));
                }
                Err(e) => form.set_error(format!("Invalid policy: {e}")),
            },
            FormEvent::Cancelled => return Ok(Some(Action::Navigate(Route::Policies))),
            FormEvent::Consumed => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.spinner.tick(),
            Action::Confirmed(Pending::DeletePolicy(_)) => self.run(EditOp::Delete),
            Action::Settled {
                loaded: Loaded::PolicyEdit(view),
                outcome,
                ..
            } => {
                let saved = std::mem::take(&mut self.saving) && outcome.is_ok();
                self.view = Some(view.clone());
                if self.form.is_none() || saved {
                    self.open_form();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = &self.view else { return };
        match (view.state(), &self.form) {
            (ViewState::Loading, _) => self.spinner.render(frame, area, "Loading policy..."),
            (_, Some(form)) => form.render(frame, area),
            (_, None) => frame.render_widget(
                Paragraph::new(Line::styled("Policy unavailable", theme::error_text()))
                    .block(panel(&self.title())),
                area,
            ),
        }
    }

    fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    fn hints(&self) -> &'static str {
        "Enter save  Ctrl+d delete  Esc back"
    }

    fn id(&self) -> &'static str {
        "policy-edit"
    }
}
