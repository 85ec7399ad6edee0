//! App catalog: the list with add and delete, and the per-app editor.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use serde_json::json;

use edgectl_core::models::App;
use edgectl_core::{AppView, AppsView, Route, ViewState, schema};

use crate::action::{Action, Confirm, Loaded, Pending};
use crate::component::{Component, ScreenCtx};
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::spinner::Spinner;
use crate::widgets::table::{Cursor, centered, panel};

fn parse_app(form: &mut Form, value: serde_json::Value) -> Option<App> {
    match serde_json::from_value(value) {
        Ok(app) => Some(app),
        Err(e) => {
            form.set_error(format!("Invalid app: {e}"));
            None
        }
    }
}

// ── List ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct AppsScreen {
    ctx: Option<ScreenCtx>,
    view: Option<AppsView>,
    cursor: Cursor,
    spinner: Spinner,
    add: Option<Form>,
    saving: bool,
}

enum ListOp {
    Load,
    Create(App),
    Delete(String),
}

impl AppsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn run(&self, op: ListOp) {
        let (Some(ctx), Some(view)) = (&self.ctx, &self.view) else {
            return;
        };
        let mut view = view.clone();
        ctx.spawn(async move {
            let outcome = match op {
                ListOp::Load => view.load().await,
                ListOp::Create(app) => view.create(&app).await,
                ListOp::Delete(id) => view.delete(&id).await,
            };
            (Loaded::Apps(view), outcome)
        });
    }

    fn apps(&self) -> &[App] {
        self.view.as_ref().map(AppsView::apps).unwrap_or_default()
    }
}

impl Component for AppsScreen {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        self.view = Some(AppsView::new(ctx.console().controller()));
        self.ctx = Some(ctx);
        self.run(ListOp::Load);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(form) = &mut self.add {
            if self.saving {
                return Ok(None);
            }
            match form.handle_key(key) {
                FormEvent::Submitted(value) => {
                    if let Some(app) = parse_app(form, value) {
                        self.saving = true;
                        self.run(ListOp::Create(app));
                    }
                }
                FormEvent::Cancelled => self.add = None,
                FormEvent::Consumed => {}
            }
            return Ok(None);
        }

        let len = self.apps().len();
        if self.cursor.handle_key(key, len) {
            return Ok(None);
        }
        let selected = self.apps().get(self.cursor.selected());
        Ok(match key.code {
            KeyCode::Enter => selected.map(|app| Action::Navigate(Route::App { id: app.id.clone() })),
            KeyCode::Char('D') | KeyCode::Delete => selected.map(|app| {
                Action::Confirm(Confirm {
                    prompt: format!("Delete app {}?", app.name),
                    on_yes: Pending::DeleteApp(app.id.clone()),
                })
            }),
            KeyCode::Char('a') => {
                self.add = Some(Form::new(schema::app(), &json!({ "type": "container" })));
                None
            }
            KeyCode::Char('r') => {
                self.run(ListOp::Load);
                None
            }
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.spinner.tick(),
            Action::Confirmed(Pending::DeleteApp(id)) => self.run(ListOp::Delete(id.clone())),
            Action::Settled {
                loaded: Loaded::Apps(view),
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
                let len = self.apps().len();
                self.cursor.clamp(len);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = &self.view else { return };
        if view.state().is_loading() {
            self.spinner.render(frame, area, "Loading apps...");
            return;
        }

        let header = Row::new(["Name", "Version", "Vendor", "Type", "Cores", "Memory", "ID"])
            .style(theme::table_header());
        let rows = view.apps().iter().map(|a| {
            Row::new(vec![
                Cell::from(a.name.clone()),
                Cell::from(a.version.clone()),
                Cell::from(a.vendor.clone()),
                Cell::from(a.kind.to_string()),
                Cell::from(a.cores.to_string()),
                Cell::from(format!("{} MB", a.memory)),
                Cell::from(a.id.clone()),
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
                Constraint::Length(6),
                Constraint::Length(10),
                Constraint::Fill(2),
            ],
        )
        .header(header)
        .block(panel(&format!("Apps ({})", view.apps().len())))
        .row_highlight_style(theme::table_selected());
        frame.render_stateful_widget(table, area, &mut self.cursor.state());

        if let Some(form) = &self.add {
            form.render(frame, centered(area, 76, 18));
        }
    }

    fn captures_input(&self) -> bool {
        self.add.is_some()
    }

    fn hints(&self) -> &'static str {
        "Enter open  a add  D delete  r reload"
    }

    fn id(&self) -> &'static str {
        "apps"
    }
}

// ── Detail ────────────────────────────────────────────────────────────

pub struct AppScreen {
    app_id: String,
    ctx: Option<ScreenCtx>,
    view: Option<AppView>,
    edit: Option<Form>,
    saving: bool,
    spinner: Spinner,
}

enum DetailOp {
    Load,
    Save(App),
}

impl AppScreen {
    pub fn new(app_id: &str) -> Self {
        Self {
            app_id: app_id.to_owned(),
            ctx: None,
            view: None,
            edit: None,
            saving: false,
            spinner: Spinner::default(),
        }
    }

    fn run(&self, op: DetailOp) {
        let (Some(ctx), Some(view)) = (&self.ctx, &self.view) else {
            return;
        };
        let mut view = view.clone();
        ctx.spawn(async move {
            let outcome = match op {
                DetailOp::Load => view.load().await,
                DetailOp::Save(app) => view.save(app).await,
            };
            (Loaded::App(view), outcome)
        });
    }
}

impl Component for AppScreen {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        self.view = Some(AppView::new(ctx.console().controller(), &self.app_id));
        self.ctx = Some(ctx);
        self.run(DetailOp::Load);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(form) = &mut self.edit {
            if self.saving {
                return Ok(None);
            }
            match form.handle_key(key) {
                FormEvent::Submitted(value) => {
                    if let Some(app) = parse_app(form, value) {
                        self.saving = true;
                        self.run(DetailOp::Save(app));
                    }
                }
                FormEvent::Cancelled => self.edit = None,
                FormEvent::Consumed => {}
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('e') => {
                let app = self.view.as_ref().and_then(|v| v.state().data());
                if let Some(app) = app {
                    let value = serde_json::to_value(app).unwrap_or_default();
                    self.edit = Some(Form::new(schema::app(), &value));
                }
            }
            KeyCode::Char('r') => self.run(DetailOp::Load),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.spinner.tick(),
            Action::Settled {
                loaded: Loaded::App(view),
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
        let app = match view.state() {
            ViewState::Loading => {
                self.spinner.render(frame, area, "Loading app...");
                return;
            }
            ViewState::LoadedWithError(_) => {
                frame.render_widget(
                    Paragraph::new(Line::styled("App details unavailable", theme::error_text()))
                        .block(panel(&format!("App {}", self.app_id))),
                    area,
                );
                return;
            }
            ViewState::Loaded(app) => app,
        };

        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{label:>12}  "), theme::key_hint()),
                Span::styled(value, theme::table_row()),
            ])
        };
        let ports = app
            .ports
            .iter()
            .map(|p| format!("{}/{}", p.port, p.protocol))
            .collect::<Vec<_>>()
            .join(", ");
        let epa = app
            .epa_features
            .iter()
            .map(|f| format!("{}={}", f.key, f.value))
            .collect::<Vec<_>>()
            .join(", ");
        let lines = vec![
            row("ID", app.id.clone()),
            row("Type", app.kind.to_string()),
            row("Version", app.version.clone()),
            row("Vendor", app.vendor.clone()),
            row("Description", app.description.clone()),
            row("Cores", app.cores.to_string()),
            row("Memory", format!("{} MB", app.memory)),
            row("Ports", ports),
            row("Source", app.source.clone()),
            row("EPA", epa),
        ];
        frame.render_widget(Paragraph::new(lines).block(panel(&app.name)), area);

        if let Some(form) = &self.edit {
            form.render(frame, centered(area, 76, 18));
        }
    }

    fn captures_input(&self) -> bool {
        self.edit.is_some()
    }

    fn hints(&self) -> &'static str {
        "e edit  r reload"
    }

    fn id(&self) -> &'static str {
        "app"
    }
}
