//! Policy assignment overlay for one node app or interface.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use edgectl_core::models::PolicySummary;
use edgectl_core::{Outcome, PolicyControls, PolicyResource};

use crate::action::{Action, Confirm, Loaded, Pending};
use crate::component::ScreenCtx;
use crate::theme;
use crate::widgets::picker::{Picker, PickerEvent};
use crate::widgets::table::{centered, panel};

pub enum PanelEvent {
    Close,
    Emit(Action),
    Consumed,
}

pub struct PolicyPanel {
    label: String,
    controls: PolicyControls,
    choices: Option<Vec<PolicySummary>>,
    picker: Option<Picker>,
}

impl PolicyPanel {
    /// Open the panel and start loading the current assignment and the
    /// policy catalog.
    pub fn open(
        ctx: &ScreenCtx,
        node_id: &str,
        resource: PolicyResource,
        resource_id: &str,
        label: String,
    ) -> Self {
        let console = ctx.console();
        let controls = PolicyControls::new(
            console.controller(),
            console.orchestration(),
            node_id,
            resource,
            resource_id,
        );

        let mut loading = controls.clone();
        ctx.spawn(async move {
            let outcome = loading.load().await;
            (Loaded::Controls(loading), outcome)
        });
        let catalog = controls.clone();
        ctx.spawn(async move {
            match catalog.choices().await {
                Ok(list) => (Loaded::PolicyChoices(list), Outcome::none()),
                Err(e) => (Loaded::PolicyChoices(Vec::new()), Outcome::failure(&e, None)),
            }
        });

        Self {
            label,
            controls,
            choices: None,
            picker: None,
        }
    }

    pub fn handle_key(&mut self, ctx: &ScreenCtx, key: KeyEvent) -> PanelEvent {
        if let Some(picker) = &mut self.picker {
            match picker.handle_key(key) {
                PickerEvent::Picked(policy_id) => {
                    self.picker = None;
                    let mut controls = self.controls.clone();
                    ctx.spawn(async move {
                        let outcome = controls.assign(&policy_id).await;
                        (Loaded::Controls(controls), outcome)
                    });
                }
                PickerEvent::Cancelled => self.picker = None,
                PickerEvent::Consumed => {}
            }
            return PanelEvent::Consumed;
        }

        match key.code {
            KeyCode::Esc => PanelEvent::Close,
            KeyCode::Char('a') | KeyCode::Enter => {
                if let Some(choices) = &self.choices {
                    let items = choices
                        .iter()
                        .map(|p| (p.id.clone(), p.name.clone()))
                        .collect();
                    self.picker = Some(Picker::new(
                        format!("{} policy", self.controls.label()),
                        items,
                    ));
                }
                PanelEvent::Consumed
            }
            KeyCode::Char('x') if self.controls.can_remove() => {
                PanelEvent::Emit(Action::Confirm(Confirm {
                    prompt: format!("Remove the policy from {}?", self.label),
                    on_yes: Pending::RemovePolicyAssignment,
                }))
            }
            _ => PanelEvent::Consumed,
        }
    }

    /// The user confirmed removal.
    pub fn remove(&self, ctx: &ScreenCtx) {
        let mut controls = self.controls.clone();
        ctx.spawn(async move {
            let outcome = controls.remove().await;
            (Loaded::Controls(controls), outcome)
        });
    }

    pub fn update(&mut self, loaded: &Loaded) {
        match loaded {
            Loaded::Controls(controls)
                if controls.resource_id() == self.controls.resource_id() =>
            {
                self.controls = controls.clone();
            }
            Loaded::PolicyChoices(list) => self.choices = Some(list.clone()),
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog = centered(area, 60, 8);
        frame.render_widget(Clear, dialog);

        let assigned = if self.controls.state().is_loading() {
            "loading...".to_owned()
        } else {
            match self.controls.policy_id() {
                Some(id) => self
                    .choices
                    .as_ref()
                    .and_then(|list| list.iter().find(|p| p.id == id))
                    .map_or_else(|| id.to_owned(), |p| format!("{} ({id})", p.name)),
                None => "none".to_owned(),
            }
        };

        let mut hints = vec![
            Span::styled("a", theme::key_hint_key()),
            Span::styled(format!(" {} policy  ", self.controls.label()), theme::key_hint()),
        ];
        if self.controls.can_remove() {
            hints.push(Span::styled("x", theme::key_hint_key()));
            hints.push(Span::styled(" remove  ", theme::key_hint()));
        }
        hints.push(Span::styled("Esc", theme::key_hint_key()));
        hints.push(Span::styled(" close", theme::key_hint()));

        let lines = vec![
            Line::from(vec![
                Span::styled("Resource  ", theme::key_hint()),
                Span::styled(self.label.clone(), theme::table_row()),
            ]),
            Line::from(vec![
                Span::styled("Policy    ", theme::key_hint()),
                Span::styled(assigned, theme::table_row()),
            ]),
            Line::from(""),
            Line::from(hints),
        ];
        frame.render_widget(Paragraph::new(lines).block(panel("Policy")), dialog);

        if let Some(picker) = &self.picker {
            picker.render(frame, centered(area, 56, 12));
        }
    }
}
