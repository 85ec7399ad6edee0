use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use edgectl_core::Route;

use crate::action::Action;
use crate::component::{Component, ScreenCtx};
use crate::theme;
use crate::widgets::table::{centered, panel};

/// Public start page: which controller this console talks to and
/// whether a session exists.
#[derive(Default)]
pub struct LandingScreen {
    summary: Vec<(&'static str, String)>,
    authenticated: bool,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for LandingScreen {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        let console = ctx.console();
        let cfg = console.config();
        self.authenticated = console.is_authenticated();
        self.summary = vec![
            ("Controller", cfg.controller_url.to_string()),
            ("CUPS", cfg.cups_url.as_ref().map_or_else(|| "-".into(), ToString::to_string)),
            ("CNCA", cfg.cnca_url.as_ref().map_or_else(|| "-".into(), ToString::to_string)),
            ("Orchestration", cfg.orchestration.to_string()),
            (
                "Session",
                if self.authenticated {
                    "logged in".into()
                } else {
                    "not logged in".into()
                },
            ),
        ];
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match key.code {
            KeyCode::Enter if self.authenticated => Some(Action::Navigate(Route::Nodes)),
            KeyCode::Enter => Some(Action::Navigate(Route::Login)),
            _ => None,
        })
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::styled("Edge Controller Console", theme::title()),
            Line::from(""),
        ];
        for (label, value) in &self.summary {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:>14}  "), theme::key_hint()),
                Span::styled(value.clone(), theme::table_row()),
            ]));
        }
        lines.push(Line::from(""));
        let next = if self.authenticated {
            " open edge nodes"
        } else {
            " log in"
        };
        lines.push(Line::from(vec![
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(next, theme::key_hint()),
        ]));

        let dialog = centered(area, 64, 12);
        frame.render_widget(Paragraph::new(lines).block(panel("Welcome")), dialog);
    }

    fn id(&self) -> &'static str {
        "landing"
    }
}
