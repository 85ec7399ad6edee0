use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use edgectl_core::Route;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::table::{centered, panel};

/// Unknown paths, and CUPS / CNCA routes this console leaves to the CLI.
pub struct NotFoundScreen {
    title: &'static str,
    message: String,
}

impl NotFoundScreen {
    pub fn missing(path: &str) -> Self {
        Self {
            title: "Not found",
            message: format!("Nothing lives at {path}."),
        }
    }

    pub fn cli_only(route: &Route) -> Self {
        let command = match route {
            Route::Userplanes | Route::Userplane { .. } => "edgectl userplanes",
            Route::Services | Route::ServiceCreate | Route::Service { .. } => "edgectl pfd",
            _ => "edgectl subscriptions",
        };
        Self {
            title: "Use the CLI",
            message: format!("{route} is managed with `{command}`."),
        }
    }
}

impl Component for NotFoundScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match key.code {
            KeyCode::Enter => Some(Action::Navigate(Route::Root)),
            _ => None,
        })
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::styled(self.message.clone(), theme::table_row()),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", theme::key_hint_key()),
                Span::styled(" home  ", theme::key_hint()),
                Span::styled("Esc", theme::key_hint_key()),
                Span::styled(" back", theme::key_hint()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(panel(self.title)),
            centered(area, 64, 7),
        );
    }

    fn id(&self) -> &'static str {
        "not-found"
    }
}
