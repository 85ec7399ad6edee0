//! Login form. On success the app returns to the route the guard
//! remembered.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use secrecy::SecretString;

use edgectl_core::{LoginOutcome, Route};

use crate::action::{Action, Loaded};
use crate::component::{Component, ScreenCtx};
use crate::theme;
use crate::widgets::spinner::Spinner;
use crate::widgets::table::{centered, panel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

pub struct LoginScreen {
    ctx: Option<ScreenCtx>,
    username: String,
    password: String,
    field: Field,
    /// Helper line under the form: validation or the server's reason.
    error: Option<String>,
    busy: bool,
    spinner: Spinner,
}

impl LoginScreen {
    pub fn new(username: Option<String>) -> Self {
        let field = if username.is_some() {
            Field::Password
        } else {
            Field::Username
        };
        Self {
            ctx: None,
            username: username.unwrap_or_default(),
            password: String::new(),
            field,
            error: None,
            busy: false,
            spinner: Spinner::default(),
        }
    }

    fn input(&mut self) -> &mut String {
        match self.field {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    fn submit(&mut self) {
        if self.username.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Username and password are required".into());
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        self.error = None;
        self.busy = true;
        let console = ctx.console().clone();
        let username = self.username.trim().to_owned();
        let password = SecretString::from(self.password.clone());
        ctx.spawn(async move {
            let outcome = console.login(&username, &password).await;
            (Loaded::Login(outcome), edgectl_core::Outcome::none())
        });
    }
}

impl Component for LoginScreen {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        self.ctx = Some(ctx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.busy {
            return Ok(None);
        }
        match key.code {
            KeyCode::Esc => return Ok(Some(Action::Navigate(Route::Landing))),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = match self.field {
                    Field::Username => Field::Password,
                    Field::Password => Field::Username,
                };
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input().push(c);
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if self.busy => self.spinner.tick(),
            Action::Settled {
                loaded: Loaded::Login(outcome),
                ..
            } => {
                self.busy = false;
                match outcome {
                    LoginOutcome::Success => return Ok(Some(Action::LoggedIn)),
                    LoginOutcome::Failure { error_text } => {
                        self.error = Some(error_text.clone());
                        self.password.clear();
                        self.field = Field::Password;
                    }
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog = centered(area, 56, 11);
        let block = panel("Log in");
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(inner);

        let field_line = |label: &str, value: String, active: bool| {
            let label_style = if active {
                theme::title()
            } else {
                theme::key_hint()
            };
            let mut spans = vec![
                Span::styled(format!("{label:>10}  "), label_style),
                Span::styled(value, theme::table_row()),
            ];
            if active && !self.busy {
                spans.push(Span::styled("\u{2588}", theme::title()));
            }
            Line::from(spans)
        };

        frame.render_widget(
            Paragraph::new(field_line(
                "Username",
                self.username.clone(),
                self.field == Field::Username,
            )),
            rows[1],
        );
        frame.render_widget(
            Paragraph::new(field_line(
                "Password",
                "•".repeat(self.password.chars().count()),
                self.field == Field::Password,
            )),
            rows[2],
        );

        if self.busy {
            self.spinner.render(frame, rows[3], "Logging in...");
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Line::styled(format!("✗ {error}"), theme::error_text())),
                rows[3],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Enter", theme::key_hint_key()),
                Span::styled(" log in  ", theme::key_hint()),
                Span::styled("Tab", theme::key_hint_key()),
                Span::styled(" switch field  ", theme::key_hint()),
                Span::styled("Esc", theme::key_hint_key()),
                Span::styled(" back", theme::key_hint()),
            ])),
            rows[4],
        );
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn id(&self) -> &'static str {
        "login"
    }
}
