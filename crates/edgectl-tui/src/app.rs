//! Application core: event loop, routing, overlays, action dispatch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use edgectl_core::{Console, Notification, Resolution, Route, RouteGuard};

use crate::action::{Action, Confirm};
use crate::boundary;
use crate::component::{Component, ScreenCtx};
use crate::event::{Event, EventReader};
use crate::screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::table::centered;
use crate::widgets::toast::Toasts;

/// Top-level application state.
pub struct App {
    console: Arc<Console>,
    /// Prefills the login form.
    username: Option<String>,
    route: Route,
    /// Where the guard bounced us from; restored after login.
    from: Option<Route>,
    history: Vec<Route>,
    screen: Box<dyn Component>,
    /// Bumped on every navigation. Background results carrying an older
    /// value belong to a screen that is gone.
    generation: u64,
    /// Set when the current screen panicked while rendering.
    crashed: Option<String>,
    toasts: Toasts,
    confirm: Option<Confirm>,
    help_visible: bool,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(
        console: Arc<Console>,
        username: Option<String>,
        action_tx: mpsc::UnboundedSender<Action>,
        action_rx: mpsc::UnboundedReceiver<Action>,
    ) -> Self {
        Self {
            console,
            username,
            route: Route::Root,
            from: None,
            history: Vec::new(),
            screen: screens::create(&Route::Root, None),
            generation: 0,
            crashed: None,
            toasts: Toasts::default(),
            confirm: None,
            help_visible: false,
            running: true,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self, start: Route) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.navigate(start)?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // toast expiry, spinners
            Duration::from_millis(33),  // ~30 FPS
        );

        info!(route = %self.route, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.emit(action);
                    }
                }
                Event::Resize(w, h) => self.emit(Action::Resize(w, h)),
                Event::Tick => self.emit(Action::Tick),
                Event::Render => self.emit(Action::Render),
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    fn emit(&self, action: Action) {
        // The receiver lives in `self`, so this cannot fail while we run.
        let _ = self.action_tx.send(action);
    }

    // ── Routing ──────────────────────────────────────────────────────

    /// Push the current route onto the history, then go to `target`.
    fn navigate(&mut self, target: Route) -> Result<()> {
        if target != self.route && self.route != Route::Root {
            self.history.push(self.route.clone());
        }
        self.mount(target)
    }

    /// Resolve `target` through the guard and mount its screen.
    fn mount(&mut self, target: Route) -> Result<()> {
        let mut route = target;
        let route = loop {
            match RouteGuard::resolve(route, self.console.is_authenticated()) {
                Resolution::Render(resolved) => break resolved,
                Resolution::Redirect { to, from } => {
                    if from.is_some() {
                        self.from = from;
                    }
                    route = to;
                }
            }
        };

        debug!(from = %self.route, to = %route, "navigating");
        self.generation += 1;
        self.crashed = None;
        self.screen = screens::create(&route, self.username.as_deref());
        self.route = route;

        let ctx = ScreenCtx::new(
            Arc::clone(&self.console),
            self.action_tx.clone(),
            self.generation,
        );
        self.screen.init(ctx)
    }

    fn go_back(&mut self) -> Result<()> {
        match self.history.pop() {
            Some(previous) => self.mount(previous),
            None => Ok(()),
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Map a key to an action. Global keys are handled here; everything
    /// else goes to the mounted screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Confirmation dialog captures all input
        if let Some(confirm) = &self.confirm {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::Confirmed(confirm.on_yes.clone())),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.confirm = None;
                    None
                }
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        if self.crashed.is_none() && self.screen.captures_input() {
            return self.screen.handle_key_event(key);
        }

        let global = match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Esc => Some(Action::GoBack),
            KeyCode::Char('1') => Some(Action::Navigate(Route::Nodes)),
            KeyCode::Char('2') => Some(Action::Navigate(Route::Apps)),
            KeyCode::Char('3') => Some(Action::Navigate(Route::Policies)),
            KeyCode::Char('L') if self.console.is_authenticated() => Some(Action::Logout),
            _ => None,
        };
        if global.is_some() || self.crashed.is_some() {
            return Ok(global);
        }

        self.screen.handle_key_event(key)
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Render | Action::Resize(..) => {}

            Action::Tick => {
                self.toasts.prune(Instant::now());
                self.forward(action)?;
            }

            Action::Navigate(route) => self.navigate(route.clone())?,
            Action::GoBack => self.go_back()?,
            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Logout => {
                let console = Arc::clone(&self.console);
                let toasts = &mut self.toasts;
                console.logout(|| toasts.push(Notification::info("Logged out")));
                self.history.clear();
                self.from = None;
                self.navigate(Route::Login)?;
            }
            Action::LoggedIn => {
                let target = RouteGuard::after_login(self.from.take());
                info!(route = %target, "logged in");
                self.history.clear();
                self.navigate(target)?;
            }
            Action::SessionExpired => {
                if self.route != Route::Login {
                    self.toasts
                        .push(Notification::warning("Session expired, please log in again"));
                    if self.route.is_protected() {
                        self.from = Some(self.route.clone());
                    }
                    self.navigate(Route::Login)?;
                }
            }

            Action::Settled {
                generation,
                outcome,
                ..
            } => {
                if *generation != self.generation {
                    debug!(
                        stale = *generation,
                        current = self.generation,
                        "dropping result from an unmounted screen"
                    );
                    return Ok(());
                }
                for notification in &outcome.notifications {
                    self.toasts.push(notification.clone());
                }
                self.forward(action)?;
                if let Some(redirect) = &outcome.redirect {
                    if *redirect == Route::Login && self.route.is_protected() {
                        self.from = Some(self.route.clone());
                    }
                    self.navigate(redirect.clone())?;
                }
            }

            Action::Notify(notification) => self.toasts.push(notification.clone()),
            Action::Confirm(confirm) => self.confirm = Some(confirm.clone()),
            Action::Confirmed(_) => {
                self.confirm = None;
                self.forward(action)?;
            }
        }
        Ok(())
    }

    /// Let the mounted screen see an action.
    fn forward(&mut self, action: &Action) -> Result<()> {
        if self.crashed.is_some() {
            return Ok(());
        }
        if let Some(next) = self.screen.update(action)? {
            self.emit(next);
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header);

        if self.crashed.is_none() {
            if let Err(message) = boundary::render_guarded(self.screen.as_ref(), frame, body) {
                error!(screen = self.screen.id(), %message, "screen failed to render");
                self.crashed = Some(message);
            }
        }
        if let Some(message) = &self.crashed {
            boundary::render_fallback(frame, body, self.screen.id(), message);
        }

        self.render_status_bar(frame, status);

        if self.toasts.count() > 0 {
            self.toasts.render(frame, body);
        }
        if let Some(confirm) = &self.confirm {
            render_confirm(frame, body, confirm);
        }
        if self.help_visible {
            render_help(frame, body);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let session = if self.console.is_authenticated() {
            Span::styled("● signed in", Style::default().fg(theme::GREEN))
        } else {
            Span::styled("○ signed out", Style::default().fg(theme::MUTED))
        };
        let line = Line::from(vec![
            Span::styled(" edgectl ", theme::title()),
            Span::styled(format!("{}  ", self.route), theme::table_row()),
            session,
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        let hints = if self.crashed.is_some() {
            ""
        } else {
            self.screen.hints()
        };
        if !hints.is_empty() {
            spans.push(Span::styled(hints, theme::key_hint()));
            spans.push(Span::styled(" │ ", theme::key_hint()));
        }
        spans.push(Span::styled("? help  q quit", theme::key_hint()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn overlay(title: &str, color: ratatui::style::Color) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn render_confirm(frame: &mut Frame, area: Rect, confirm: &Confirm) {
    let rect = centered(area, 56, 5);
    let text = vec![
        Line::styled(format!(" {}", confirm.prompt), theme::table_row()),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y ", theme::key_hint_key()),
            Span::styled("confirm   ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(text).block(overlay("Confirm", theme::AMBER)),
        rect,
    );
}

const HELP: &[(&str, &str)] = &[
    ("1 2 3", "Nodes, apps, policies"),
    ("j k ↑ ↓", "Move selection"),
    ("g G", "First, last row"),
    ("Enter", "Open"),
    ("Tab h l", "Node tabs"),
    ("Esc", "Back / cancel"),
    ("r", "Reload"),
    ("L", "Log out"),
    ("?", "Toggle help"),
    ("q Ctrl+c", "Quit"),
];

fn render_help(frame: &mut Frame, area: Rect) {
    let height = u16::try_from(HELP.len()).unwrap_or(u16::MAX).saturating_add(4);
    let rect = centered(area, 48, height);
    let mut lines = vec![Line::from("")];
    lines.extend(HELP.iter().map(|(keys, what)| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
            Span::styled(*what, theme::table_row()),
        ])
    }));
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(overlay("Keyboard Shortcuts", theme::TEAL)),
        rect,
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use edgectl_core::Outcome;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::action::{Loaded, Pending};
    use crate::component::testing::offline_console;

    fn app() -> App {
        let (tx, rx) = mpsc::unbounded_channel();
        App::new(offline_console(), Some("admin".into()), tx, rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn settled(generation: u64, outcome: Outcome) -> Action {
        Action::Settled {
            generation,
            loaded: Loaded::PolicyChoices(Vec::new()),
            outcome,
        }
    }

    #[tokio::test]
    async fn protected_route_bounces_to_login_and_remembers_origin() {
        let mut app = app();
        app.navigate(Route::Apps).unwrap();

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.from, Some(Route::Apps));
        assert_eq!(app.screen.id(), "login");
    }

    #[tokio::test]
    async fn root_lands_on_the_landing_page() {
        let mut app = app();
        app.navigate(Route::Root).unwrap();
        assert_eq!(app.route, Route::Landing);
        assert_eq!(app.from, None);
    }

    #[tokio::test]
    async fn stale_results_are_dropped() {
        let mut app = app();
        app.navigate(Route::Login).unwrap();
        let stale = app.generation;
        app.navigate(Route::Landing).unwrap();

        app.process_action(&settled(stale, Outcome::success("old")))
            .unwrap();
        assert_eq!(app.toasts.count(), 0);

        app.process_action(&settled(app.generation, Outcome::success("fresh")))
            .unwrap();
        assert_eq!(app.toasts.count(), 1);
    }

    #[tokio::test]
    async fn outcome_redirect_is_followed() {
        let mut app = app();
        app.navigate(Route::Login).unwrap();

        let outcome = Outcome::none().with_redirect(Route::Landing);
        app.process_action(&settled(app.generation, outcome)).unwrap();

        assert_eq!(app.route, Route::Landing);
        assert_eq!(app.history, vec![Route::Login]);
    }

    #[tokio::test]
    async fn confirm_dialog_captures_keys() {
        let mut app = app();
        app.navigate(Route::Landing).unwrap();
        app.process_action(&Action::Confirm(Confirm {
            prompt: "Delete app a1?".into(),
            on_yes: Pending::DeleteApp("a1".into()),
        }))
        .unwrap();

        // Global keys are swallowed while the dialog is open.
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());

        let answer = app.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        let Some(Action::Confirmed(pending)) = answer else {
            panic!("expected a confirmation");
        };
        assert_eq!(pending, Pending::DeleteApp("a1".into()));

        app.process_action(&Action::Confirmed(pending)).unwrap();
        assert!(app.confirm.is_none());
    }

    #[tokio::test]
    async fn declining_closes_the_dialog() {
        let mut app = app();
        app.navigate(Route::Landing).unwrap();
        app.process_action(&Action::Confirm(Confirm {
            prompt: "Delete DNS?".into(),
            on_yes: Pending::DeleteDns,
        }))
        .unwrap();

        assert!(app.handle_key_event(key(KeyCode::Esc)).unwrap().is_none());
        assert!(app.confirm.is_none());
    }

    #[tokio::test]
    async fn escape_walks_back_through_history() {
        let mut app = app();
        app.navigate(Route::Landing).unwrap();
        app.navigate(Route::parse("/nowhere")).unwrap();
        assert_eq!(app.screen.id(), "not-found");

        let action = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(action, Some(Action::GoBack)));
        app.process_action(&Action::GoBack).unwrap();
        assert_eq!(app.route, Route::Landing);
        assert!(app.history.is_empty());
    }

    #[tokio::test]
    async fn number_keys_switch_sections() {
        let mut app = app();
        app.navigate(Route::Landing).unwrap();
        let action = app.handle_key_event(key(KeyCode::Char('2'))).unwrap();
        assert!(matches!(action, Some(Action::Navigate(Route::Apps))));
    }
}
