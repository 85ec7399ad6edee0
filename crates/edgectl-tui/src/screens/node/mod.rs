//! `/nodes/:id/...`: one node, four tabs. Switching tabs navigates, so
//! each tab is a fresh screen with its own load.

mod apps;
mod dashboard;
mod dns;
mod interfaces;
mod policy;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Tabs;

use edgectl_core::{NodeTab, Route};

use crate::action::Action;
use crate::component::{Component, ScreenCtx};
use crate::theme;

const TABS: [NodeTab; 4] = [
    NodeTab::Dashboard,
    NodeTab::Apps,
    NodeTab::Interfaces,
    NodeTab::Dns,
];

fn tab_title(tab: NodeTab) -> &'static str {
    match tab {
        NodeTab::Dashboard => "Dashboard",
        NodeTab::Apps => "Apps",
        NodeTab::Interfaces => "Interfaces",
        NodeTab::Dns => "DNS",
    }
}

pub struct NodeScreen {
    node_id: String,
    tab: NodeTab,
    body: Box<dyn Component>,
}

impl NodeScreen {
    pub fn new(node_id: &str, tab: NodeTab) -> Self {
        let body: Box<dyn Component> = match tab {
            NodeTab::Dashboard => Box::new(dashboard::DashboardTab::new(node_id)),
            NodeTab::Apps => Box::new(apps::AppsTab::new(node_id)),
            NodeTab::Interfaces => Box::new(interfaces::InterfacesTab::new(node_id)),
            NodeTab::Dns => Box::new(dns::DnsTab::new(node_id)),
        };
        Self {
            node_id: node_id.to_owned(),
            tab,
            body,
        }
    }

    fn neighbour(&self, forward: bool) -> Action {
        let len = TABS.len();
        let current = TABS.iter().position(|t| *t == self.tab).unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        Action::Navigate(Route::Node {
            id: self.node_id.clone(),
            tab: TABS.get(next).copied().unwrap_or_default(),
        })
    }
}

impl Component for NodeScreen {
    fn init(&mut self, ctx: ScreenCtx) -> Result<()> {
        self.body.init(ctx)
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.body.captures_input() {
            match key.code {
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                    return Ok(Some(self.neighbour(true)));
                }
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                    return Ok(Some(self.neighbour(false)));
                }
                _ => {}
            }
        }
        self.body.handle_key_event(key)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        self.body.update(action)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [bar, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

        let selected = TABS.iter().position(|t| *t == self.tab).unwrap_or(0);
        let tabs = Tabs::new(TABS.iter().map(|t| Line::from(tab_title(*t))))
            .select(selected)
            .style(theme::tab(false))
            .highlight_style(theme::tab(true))
            .divider("│");
        frame.render_widget(tabs, bar);
        self.body.render(frame, body);
    }

    fn captures_input(&self) -> bool {
        self.body.captures_input()
    }

    fn hints(&self) -> &'static str {
        self.body.hints()
    }

    fn id(&self) -> &'static str {
        self.body.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_keys_navigate_between_node_routes() {
        let screen = NodeScreen::new("n1", NodeTab::Dns);
        let Action::Navigate(next) = screen.neighbour(true) else {
            panic!("expected navigation");
        };
        assert_eq!(next.to_string(), "/nodes/n1");

        let Action::Navigate(prev) = screen.neighbour(false) else {
            panic!("expected navigation");
        };
        assert_eq!(
            prev,
            Route::Node {
                id: "n1".into(),
                tab: NodeTab::Interfaces
            }
        );
    }
}
