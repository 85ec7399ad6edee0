//! Busy indicator for screens waiting on the controller.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::theme;

#[derive(Debug, Clone, Default)]
pub struct Spinner {
    state: ThrobberState,
}

impl Spinner {
    /// Advance one frame. Call on every tick while busy.
    pub fn tick(&mut self) {
        self.state.calc_next();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str) {
        let throbber = Throbber::default()
            .label(format!(" {label}"))
            .style(Style::default().fg(theme::SKY))
            .throbber_style(Style::default().fg(theme::TEAL));
        frame.render_stateful_widget(throbber, area, &mut self.state.clone());
    }
}
