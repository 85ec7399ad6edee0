//! Stack of transient notifications in the bottom-right corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use edgectl_core::Notification;

use crate::theme;

pub const TOAST_TTL: Duration = Duration::from_secs(3);
const MAX_VISIBLE: usize = 4;
const TOAST_WIDTH: u16 = 48;

#[derive(Debug, Default)]
pub struct Toasts {
    items: VecDeque<(Notification, Instant)>,
}

impl Toasts {
    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    fn push_at(&mut self, notification: Notification, at: Instant) {
        self.items.push_back((notification, at));
        while self.items.len() > MAX_VISIBLE {
            self.items.pop_front();
        }
    }

    /// Drop every toast shown for longer than [`TOAST_TTL`].
    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|(_, shown)| now.saturating_duration_since(*shown) < TOAST_TTL);
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let mut bottom = area.bottom().saturating_sub(1);

        // Newest toast sits lowest.
        for (notification, _) in self.items.iter().rev() {
            if bottom < area.y + 3 {
                break;
            }
            let rect = Rect::new(area.right().saturating_sub(width + 1), bottom - 3, width, 3);
            bottom -= 3;

            let (color, icon) = theme::level(notification.level);
            let line = Line::from(vec![
                Span::styled(format!("{icon} "), Style::default().fg(color)),
                Span::styled(notification.message.clone(), theme::table_row()),
            ]);
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(line).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color)),
                ),
                rect,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_at(Notification::success("Node saved"), start);
        toasts.push_at(Notification::error("Deploy failed"), start + Duration::from_secs(2));

        toasts.prune(start + Duration::from_secs(1));
        assert_eq!(toasts.count(), 2);

        toasts.prune(start + TOAST_TTL);
        assert_eq!(toasts.count(), 1);

        toasts.prune(start + Duration::from_secs(5));
        assert_eq!(toasts.count(), 0);
    }

    #[test]
    fn stack_keeps_only_the_newest() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        for i in 0..6 {
            toasts.push_at(Notification::info(format!("toast {i}")), start);
        }
        assert_eq!(toasts.count(), MAX_VISIBLE);
        assert_eq!(toasts.items.front().map(|(n, _)| n.message.as_str()), Some("toast 2"));
    }
}
