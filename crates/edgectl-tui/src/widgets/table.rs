//! Row selection shared by every list screen, plus the panel chrome.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::widgets::{Block, BorderType, Borders, TableState};

use crate::theme;

const PAGE: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct Cursor {
    state: TableState,
}

impl Cursor {
    pub fn selected(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    /// Handle a movement key over `len` rows. Returns false for keys
    /// that are not movement.
    pub fn handle_key(&mut self, key: KeyEvent, len: usize) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let last = len.saturating_sub(1);
        let current = self.selected();
        let next = match key.code {
            KeyCode::Char('j') | KeyCode::Down => (current + 1).min(last),
            KeyCode::Char('k') | KeyCode::Up => current.saturating_sub(1),
            KeyCode::Char('g') | KeyCode::Home => 0,
            KeyCode::Char('G') | KeyCode::End => last,
            KeyCode::Char('d') if ctrl => (current + PAGE).min(last),
            KeyCode::Char('u') if ctrl => current.saturating_sub(PAGE),
            _ => return false,
        };
        self.state.select((len > 0).then_some(next));
        true
    }

    /// Keep the selection inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.state.select(None);
        } else {
            self.state.select(Some(self.selected().min(len - 1)));
        }
    }

    /// Snapshot for `render_stateful_widget`.
    pub fn state(&self) -> TableState {
        self.state.clone()
    }
}

/// A `width` x `height` box centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn movement_stays_in_bounds() {
        let mut cursor = Cursor::default();
        cursor.clamp(3);
        assert!(cursor.handle_key(key(KeyCode::Char('k')), 3));
        assert_eq!(cursor.selected(), 0);

        cursor.handle_key(key(KeyCode::Char('G')), 3);
        assert_eq!(cursor.selected(), 2);
        cursor.handle_key(key(KeyCode::Char('j')), 3);
        assert_eq!(cursor.selected(), 2);

        cursor.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), 3);
        assert_eq!(cursor.selected(), 0);
        assert!(!cursor.handle_key(key(KeyCode::Char('x')), 3));
    }

    #[test]
    fn clamp_follows_a_shrinking_list() {
        let mut cursor = Cursor::default();
        cursor.handle_key(key(KeyCode::Char('G')), 10);
        cursor.clamp(4);
        assert_eq!(cursor.selected(), 3);
        cursor.clamp(0);
        assert_eq!(cursor.state().selected(), None);
    }
}
