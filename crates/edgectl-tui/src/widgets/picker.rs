//! Pop-up list for choosing one item by id: the deploy picker and the
//! policy picker.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Clear, Paragraph, Row, Table};

use crate::theme;
use crate::widgets::table::{Cursor, panel};

#[derive(Debug, PartialEq, Eq)]
pub enum PickerEvent {
    Picked(String),
    Cancelled,
    Consumed,
}

#[derive(Debug, Clone)]
pub struct Picker {
    title: String,
    /// `(id, label)` pairs.
    items: Vec<(String, String)>,
    cursor: Cursor,
}

impl Picker {
    pub fn new(title: impl Into<String>, items: Vec<(String, String)>) -> Self {
        let mut cursor = Cursor::default();
        cursor.clamp(items.len());
        Self {
            title: title.into(),
            items,
            cursor,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerEvent {
        if self.cursor.handle_key(key, self.items.len()) {
            return PickerEvent::Consumed;
        }
        match key.code {
            KeyCode::Esc => PickerEvent::Cancelled,
            KeyCode::Enter => self
                .items
                .get(self.cursor.selected())
                .map_or(PickerEvent::Consumed, |(id, _)| {
                    PickerEvent::Picked(id.clone())
                }),
            _ => PickerEvent::Consumed,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = panel(&self.title);
        if self.items.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled("Nothing to choose from", theme::key_hint()))
                    .block(block),
                area,
            );
            return;
        }
        let rows = self.items.iter().map(|(id, label)| {
            Row::new(vec![Cell::from(label.clone()), Cell::from(id.clone())])
                .style(theme::table_row())
        });
        let table = Table::new(rows, [Constraint::Fill(2), Constraint::Fill(1)])
            .block(block)
            .row_highlight_style(theme::table_selected());
        frame.render_stateful_widget(table, area, &mut self.cursor.state());
    }
}
