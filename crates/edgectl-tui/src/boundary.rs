//! Error boundary around screen rendering.
//!
//! A screen that panics while drawing is replaced by a fallback panel;
//! the header, status bar, and every other route keep working.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::component::Component;
use crate::theme;

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Whether this build can catch a panic at all. Under `panic = "abort"`
/// the process dies regardless, so the terminal must be restored first.
pub const CATCHES_PANICS: bool = cfg!(panic = "unwind");

/// Whether the current thread is rendering inside the boundary.
pub fn is_active() -> bool {
    ACTIVE.with(Cell::get)
}

/// Whether a panic raised right now will be caught by the boundary and
/// the terminal stays usable afterwards.
pub fn contains_panic() -> bool {
    CATCHES_PANICS && is_active()
}

/// Render `screen`, catching a panic and returning its message.
pub fn render_guarded(screen: &dyn Component, frame: &mut Frame, area: Rect) -> Result<(), String> {
    ACTIVE.with(|a| a.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(|| screen.render(frame, area)));
    ACTIVE.with(|a| a.set(false));
    result.map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".into()
    }
}

pub fn render_fallback(frame: &mut Frame, area: Rect, screen_id: &str, message: &str) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {screen_id} "))
        .title_style(theme::title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::error_text());

    let text = vec![
        Line::from(Span::styled("Something went wrong.", theme::error_text())),
        Line::from(""),
        Line::from(Span::styled(message.to_owned(), theme::table_row())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" go back  ", theme::key_hint()),
            Span::styled("1-3", theme::key_hint_key()),
            Span::styled(" switch screen", theme::key_hint()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    struct Broken;

    impl Component for Broken {
        fn render(&self, _frame: &mut Frame, _area: Rect) {
            panic!("table index out of range");
        }

        fn id(&self) -> &'static str {
            "broken"
        }
    }

    struct Fine;

    impl Component for Fine {
        fn render(&self, frame: &mut Frame, area: Rect) {
            frame.render_widget(Paragraph::new("all good"), area);
        }

        fn id(&self) -> &'static str {
            "fine"
        }
    }

    struct Recording<'a>(&'a AtomicBool);

    impl Component for Recording<'_> {
        fn render(&self, _frame: &mut Frame, _area: Rect) {
            self.0.store(contains_panic(), Ordering::SeqCst);
            panic!("after recording");
        }

        fn id(&self) -> &'static str {
            "recording"
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn panicking_screen_is_caught_and_replaced() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let mut caught = None;
        terminal
            .draw(|frame| {
                let area = frame.area();
                if let Err(message) = render_guarded(&Broken, frame, area) {
                    render_fallback(frame, area, Broken.id(), &message);
                    caught = Some(message);
                }
            })
            .unwrap();

        assert_eq!(caught.as_deref(), Some("table index out of range"));
        assert!(!is_active());
        let text = buffer_text(&terminal);
        assert!(text.contains("Something went wrong."));
        assert!(text.contains("broken"));
    }

    #[test]
    fn panics_are_contained_only_inside_the_boundary() {
        assert!(!contains_panic());

        let seen = AtomicBool::new(false);
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut result = Ok(());
        terminal
            .draw(|frame| {
                let area = frame.area();
                result = render_guarded(&Recording(&seen), frame, area);
            })
            .unwrap();

        assert!(seen.load(Ordering::SeqCst));
        assert_eq!(result, Err("after recording".to_owned()));
        assert!(!contains_panic());
    }

    #[test]
    fn healthy_screen_renders_normally() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut result = Ok(());
        terminal
            .draw(|frame| {
                let area = frame.area();
                result = render_guarded(&Fine, frame, area);
            })
            .unwrap();

        assert!(result.is_ok());
        assert!(buffer_text(&terminal).contains("all good"));
    }
}
