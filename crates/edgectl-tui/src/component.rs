//! The trait every screen implements, and the handle screens use to
//! reach the console and run work off the UI loop.

use std::future::Future;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use edgectl_core::{Console, Outcome};

use crate::action::{Action, Loaded};

pub trait Component: Send {
    /// Called once after the screen is mounted. Screens kick off their
    /// initial load here.
    fn init(&mut self, _ctx: ScreenCtx) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// True while a text field owns the keyboard, so single-letter
    /// global shortcuts must not fire.
    fn captures_input(&self) -> bool {
        false
    }

    /// Key hints shown in the status bar.
    fn hints(&self) -> &'static str {
        ""
    }

    fn id(&self) -> &'static str;
}

/// A mounted screen's handle on the console.
///
/// Every task spawned through it is stamped with the generation of the
/// screen that started it.
#[derive(Clone)]
pub struct ScreenCtx {
    console: Arc<Console>,
    tx: UnboundedSender<Action>,
    generation: u64,
}

impl ScreenCtx {
    pub fn new(console: Arc<Console>, tx: UnboundedSender<Action>, generation: u64) -> Self {
        Self {
            console,
            tx,
            generation,
        }
    }

    pub fn console(&self) -> &Arc<Console> {
        &self.console
    }

    /// Run a view operation in the background and deliver its result as
    /// [`Action::Settled`].
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = (Loaded, Outcome)> + Send + 'static,
    {
        let tx = self.tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let (loaded, outcome) = task.await;
            let _ = tx.send(Action::Settled {
                generation,
                loaded,
                outcome,
            });
        });
    }

    pub fn send(&self, action: Action) {
        let _ = self.tx.send(action);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use edgectl_core::{Console, ConsoleConfig, MemorySessionStore};

    /// Console pointed at a closed port. Good for anything that never
    /// reaches the network.
    #[allow(clippy::unwrap_used)]
    pub fn offline_console() -> Arc<Console> {
        let url = edgectl_config::parse_url("controller_url", "http://127.0.0.1:9").unwrap();
        let console = Console::new(
            ConsoleConfig::new(url),
            Arc::new(MemorySessionStore::new()),
            None,
        )
        .unwrap();
        Arc::new(console)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use edgectl_core::Outcome;
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn spawned_work_carries_its_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ctx = ScreenCtx::new(testing::offline_console(), tx, 7);

        ctx.spawn(async { (Loaded::PolicyChoices(Vec::new()), Outcome::success("done")) });

        let Some(Action::Settled {
            generation,
            outcome,
            ..
        }) = rx.recv().await
        else {
            panic!("expected a settled action");
        };
        assert_eq!(generation, 7);
        assert!(outcome.is_ok());
    }
}
