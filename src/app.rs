//! Application event loop.
//!
//! `App` owns the [`Session`] and the input reader, waits for user events,
//! feeds them to the session and repaints whenever the session reports that
//! something on screen changed.

use anyhow::{Context, Result};
use tracing::{info, trace};

use crate::event::{init_user_event, UserEvents};
use crate::session::{Outcome, Session};
use crate::ui::terminal::{list_capacity, TuiTerminal};
use crate::ui::viewport::Redraw;
use crate::ui::cursor_position;

pub struct App {
    session: Session,
    user_events: UserEvents,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            user_events: init_user_event(),
        }
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> Result<()> {
        while !self.session.is_finished() {
            let event = self
                .user_events
                .recv()
                .await
                .context("User event stream is ended.")?
                .context("Failed to read terminal input")?;

            let redraw = self.session.handle_user_event(event);
            trace!("Redraw after event: {:?}", redraw);
            if redraw != Redraw::None {
                self.draw(terminal)?;
            }
        }
        Ok(())
    }

    pub fn draw(&mut self, terminal: &mut TuiTerminal) -> Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();

            // The frame may be a different size than the last resize event said.
            self.session.resize(list_capacity(area.height));
            self.session.prepare_frame();

            use ratatui::widgets::Widget;
            (&self.session).render(area, frame.buffer_mut());
            frame.set_cursor_position(cursor_position(&self.session, area));
        })?;
        Ok(())
    }

    /// Stop reading input and return what the user chose, if anything.
    pub fn finish(mut self) -> Option<Outcome> {
        self.user_events.shutdown();
        let outcome = self.session.outcome();
        info!("Session finished: {:?}", outcome.as_ref().map(|o| o.action));
        outcome
    }
}
