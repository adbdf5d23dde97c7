//! User input events.
//!
//! Terminal input is read on a dedicated thread and forwarded over a channel
//! to the main loop, so the loop only ever wakes for complete events. The
//! reader polls with a short timeout instead of blocking in `read()`: once a
//! selection is made the reader must be stopped before anything is injected
//! into the terminal's input queue, or it would swallow the injected bytes.
//!
//! # Submodules
//!
//! - `keys`: mapping of key presses to editing and navigation intents

pub mod keys;

use std::io::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::mpsc::{self, Receiver};
use tracing::warn;

/// Type alias for user input events from the terminal.
///
/// Key presses, bracketed pastes and resizes are handled; everything else is
/// ignored by the session.
pub type UserEvent = crossterm::event::Event;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const EVENT_BUFFER: usize = 64;

/// Receiving end of the input reader thread.
pub struct UserEvents {
    rx: Receiver<Result<UserEvent>>,
    stop: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

/// Initializes the user event stream.
///
/// Creates a bounded channel and spawns a dedicated thread that reads
/// terminal events and forwards them, so the async loop never blocks on the
/// terminal.
///
/// # Returns
///
/// A [`UserEvents`] handle. Its `recv` yields `Result<UserEvent>` items; the
/// `Result` carries I/O errors from reading the terminal.
///
/// # Implementation Details
///
/// The thread waits in `crossterm::event::poll` for at most 50 ms at a time
/// and checks the stop flag between waits. It exits when the flag is set,
/// when the receiver is closed or after the first read error. Call
/// [`UserEvents::shutdown`] before writing into the terminal's input queue.
pub fn init_user_event() -> UserEvents {
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();

    let reader = thread::spawn(move || {
        while !stop_flag.load(Ordering::Relaxed) {
            match crossterm::event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    // Nothing more will come from a broken terminal.
                    if tx.blocking_send(Err(e)).is_err() {
                        warn!("Input reader error after receiver closed");
                    }
                    break;
                }
            }
            if tx.blocking_send(crossterm::event::read()).is_err() {
                break;
            }
        }
    });

    UserEvents {
        rx,
        stop,
        reader: Some(reader),
    }
}

impl UserEvents {
    /// Next input event, or `None` once the reader has stopped.
    pub async fn recv(&mut self) -> Option<Result<UserEvent>> {
        self.rx.recv().await
    }

    /// Stop the reader thread and wait for it to exit.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.rx.close();
        if let Some(reader) = self.reader.take() {
            if reader.join().is_err() {
                warn!("Input reader thread panicked");
            }
        }
    }
}

impl Drop for UserEvents {
    fn drop(&mut self) {
        self.shutdown();
    }
}
