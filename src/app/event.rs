//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the frame loop never blocks on input.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a blocking task that polls the terminal and forwards events
/// through the returned channel.  The task ends once the receiver is
/// dropped.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        match event::poll(poll_interval) {
            Ok(true) => {}
            Ok(false) => {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            Err(err) => {
                tracing::warn!(%err, "terminal poll failed; stopping event reader");
                break;
            }
        }
        let app_event = match event::read() {
            Ok(CtEvent::Key(k)) => AppEvent::Key(k),
            Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
            Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!(%err, "terminal read failed");
                continue;
            }
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
