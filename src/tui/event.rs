//! Event handling for the TUI
//!
//! Terminal events (key presses, mouse, resize) are read on a background
//! thread with crossterm; the expense fetch posts its result into the same
//! queue, so the render loop is the only place state changes.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::fetch::FetchOutcome;

/// Events consumed by the render loop
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick event for spinner and transitions
    Tick,
    /// The expense fetch settled
    ExpensesLoaded(FetchOutcome),
    /// Terminal input can no longer be read
    InputClosed,
}

/// Event handler for terminal events
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    #[allow(dead_code)]
    handler: Option<thread::JoinHandle<()>>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handler = {
            let sender = sender.clone();
            thread::spawn(move || {
                let mut last_tick = Instant::now();
                loop {
                    let timeout = tick_rate
                        .checked_sub(last_tick.elapsed())
                        .unwrap_or(Duration::ZERO);

                    let ready = match event::poll(timeout) {
                        Ok(ready) => ready,
                        Err(_) => {
                            let _ = sender.send(Event::InputClosed);
                            return;
                        }
                    };

                    if ready {
                        let forwarded = match event::read() {
                            Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                            Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                            Ok(CrosstermEvent::Resize(width, height)) => {
                                Some(Event::Resize(width, height))
                            }
                            Ok(_) => None,
                            Err(_) => Some(Event::InputClosed),
                        };
                        if let Some(event) = forwarded {
                            if sender.send(event).is_err() {
                                return;
                            }
                        }
                    }

                    if last_tick.elapsed() >= tick_rate {
                        if sender.send(Event::Tick).is_err() {
                            return;
                        }
                        last_tick = Instant::now();
                    }
                }
            })
        };

        Self {
            sender,
            receiver,
            handler: Some(handler),
        }
    }

    /// A queue without the terminal reader, fed only by other producers
    pub fn detached() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            handler: None,
        }
    }

    /// Split into the posting and receiving ends
    ///
    /// The queue closes once every sender, including the reader thread's,
    /// has been dropped.
    pub fn into_parts(self) -> (mpsc::Sender<Event>, mpsc::Receiver<Event>) {
        (self.sender, self.receiver)
    }
}
