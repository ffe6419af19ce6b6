//! Terminal input reader
//!
//! A background thread polls crossterm and forwards key presses, mouse
//! events and resizes over a channel. The thread stops when the [`Input`] is
//! dropped, so nothing keeps reading the terminal while a launched program
//! owns it.

use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Builder for `Input`
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub poll_rate: Duration,
    pub disable_mouse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_rate: Duration::from_millis(50),
            disable_mouse: false,
        }
    }
}

impl Config {
    /// Creates a new `Input` with the configuration in `Self`
    pub fn init(self) -> Input {
        Input::with_config(self)
    }
}

#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Mouse(MouseEvent),
    Resize,
}

pub struct Input {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Input {
    pub fn with_config(config: Config) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let stop = stop.clone();

            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    if let Ok(true) = crossterm::event::poll(config.poll_rate) {
                        let Ok(event) = crossterm::event::read() else {
                            continue;
                        };
                        let forwarded = match event {
                            // Filter for KeyPress only (avoid duplicate events on some platforms)
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Some(Event::Input(key))
                            }
                            CrosstermEvent::Mouse(mouse) if !config.disable_mouse => {
                                Some(Event::Mouse(mouse))
                            }
                            CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                            _ => None,
                        };
                        if let Some(event) = forwarded {
                            if tx.send(event).is_err() {
                                return;
                            }
                        }
                    }
                }
            })
        };

        Self {
            rx,
            stop,
            handle: Some(handle),
        }
    }

    /// Next event from the user.
    pub fn next(&self) -> Result<Event<KeyEvent>, mpsc::RecvError> {
        self.rx.recv()
    }
}

impl Drop for Input {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
