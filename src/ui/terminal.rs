//! Terminal ownership
//!
//! [`Display`] bundles the ratatui terminal with the input reader. Both are
//! released before a program is launched and reacquired afterwards through
//! [`suspended`], which restores them even if the launch unwinds.

use super::browser_ui::UI;
use super::input::{Config as InputConfig, Event, Input};
use super::types::Theme;
use crate::catalog::Entry;
use crossterm::event::KeyEvent;
use eyre::{eyre, Result, WrapErr};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use scopeguard::ScopeGuard;
use std::io;
use std::time::Duration;

/// A resource that can be handed away and taken back
pub trait Suspend {
    fn release(&mut self) -> Result<()>;
    fn reacquire(&mut self) -> Result<()>;
}

/// Release `resource`, run `run`, then reacquire it on every exit path.
pub fn suspended<S, T>(resource: &mut S, run: impl FnOnce() -> T) -> Result<T>
where
    S: Suspend + ?Sized,
{
    if let Err(e) = resource.release() {
        // half-released is worse than either state
        let _ = resource.reacquire();
        return Err(e);
    }

    let guard = scopeguard::guard(resource, |resource| {
        // only reached when `run` unwinds
        let _ = resource.reacquire();
    });
    let out = run();
    ScopeGuard::into_inner(guard).reacquire()?;
    Ok(out)
}

pub struct Display {
    terminal: Terminal<CrosstermBackend<io::Stderr>>,
    input: Option<Input>,
    input_config: InputConfig,
    disable_mouse: bool,
    pub theme: Theme,
    loading_delay: Duration,
}

impl Display {
    /// Attach to a terminal already put in raw mode by [`crate::setup_terminal`]
    pub fn new(disable_mouse: bool, theme: Theme, loading_delay: Duration) -> Result<Self> {
        let backend = CrosstermBackend::new(io::stderr());
        let mut terminal = Terminal::new(backend).wrap_err("Failed to start crossterm terminal")?;
        terminal.hide_cursor().wrap_err("Failed to hide cursor")?;
        terminal.clear().wrap_err("Failed to clear terminal")?;

        let input_config = InputConfig {
            disable_mouse,
            ..InputConfig::default()
        };

        Ok(Self {
            terminal,
            input: Some(input_config.init()),
            input_config,
            disable_mouse,
            theme,
            loading_delay,
        })
    }

    pub fn size(&self) -> Result<Rect> {
        let size = self.terminal.size().wrap_err("Failed to read terminal size")?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render).wrap_err("Failed to draw")?;
        Ok(())
    }

    /// Block until the user does something
    pub fn next_event(&self) -> Result<Event<KeyEvent>> {
        self.input
            .as_ref()
            .ok_or_else(|| eyre!("input reader is released"))?
            .next()
            .wrap_err("input reader stopped")
    }

    /// Show the loading splash for `entry`, then run `program` with the terminal released
    pub fn hand_off<T>(&mut self, entry: &Entry, program: impl FnOnce() -> T) -> Result<T> {
        let theme = self.theme;
        self.draw(|f| UI::render_loading(f, entry, &theme))?;
        std::thread::sleep(self.loading_delay);
        suspended(self, program)
    }
}

impl Suspend for Display {
    fn release(&mut self) -> Result<()> {
        // joins the reader thread so it can't eat the program's input
        self.input = None;
        self.terminal.show_cursor().wrap_err("Failed to show cursor")?;
        crate::shutdown_terminal(self.disable_mouse);
        Ok(())
    }

    fn reacquire(&mut self) -> Result<()> {
        crate::setup_terminal(self.disable_mouse)?;
        self.terminal.clear().wrap_err("Failed to clear terminal")?;
        self.terminal.hide_cursor().wrap_err("Failed to hide cursor")?;
        if self.input.is_none() {
            self.input = Some(self.input_config.init());
        }
        Ok(())
    }
}
