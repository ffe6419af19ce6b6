//! Catalog browser mode

use super::launch::{activate, ArchiveLauncher, Outcome};
use crate::catalog::Catalog;
use crate::cli::Opts;
use crate::core::debug_logger;
use crate::core::state::{update, Message, NavigationState, Notice};
use crate::ui::{Button, Display, InputEvent as Event, Keybinds, ScreenLayout, UI};

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use eyre::{eyre, Result};
use is_terminal::IsTerminal;
use scopeguard::defer;
use std::io;

/// Run the interactive browser until the user quits
pub fn run(cli: &Opts, catalog: &Catalog) -> Result<()> {
    if !io::stderr().is_terminal() {
        return Err(eyre!("the browser needs a terminal on stderr"));
    }

    let mut state = NavigationState::starting(catalog.len(), cli.page_size);
    let mut launcher = ArchiveLauncher::new(cli.archive_dirs.clone(), cli.interpreter.clone());

    crate::setup_terminal(cli.disable_mouse)?;
    defer! {
        crate::shutdown_terminal(cli.disable_mouse);
    }
    let mut display = Display::new(cli.disable_mouse, cli.theme, cli.loading_delay)?;

    let mut notice: Option<Notice> = None;
    let mut status: Option<String> = None;

    while !state.should_exit {
        let layout = ScreenLayout::new(display.size()?, state.page_size);
        let theme = display.theme;

        display.draw(|f| {
            UI::render(f, &layout, &state, catalog, &theme, status.as_deref());
            if let Some(notice) = &notice {
                UI::render_notice(f, notice, &theme);
            }
        })?;

        let msg = match display.next_event()? {
            Event::Resize => continue,
            // any key or click closes a notice and is otherwise ignored
            Event::Input(_) if notice.is_some() => {
                notice = None;
                continue;
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(_),
                ..
            }) if notice.is_some() => {
                notice = None;
                continue;
            }
            Event::Mouse(_) if notice.is_some() => continue,
            Event::Input(key) => key_message(&cli.keybinds, key.code, key.modifiers),
            Event::Mouse(mouse) => mouse_message(&layout, mouse),
        };

        let Some(msg) = msg else { continue };
        status = None;

        if msg == Message::Activate {
            match activate(catalog, &state, &mut launcher, &mut display)? {
                Outcome::Returned { name } => {
                    debug_logger::log_event(&format!("returned from {}", name));
                    status = Some(format!(" Returned from {}", name));
                }
                Outcome::Notice(n) => notice = Some(n),
            }
        } else {
            update(&mut state, msg);
        }
    }

    Ok(())
}

/// Translate a key press
pub fn key_message(keybinds: &Keybinds, code: KeyCode, mods: KeyModifiers) -> Option<Message> {
    if keybinds.matches_quit(code, mods) {
        Some(Message::Quit)
    } else if keybinds.matches_launch(code, mods) {
        Some(Message::Activate)
    } else if keybinds.matches_up(code, mods) {
        Some(Message::MoveUp)
    } else if keybinds.matches_down(code, mods) {
        Some(Message::MoveDown)
    } else if keybinds.matches_next_page(code, mods) {
        Some(Message::NextPage)
    } else if keybinds.matches_prev_page(code, mods) {
        Some(Message::PrevPage)
    } else {
        None
    }
}

/// Translate a mouse event using the layout it was drawn with
pub fn mouse_message(layout: &ScreenLayout, mouse: MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(row) = layout.row_at(mouse.column, mouse.row) {
                return Some(Message::SelectAt(row));
            }
            layout
                .button_at(mouse.column, mouse.row)
                .map(|button| match button {
                    Button::Launch => Message::Activate,
                    Button::Prev => Message::PrevPage,
                    Button::Next => Message::NextPage,
                    Button::Quit => Message::Quit,
                })
        }
        MouseEventKind::ScrollUp => Some(Message::MoveUp),
        MouseEventKind::ScrollDown => Some(Message::MoveDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn layout() -> ScreenLayout {
        ScreenLayout::new(Rect::new(0, 0, 100, 30), 10)
    }

    #[test]
    fn test_default_keys() {
        let keys = Keybinds::default();
        let none = KeyModifiers::NONE;

        assert_eq!(key_message(&keys, KeyCode::Up, none), Some(Message::MoveUp));
        assert_eq!(key_message(&keys, KeyCode::Down, none), Some(Message::MoveDown));
        assert_eq!(key_message(&keys, KeyCode::Char('n'), none), Some(Message::NextPage));
        assert_eq!(
            key_message(&keys, KeyCode::Char('N'), KeyModifiers::SHIFT),
            Some(Message::NextPage)
        );
        assert_eq!(key_message(&keys, KeyCode::Char('p'), none), Some(Message::PrevPage));
        assert_eq!(key_message(&keys, KeyCode::Enter, none), Some(Message::Activate));
        assert_eq!(key_message(&keys, KeyCode::Char('q'), none), Some(Message::Quit));
        assert_eq!(key_message(&keys, KeyCode::Esc, none), Some(Message::Quit));
        assert_eq!(key_message(&keys, KeyCode::Char('z'), none), None);
    }

    #[test]
    fn test_click_on_rows() {
        let layout = layout();
        let list = layout.list;

        assert_eq!(
            mouse_message(&layout, click(list.x + 3, list.y)),
            Some(Message::SelectAt(0))
        );
        assert_eq!(
            mouse_message(&layout, click(list.x + 3, list.y + 5)),
            Some(Message::SelectAt(5))
        );
    }

    #[test]
    fn test_click_outside_list_is_ignored() {
        let layout = layout();
        assert_eq!(mouse_message(&layout, click(0, 0)), None);
        assert_eq!(
            mouse_message(&layout, click(layout.list.x, layout.list.y - 1)),
            None
        );
    }

    #[test]
    fn test_click_on_buttons() {
        let layout = layout();
        for (button, area) in layout.buttons {
            let expected = match button {
                Button::Launch => Message::Activate,
                Button::Prev => Message::PrevPage,
                Button::Next => Message::NextPage,
                Button::Quit => Message::Quit,
            };
            assert_eq!(
                mouse_message(&layout, click(area.x + 1, area.y)),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_scroll_moves_selection() {
        let layout = layout();
        let scroll = |kind| MouseEvent {
            kind,
            column: 5,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            mouse_message(&layout, scroll(MouseEventKind::ScrollUp)),
            Some(Message::MoveUp)
        );
        assert_eq!(
            mouse_message(&layout, scroll(MouseEventKind::ScrollDown)),
            Some(Message::MoveDown)
        );
        assert_eq!(mouse_message(&layout, scroll(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_clicks_drive_navigation() {
        let layout = layout();
        let mut state = NavigationState::new(500, 10, 386);

        let msg = mouse_message(&layout, click(layout.list.x + 1, layout.list.y + 2)).unwrap();
        update(&mut state, msg);
        assert_eq!(state.selected, 382);

        let (_, next) = layout.buttons[2];
        let msg = mouse_message(&layout, click(next.x, next.y)).unwrap();
        update(&mut state, msg);
        assert_eq!((state.selected, state.page), (390, 39));
    }
}
