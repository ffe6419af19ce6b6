mod browser_ui;
mod input;
mod keybinds;
mod terminal;
mod types;

pub use browser_ui::{ScreenLayout, UI};
pub use input::Event as InputEvent;
pub use keybinds::Keybinds;
pub use terminal::Display;
pub use types::*;
