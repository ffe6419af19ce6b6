// keybind configuration

use crossterm::event::{KeyCode, KeyModifiers};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Keybinds {
    #[serde(default = "default_up")]
    pub up: Vec<KeyBind>,
    #[serde(default = "default_down")]
    pub down: Vec<KeyBind>,
    #[serde(default = "default_next_page")]
    pub next_page: Vec<KeyBind>,
    #[serde(default = "default_prev_page")]
    pub prev_page: Vec<KeyBind>,
    #[serde(default = "default_launch")]
    pub launch: Vec<KeyBind>,
    #[serde(default = "default_quit")]
    pub quit: Vec<KeyBind>,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            up: default_up(),
            down: default_down(),
            next_page: default_next_page(),
            prev_page: default_prev_page(),
            launch: default_launch(),
            quit: default_quit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeyBind {
    Simple(String),
    WithMod { key: String, modifiers: String },
}

impl KeyBind {
    pub fn matches(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        match self {
            KeyBind::Simple(key) => {
                // terminals report capital letters with SHIFT held
                let shifted_char =
                    matches!(code, KeyCode::Char(c) if c.is_uppercase()) && mods == KeyModifiers::SHIFT;
                parse_key(key) == code && (mods == KeyModifiers::NONE || shifted_char)
            }
            KeyBind::WithMod { key, modifiers } => {
                parse_key(key) == code && mods == parse_modifiers(modifiers)
            }
        }
    }
}

fn parse_key(key: &str) -> KeyCode {
    match key.to_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        _ => {
            // single characters keep their case: "q" and "Q" are different keys
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => KeyCode::Null,
            }
        }
    }
}

fn parse_modifiers(mods: &str) -> KeyModifiers {
    let mut result = KeyModifiers::NONE;
    for part in mods.split('+') {
        match part.trim().to_lowercase().as_str() {
            "ctrl" | "control" => result |= KeyModifiers::CONTROL,
            "shift" => result |= KeyModifiers::SHIFT,
            "alt" => result |= KeyModifiers::ALT,
            _ => {}
        }
    }
    result
}

fn simple(keys: &[&str]) -> Vec<KeyBind> {
    keys.iter().map(|k| KeyBind::Simple(k.to_string())).collect()
}

fn ctrl(key: &str) -> KeyBind {
    KeyBind::WithMod {
        key: key.to_string(),
        modifiers: "ctrl".to_string(),
    }
}

fn default_up() -> Vec<KeyBind> {
    let mut binds = simple(&["up", "k"]);
    binds.push(ctrl("p"));
    binds
}

fn default_down() -> Vec<KeyBind> {
    let mut binds = simple(&["down", "j"]);
    binds.push(ctrl("n"));
    binds
}

fn default_next_page() -> Vec<KeyBind> {
    simple(&["n", "N", "right", "pagedown"])
}

fn default_prev_page() -> Vec<KeyBind> {
    simple(&["p", "P", "left", "pageup"])
}

fn default_launch() -> Vec<KeyBind> {
    simple(&["enter"])
}

fn default_quit() -> Vec<KeyBind> {
    let mut binds = simple(&["q", "Q", "esc"]);
    binds.push(ctrl("c"));
    binds
}

impl Keybinds {
    pub fn matches_up(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.up.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_down(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.down.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_next_page(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.next_page.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_prev_page(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.prev_page.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_launch(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.launch.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_quit(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.quit.iter().any(|kb| kb.matches(code, mods))
    }
}
