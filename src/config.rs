use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Toml(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GamezillaConfig {
    #[serde(flatten)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    /// Fixed seed for filler names
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_catalog_size")]
    pub catalog_size: usize,
    /// Roots searched for launch targets, in order
    #[serde(default = "default_archive_dirs")]
    pub archive_dirs: Vec<String>,
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default = "default_loading_delay")]
    pub loading_delay_ms: u64,
    #[serde(default)]
    pub debug: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed: None,
            catalog_size: default_catalog_size(),
            archive_dirs: default_archive_dirs(),
            interpreter: default_interpreter(),
            loading_delay_ms: default_loading_delay(),
            debug: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub disable_mouse: bool,
    #[serde(default)]
    pub rounded_borders: bool,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
    #[serde(default = "default_real_color")]
    pub real_color: String,
    #[serde(default = "default_white")]
    pub filler_color: String,
    #[serde(default = "default_white")]
    pub border_color: String,
    #[serde(default = "default_status_color")]
    pub status_color: String,
    #[serde(default)]
    pub keybinds: crate::ui::Keybinds,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            disable_mouse: false,
            rounded_borders: false,
            highlight_color: default_highlight_color(),
            real_color: default_real_color(),
            filler_color: default_white(),
            border_color: default_white(),
            status_color: default_status_color(),
            keybinds: crate::ui::Keybinds::default(),
        }
    }
}

// Default value implementations for serde
fn default_catalog_size() -> usize {
    crate::catalog::DEFAULT_SIZE
}
fn default_archive_dirs() -> Vec<String> {
    vec!["archive".to_string(), "../archive".to_string(), ".".to_string()]
}
fn default_interpreter() -> String {
    "python3".to_string()
}
fn default_loading_delay() -> u64 {
    2000
}
fn default_page_size() -> usize {
    10
}
fn default_highlight_color() -> String {
    "Red".to_string()
}
fn default_real_color() -> String {
    "LightGreen".to_string()
}
fn default_white() -> String {
    "White".to_string()
}
fn default_status_color() -> String {
    "Green".to_string()
}

impl GamezillaConfig {
    pub fn new(cli_config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Priority: CLI arg > XDG config dir > defaults
        let cli_provided = cli_config_path.is_some();
        let config_path = if let Some(path) = cli_config_path {
            Some(path)
        } else {
            ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))
                .map(|dirs| dirs.config_dir().join("config.toml"))
        };

        let mut cfg: GamezillaConfig = match config_path {
            Some(ref path) if path.exists() => Self::parse(&fs::read_to_string(path)?)?,
            Some(ref path) if cli_provided => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Config file not found at {}", path.display()),
                )
                .into());
            }
            _ => GamezillaConfig::default(),
        };

        cfg.apply_env(|key| env::var(key).ok());
        Ok(cfg)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Override with GAMEZILLA_* environment variables
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GAMEZILLA_SEED") {
            self.general.seed = val.parse().ok().or(self.general.seed);
        }
        if let Some(val) = var("GAMEZILLA_CATALOG_SIZE") {
            self.general.catalog_size = val.parse().unwrap_or(self.general.catalog_size);
        }
        if let Some(val) = var("GAMEZILLA_ARCHIVE_DIRS") {
            self.general.archive_dirs = val
                .split(':')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(val) = var("GAMEZILLA_INTERPRETER") {
            self.general.interpreter = val;
        }
        if let Some(val) = var("GAMEZILLA_LOADING_DELAY_MS") {
            self.general.loading_delay_ms = val.parse().unwrap_or(self.general.loading_delay_ms);
        }
        if let Some(val) = var("GAMEZILLA_DEBUG") {
            self.general.debug = val.parse().unwrap_or(self.general.debug);
        }
        if let Some(val) = var("GAMEZILLA_PAGE_SIZE") {
            self.ui.page_size = val.parse().unwrap_or(self.ui.page_size);
        }
        if let Some(val) = var("GAMEZILLA_DISABLE_MOUSE") {
            self.ui.disable_mouse = val.parse().unwrap_or(self.ui.disable_mouse);
        }
        if let Some(val) = var("GAMEZILLA_HIGHLIGHT_COLOR") {
            self.ui.highlight_color = val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = GamezillaConfig::parse("").unwrap();
        assert_eq!(cfg.general.catalog_size, 500);
        assert_eq!(cfg.general.seed, None);
        assert_eq!(cfg.general.interpreter, "python3");
        assert_eq!(cfg.general.archive_dirs, vec!["archive", "../archive", "."]);
        assert_eq!(cfg.ui.page_size, 10);
        assert!(!cfg.ui.disable_mouse);
    }

    #[test]
    fn test_partial_file() {
        let cfg = GamezillaConfig::parse(
            r##"
            seed = 1998
            archive_dirs = ["/srv/disc"]

            [ui]
            page_size = 15
            highlight_color = "#ff0000"

            [ui.keybinds]
            quit = ["x", { key = "c", modifiers = "ctrl" }]
            "##,
        )
        .unwrap();
        assert_eq!(cfg.general.seed, Some(1998));
        assert_eq!(cfg.general.archive_dirs, vec!["/srv/disc"]);
        assert_eq!(cfg.general.catalog_size, 500);
        assert_eq!(cfg.ui.page_size, 15);
        assert_eq!(cfg.ui.highlight_color, "#ff0000");
        assert!(cfg
            .ui
            .keybinds
            .matches_quit(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!cfg
            .ui
            .keybinds
            .matches_quit(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(cfg
            .ui
            .keybinds
            .matches_up(KeyCode::Up, KeyModifiers::NONE));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(matches!(
            GamezillaConfig::parse("page_size = [ 10"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut cfg = GamezillaConfig::parse("seed = 1\ncatalog_size = 600").unwrap();
        cfg.apply_env(|key| match key {
            "GAMEZILLA_SEED" => Some("7".to_string()),
            "GAMEZILLA_CATALOG_SIZE" => Some("not a number".to_string()),
            "GAMEZILLA_ARCHIVE_DIRS" => Some("/a::/b".to_string()),
            _ => None,
        });
        assert_eq!(cfg.general.seed, Some(7));
        assert_eq!(cfg.general.catalog_size, 600);
        assert_eq!(cfg.general.archive_dirs, vec!["/a", "/b"]);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = GamezillaConfig::new(Some(PathBuf::from("/nonexistent/gamezilla.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
