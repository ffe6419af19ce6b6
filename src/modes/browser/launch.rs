// Program launching for real catalog entries

use crate::catalog::{Catalog, Entry};
use crate::core::debug_logger;
use crate::core::state::{resolve, Activation, NavigationState, Notice};
use crate::ui::Display;
use eyre::{Result, WrapErr};
use std::fmt;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;

/// Why a real entry couldn't be run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    /// No program file for the key
    NotFound { key: String, searched: Vec<PathBuf> },
    /// The program couldn't start or exited abnormally
    Failed { key: String, reason: String },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::NotFound { key, searched } => {
                write!(f, "{} not found (searched {} paths)", key, searched.len())
            }
            LaunchError::Failed { key, reason } => write!(f, "{} failed: {}", key, reason),
        }
    }
}

impl std::error::Error for LaunchError {}

/// Runs the program behind a launch key and blocks until it returns
pub trait Launcher {
    fn launch(&mut self, key: &str) -> Result<(), LaunchError>;
}

/// Gives up the terminal while a program runs
pub trait Handoff {
    fn handoff<T>(&mut self, entry: &Entry, program: impl FnOnce() -> T) -> Result<T>;
}

impl Handoff for Display {
    fn handoff<T>(&mut self, entry: &Entry, program: impl FnOnce() -> T) -> Result<T> {
        self.hand_off(entry, program)
    }
}

/// What an activation ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The program ran and returned normally
    Returned { name: String },
    Notice(Notice),
}

/// Activate the selected entry.
///
/// Filler entries never reach the launcher. Launch failures come back as a
/// [`Notice`]; only a selection outside the catalog or a terminal that can't
/// be restored is an error.
pub fn activate<L, H>(
    catalog: &Catalog,
    state: &NavigationState,
    launcher: &mut L,
    handoff: &mut H,
) -> Result<Outcome>
where
    L: Launcher,
    H: Handoff,
{
    let activation = resolve(catalog, state).wrap_err("selection is outside the catalog")?;

    let (entry, key) = match activation {
        Activation::NotInstalled(entry) => {
            debug_logger::log_launch(entry, "not installed");
            return Ok(Outcome::Notice(Notice::NotInstalled {
                number: entry.number,
                name: entry.name.clone(),
                file: entry.file_name(),
            }));
        }
        Activation::Launch { entry, key } => (entry, key),
    };

    let result = handoff.handoff(entry, || launcher.launch(key))?;

    let outcome = match result {
        Ok(()) => Outcome::Returned {
            name: entry.name.clone(),
        },
        Err(LaunchError::NotFound { searched, .. }) => Outcome::Notice(Notice::LaunchNotFound {
            name: entry.name.clone(),
            searched: searched.iter().map(|p| p.display().to_string()).collect(),
        }),
        Err(LaunchError::Failed { reason, .. }) => Outcome::Notice(Notice::LaunchFailed {
            name: entry.name.clone(),
            reason,
        }),
    };
    debug_logger::log_launch(entry, &format!("{:?}", outcome));
    Ok(outcome)
}

/// Where a launch key's program lives inside an archive root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub key: &'static str,
    pub dir: &'static str,
    pub main: &'static str,
    /// Archived documentation: show a notice instead of running anything
    pub docs: bool,
}

pub const TARGETS: &[Target] = &[
    Target { key: "v1", dir: "v1-doofenstein", main: "src/main.py", docs: false },
    Target { key: "v2", dir: "v2-immersive-sim", main: "src/main.py", docs: false },
    Target { key: "v3", dir: "v3-eastland", main: "src/main_pygame.py", docs: false },
    Target { key: "v4", dir: "v4-renderist", main: "src/main.py", docs: false },
    Target { key: "v5", dir: "v5-eastland", main: "src/main.py", docs: true },
    Target { key: "v6", dir: "v6-nextgen", main: "src/main.py", docs: false },
];

/// Launches programs from the disc's archive directories
#[derive(Debug, Clone)]
pub struct ArchiveLauncher {
    roots: Vec<PathBuf>,
    interpreter: String,
}

impl ArchiveLauncher {
    pub fn new(roots: Vec<PathBuf>, interpreter: String) -> Self {
        Self { roots, interpreter }
    }

    /// First existing program file for `key`
    pub fn locate(&self, key: &str) -> Result<(&'static Target, PathBuf), LaunchError> {
        let not_found = |searched| LaunchError::NotFound {
            key: key.to_string(),
            searched,
        };

        let Some(target) = TARGETS.iter().find(|t| t.key == key) else {
            return Err(not_found(Vec::new()));
        };

        let candidates: Vec<PathBuf> = self
            .roots
            .iter()
            .map(|root| root.join(target.dir).join(target.main))
            .collect();

        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Ok((target, path.clone())),
            None => Err(not_found(candidates)),
        }
    }

    fn run_program(&self, key: &str, path: &Path) -> Result<(), LaunchError> {
        let failed = |reason: String| LaunchError::Failed {
            key: key.to_string(),
            reason,
        };

        let words = shell_words::split(&self.interpreter)
            .map_err(|e| failed(format!("bad interpreter command: {}", e)))?;
        let Some((program, args)) = words.split_first() else {
            return Err(failed("no interpreter configured".to_string()));
        };
        let program =
            which::which(program).map_err(|e| failed(format!("{}: {}", program, e)))?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let file = path.file_name().unwrap_or(path.as_os_str());

        let status = process::Command::new(program)
            .args(args)
            .arg(file)
            .current_dir(dir)
            .status()
            .map_err(|e| failed(format!("could not start: {}", e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(failed(describe_exit(status)))
        }
    }

    fn show_docs(&self, key: &str, path: &Path) -> Result<(), LaunchError> {
        let root = path
            .parent()
            .and_then(Path::parent)
            .unwrap_or(Path::new("."));
        let rule = "=".repeat(70);

        println!("\n{}", rule);
        println!("EASTLAND MALL V5 - CRD RECONSTRUCTION (ARCHIVED)");
        println!("{}", rule);
        println!("\nV5 is a documentation/reconstruction project.");
        println!("V5 has been archived. Check {}/ for:", root.display());
        println!("  - PHOTO_CLASSIFICATION_TABLE_V1_COMPLETE.md");
        println!("  - MALL_MAP_V5_PROPOSAL.json");
        println!("  - README_ARCHITECTURAL_CONTEXT.md");
        println!("\nV5 measurements are now canonical foundation for V6.");
        println!("\nPress ENTER to continue...");

        io::stdin()
            .lock()
            .read_line(&mut String::new())
            .map(|_| ())
            .map_err(|e| LaunchError::Failed {
                key: key.to_string(),
                reason: format!("could not read from terminal: {}", e),
            })
    }
}

impl Launcher for ArchiveLauncher {
    fn launch(&mut self, key: &str) -> Result<(), LaunchError> {
        let (target, path) = self.locate(key)?;
        if target.docs {
            self.show_docs(key, &path)
        } else {
            self.run_program(key, &path)
        }
    }
}

fn describe_exit(status: process::ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => format!("exited with status {}", code),
        (None, Some(signal)) => format!("killed by signal {}", signal),
        (None, None) => "exited abnormally".to_string(),
    }
}
