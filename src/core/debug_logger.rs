use crate::catalog::Entry;
use crate::core::state::{Message, NavigationState};
use directories::ProjectDirs;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;
use time::macros::format_description;

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();
static SESSION_START: OnceLock<Instant> = OnceLock::new();

fn now() -> time::OffsetDateTime {
    time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc())
}

fn timestamp() -> String {
    now()
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
        ))
        .unwrap_or_default()
}

fn log_dir() -> PathBuf {
    match ProjectDirs::from("", "", env!("CARGO_PKG_NAME")) {
        Some(dirs) => dirs.data_local_dir().join("logs"),
        None => PathBuf::from(".").join("logs"),
    }
}

pub fn init_log() -> std::io::Result<()> {
    let log_dir = log_dir();

    // Create log directory, log error if it fails
    if let Err(e) = create_dir_all(&log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_dir, e
        );
        return Err(e);
    }

    // Generate timestamped filename with PID
    let stamp = now()
        .format(format_description!("[year][month][day]-[hour][minute][second]"))
        .unwrap_or_default();
    let pid = std::process::id();
    let path = log_dir.join(format!("gamezilla-debug-{}-pid{}.log", stamp, pid));

    let mut file = match OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Failed to create log file {:?}: {}", path, e);
            return Err(e);
        }
    };

    SESSION_START.set(Instant::now()).ok();

    writeln!(file, "=== GAMEZILLA DEBUG SESSION STARTED ===")?;
    writeln!(file, "Timestamp: {}", timestamp())?;
    writeln!(file, "PID: {}", pid)?;
    writeln!(file, "Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "Log file: {:?}", path)?;
    writeln!(file)?;

    LOG_FILE.set(path).ok();
    Ok(())
}

fn with_log(write: impl FnOnce(&mut std::fs::File) -> std::io::Result<()>) {
    if let Some(path) = LOG_FILE.get() {
        match OpenOptions::new().append(true).open(path) {
            Ok(mut file) => {
                let _ = write(&mut file);
            }
            Err(_) => eprintln!("Warning: Failed to write to log file: {:?}", path),
        }
    }
}

fn elapsed_ms() -> u128 {
    SESSION_START
        .get()
        .map(|start| start.elapsed().as_millis())
        .unwrap_or(0)
}

pub fn log_startup_info(cli: &crate::cli::Opts, catalog_len: usize, real_count: usize) {
    with_log(|file| {
        writeln!(file, "[STARTUP] Configuration:")?;
        writeln!(file, "  Catalog size: {}", cli.catalog_size)?;
        writeln!(file, "  Page size: {}", cli.page_size)?;
        match cli.seed {
            Some(seed) => writeln!(file, "  Seed: {}", seed)?,
            None => writeln!(file, "  Seed: (entropy)")?,
        }
        writeln!(file, "  Archive dirs: {:?}", cli.archive_dirs)?;
        writeln!(file, "  Interpreter: {}", cli.interpreter)?;
        writeln!(file, "  Mouse: {}", !cli.disable_mouse)?;
        writeln!(file)?;
        writeln!(file, "[STARTUP] Catalog:")?;
        writeln!(file, "  Total programs: {}", catalog_len)?;
        writeln!(file, "  Installed programs: {}", real_count)?;
        writeln!(file)
    });
}

pub fn log_event(event: &str) {
    with_log(|file| writeln!(file, "[{:>6}ms] EVENT: {}", elapsed_ms(), event));
}

pub fn log_transition(msg: Message, before: &NavigationState, after: &NavigationState) {
    with_log(|file| {
        if before == after {
            writeln!(
                file,
                "[{:>6}ms] {:?}: no-op (index {}, page {})",
                elapsed_ms(),
                msg,
                before.selected,
                before.page
            )
        } else {
            writeln!(
                file,
                "[{:>6}ms] {:?}: index {} -> {}, page {} -> {}",
                elapsed_ms(),
                msg,
                before.selected,
                after.selected,
                before.page,
                after.page
            )
        }
    });
}

pub fn log_launch(entry: &Entry, outcome: &str) {
    with_log(|file| {
        writeln!(file, "[LAUNCH] Program #{}: \"{}\"", entry.number, entry.name)?;
        writeln!(
            file,
            "         Key: {}, Outcome: {}",
            entry.launch_key.as_deref().unwrap_or("-"),
            outcome
        )
    });
}

pub fn log_session_end() {
    with_log(|file| {
        let elapsed = SESSION_START
            .get()
            .map(|start| start.elapsed())
            .unwrap_or(std::time::Duration::ZERO);
        writeln!(file)?;
        writeln!(file, "=== GAMEZILLA DEBUG SESSION ENDED ===")?;
        writeln!(file, "Duration: {:.3}s", elapsed.as_secs_f64())?;
        writeln!(file, "Timestamp: {}", timestamp())?;
        writeln!(file)
    });
}
