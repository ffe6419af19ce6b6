#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Gamezilla
//!
//! > Terminal browser for the GAMEZILLA MEGA COLLECTION shovelware disc
//!
//! Pages through a generated catalog of programs and launches the few that
//! are actually installed.

/// Program catalog
mod catalog;
/// CLI parser
mod cli;
/// Config file
mod config;
/// Navigation state and debug log
mod core;
/// Run modes
mod modes;
/// UI helpers
mod ui;

use crate::catalog::{Catalog, Entry};
use crate::cli::Command;
use crate::core::debug_logger;

use std::fs;
use std::io;
use std::process;
use std::sync::atomic::Ordering;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use eyre::WrapErr;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    if let Err(error) = real_main() {
        shutdown_terminal(false); // Use safe default - always cleanup mouse if enabled
        eprintln!("{error:?}");
        process::exit(1);
    }
}

fn setup_terminal(disable_mouse: bool) -> eyre::Result<()> {
    enable_raw_mode().wrap_err("Failed to enable raw mode")?;
    io::stderr().execute(EnterAlternateScreen).wrap_err("Failed to enter alternate screen")?;
    if !disable_mouse {
        io::stderr().execute(EnableMouseCapture).wrap_err("Failed to enable mouse capture")?;
    }
    Ok(())
}

fn shutdown_terminal(disable_mouse: bool) {
    if !disable_mouse {
        let _ = io::stderr().execute(DisableMouseCapture);
    }
    let _ = io::stderr().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn real_main() -> eyre::Result<()> {
    let cli = cli::parse()?;

    if cli.debug {
        cli::DEBUG_ENABLED.store(true, Ordering::Relaxed);
        // Logging is best-effort; init_log already warned on failure
        let _ = debug_logger::init_log();
    }

    let catalog = Catalog::seeded(cli.catalog_size, crate::catalog::RESERVED, cli.seed)
        .wrap_err("Invalid catalog configuration")?;

    debug_logger::log_startup_info(&cli, catalog.len(), catalog.filter_real().count());

    let result = match &cli.command {
        Command::Browse => modes::browser::run(&cli, &catalog).map(|()| {
            println!("Thank you for using GAMEZILLA MEGA COLLECTION!");
        }),
        Command::Export(path) => export(&catalog, path.as_deref()),
        Command::Installed => {
            print!("{}", installed_listing(&catalog));
            Ok(())
        }
        Command::Category(tag) => {
            print!("{}", listing(catalog.filter_by_category(tag)));
            Ok(())
        }
        Command::Sample(count) => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            print!("{}", listing(catalog.sample(*count, &mut rng)));
            Ok(())
        }
    };

    debug_logger::log_session_end();
    result
}

fn export(catalog: &Catalog, path: Option<&std::path::Path>) -> eyre::Result<()> {
    let text = catalog.export_text();
    match path {
        Some(path) => fs::write(path, text)
            .wrap_err_with(|| format!("Failed to write catalog to {}", path.display())),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

/// One `number. name [category]` line per entry
fn listing<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    entries
        .into_iter()
        .map(|e| format!("{:3}. {} [{}]\n", e.number, e.name, e.category))
        .collect()
}

fn installed_listing(catalog: &Catalog) -> String {
    catalog
        .filter_real()
        .map(|e| {
            format!(
                "{:3}. {} (v{})\n     {}\n",
                e.number, e.name, e.version, e.description
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_listing_shows_only_real_programs() {
        let catalog = Catalog::seeded(500, crate::catalog::RESERVED, Some(3)).unwrap();
        let text = installed_listing(&catalog);
        assert_eq!(text.lines().count(), 12);
        assert!(text.starts_with("387. GLITCHDEX MALL - Original (v1.0)\n"));
        assert!(text.contains("391. EASTLAND MALL - CRD Reconstruction (v5.0)"));
    }

    #[test]
    fn test_listing_format() {
        let catalog = Catalog::seeded(500, crate::catalog::RESERVED, Some(3)).unwrap();
        let text = listing(catalog.filter_by_category("documentation"));
        assert_eq!(
            text.lines().find(|l| l.starts_with("391.")),
            Some("391. EASTLAND MALL - CRD Reconstruction [documentation]")
        );
    }
}
