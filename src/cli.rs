use crate::config::GamezillaConfig;
use crate::ui::{parse_color, Keybinds, Theme};
use eyre::WrapErr;
use ratatui::style::Color;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use std::{env, process};

/// Global debug flag, checked by the navigation update
pub static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

const PAGE_SIZE_RANGE: std::ops::RangeInclusive<usize> = 1..=50;
const DEFAULT_PAGE_SIZE: usize = 10;

fn usage() -> ! {
    println!(
        "Usage: {} [options]

  -c, --config <config>  Specify a config file.
      --seed <n>         Seed for the filler program names.
      --size <n>         Number of programs in the catalog.
      --page-size <n>    Programs shown per page (1-50).
      --archive <dir>    Search <dir> for installed programs first (repeatable).
      --export [=file]   Write the catalog listing to stdout or a file and quit.
      --installed        List installed programs and quit.
      --category <tag>   List programs of a category and quit.
      --sample <n>       List <n> random programs and quit.
      --disable-mouse    Keyboard-only browsing.
      --debug            Write a session log.
  -h, --help             Show this help message.
  -V, --version          Show the version number and quit.
",
        &env::args().next().unwrap_or_else(|| "gamezilla".to_string())
    );
    process::exit(0);
}

/// What to do once the catalog is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive browser
    Browse,
    /// Catalog listing to a file, or stdout when `None`
    Export(Option<PathBuf>),
    Installed,
    Category(String),
    Sample(usize),
}

/// Command line interface.
#[derive(Debug)]
pub struct Opts {
    /// Seed for filler names, entropy when `None`
    pub seed: Option<u64>,
    pub catalog_size: usize,
    pub page_size: usize,
    /// Roots searched for launch targets, in order
    pub archive_dirs: Vec<PathBuf>,
    /// Command that runs a launch target
    pub interpreter: String,
    /// How long the loading popup stays up before a launch
    pub loading_delay: Duration,
    pub disable_mouse: bool,
    pub theme: Theme,
    pub keybinds: Keybinds,
    pub debug: bool,
    pub command: Command,
}

/// Flags as given, before the config file is merged in
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    size: Option<usize>,
    page_size: Option<usize>,
    archive: Vec<PathBuf>,
    command: Option<Command>,
    disable_mouse: bool,
    debug: bool,
    help: bool,
    version: bool,
}

/// Parses the cli arguments and merges them over the config file
pub fn parse() -> eyre::Result<Opts> {
    let args = parse_args(env::args_os().skip(1))?;

    if args.help {
        usage();
    }
    if args.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    let config = GamezillaConfig::new(args.config.clone()).wrap_err("Error reading config file")?;

    let (opts, warnings) = resolve(args, config);
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    Ok(opts)
}

fn parse_args<I>(raw: I) -> Result<Args, lexopt::Error>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    use lexopt::prelude::*;
    let mut parser = lexopt::Parser::from_args(raw);
    let mut args = Args::default();

    while let Some(arg) = parser.next()? {
        match arg {
            Short('c') | Long("config") => {
                args.config = Some(PathBuf::from(parser.value()?));
            }
            Long("seed") => {
                args.seed = Some(parser.value()?.parse()?);
            }
            Long("size") => {
                args.size = Some(parser.value()?.parse()?);
            }
            Long("page-size") => {
                args.page_size = Some(parser.value()?.parse()?);
            }
            Long("archive") => {
                args.archive.push(PathBuf::from(parser.value()?));
            }
            Long("export") => {
                let file = parser.optional_value().map(PathBuf::from);
                set_command(&mut args, Command::Export(file))?;
            }
            Long("installed") => {
                set_command(&mut args, Command::Installed)?;
            }
            Long("category") => {
                let tag = parser
                    .value()?
                    .into_string()
                    .map_err(|_| "Category must be valid UTF-8")?;
                set_command(&mut args, Command::Category(tag))?;
            }
            Long("sample") => {
                let count = parser.value()?.parse()?;
                set_command(&mut args, Command::Sample(count))?;
            }
            Long("disable-mouse") => {
                args.disable_mouse = true;
            }
            Long("debug") => {
                args.debug = true;
            }
            Short('h') | Long("help") => {
                args.help = true;
            }
            Short('V') | Long("version") => {
                args.version = true;
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(args)
}

fn set_command(args: &mut Args, command: Command) -> Result<(), lexopt::Error> {
    if args.command.is_some() {
        return Err("only one of --export, --installed, --category and --sample can be given".into());
    }
    args.command = Some(command);
    Ok(())
}

/// Merge flags over the config; invalid values fall back with a warning
fn resolve(args: Args, config: GamezillaConfig) -> (Opts, Vec<String>) {
    let mut warnings = Vec::new();
    let general = config.general;
    let ui = config.ui;

    let page_size = args.page_size.unwrap_or(ui.page_size);
    let page_size = if PAGE_SIZE_RANGE.contains(&page_size) {
        page_size
    } else {
        warnings.push(format!(
            "page_size must be between 1-50, using default {}",
            DEFAULT_PAGE_SIZE
        ));
        DEFAULT_PAGE_SIZE
    };

    let defaults = Theme::default();
    let mut color = |name: &str, value: &str, fallback: Color| match parse_color(value) {
        Ok(c) => c,
        Err(_) => {
            warnings.push(format!("Invalid {} in config: {:?}", name, value));
            fallback
        }
    };
    let theme = Theme {
        highlight: color("highlight_color", &ui.highlight_color, defaults.highlight),
        real: color("real_color", &ui.real_color, defaults.real),
        filler: color("filler_color", &ui.filler_color, defaults.filler),
        border: color("border_color", &ui.border_color, defaults.border),
        status: color("status_color", &ui.status_color, defaults.status),
        rounded_borders: ui.rounded_borders,
    };

    let archive_dirs = args
        .archive
        .into_iter()
        .chain(general.archive_dirs.into_iter().map(PathBuf::from))
        .collect();

    let opts = Opts {
        seed: args.seed.or(general.seed),
        catalog_size: args.size.unwrap_or(general.catalog_size),
        page_size,
        archive_dirs,
        interpreter: general.interpreter,
        loading_delay: Duration::from_millis(general.loading_delay_ms),
        disable_mouse: args.disable_mouse || ui.disable_mouse,
        theme,
        keybinds: ui.keybinds,
        debug: args.debug || general.debug,
        command: args.command.unwrap_or(Command::Browse),
    };

    (opts, warnings)
}
