// Filler name generation
//
// Every draw goes through the caller's rng so a seeded generator gives the
// same names in the same positions.

use rand::seq::SliceRandom;
use rand::Rng;

/// Genre tag with its pool of base phrases
pub const GENRES: &[(&str, [&str; 5])] = &[
    ("solitaire", ["SOLITAIRE", "FREECELL", "SPIDER SOLITAIRE", "PYRAMID", "KLONDIKE"]),
    ("screensaver", ["SCREENSAVER", "STARFIELD", "FLYING TOASTER", "MATRIX", "FLYING LOGO"]),
    ("compression", ["PKZIP", "ARJSFX", "WINZIP", "LHARC", "STUFFIT"]),
    ("utility", ["UNINSTALL", "DISK DOCTOR", "DEFRAG", "CACHE CLEANER", "OPTIMIZER"]),
    ("editor", ["NOTEPAD PRO", "TEXTVIEW", "EDITOR PLUS", "WORDPAD", "RICHTEXT"]),
    ("graphics", ["PAINT", "IMAGEVUE", "VIEWER PRO", "THUMBNAILER", "CONVERTER"]),
    ("sound", ["WINAMP", "MEDIA PLAYER", "WAVEFORM", "CONVERTER", "MIXER"]),
    ("demo", ["DEMO", "TECH DEMO", "3D DEMO", "SCENE DEMO", "INTRO"]),
    ("game", ["TETRIS", "CHESS", "CHECKERS", "POKER", "BINGO"]),
    ("productivity", ["CALCULATOR", "ORGANIZER", "TODO", "TIMER", "CLOCK"]),
    ("network", ["PING", "DIALER", "MODEM", "TERMINAL", "TRANSFER"]),
    ("system", ["MONITOR", "BENCHMARK", "INFO", "ANALYZER", "CHECKER"]),
];

/// Version labels; the empty label means "no suffix"
pub const VERSIONS: &[&str] = &["1.0", "1.1", "2.0", "3.2", "4.5", "5.0", "LITE", "PRO", "DELUXE", ""];

pub const ADJECTIVES: &[&str] = &[
    "ULTRA", "MEGA", "SUPER", "EXTREME", "POWER", "TURBO", "CHAOS", "ULTIMATE",
];

const ADJECTIVE_CHANCE: f64 = 0.3;
const SUFFIX_CHANCE: f64 = 0.6;

/// A generated filler program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filler {
    pub name: String,
    pub category: &'static str,
    pub version: &'static str,
}

fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Compose one filler program: genre phrase, optional adjective, optional version
pub fn filler<R: Rng + ?Sized>(rng: &mut R) -> Filler {
    let (category, phrases) = GENRES[rng.gen_range(0..GENRES.len())];
    let mut name = pick(&phrases, rng).to_string();

    if rng.gen_bool(ADJECTIVE_CHANCE) {
        name = format!("{} {}", pick(ADJECTIVES, rng), name);
    }

    if rng.gen_bool(SUFFIX_CHANCE) {
        let suffix = pick(VERSIONS, rng);
        if !suffix.is_empty() {
            name.push(' ');
            name.push_str(suffix);
        }
    }

    Filler {
        name,
        category,
        version: pick(VERSIONS, rng),
    }
}
