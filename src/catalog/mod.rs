//! Catalog model
//!
//! The catalog is a fixed-length, 1-indexed list of programs. A handful of
//! sequence numbers are reserved for the real programs on the disc; every
//! other slot is filler with a generated name. It is built once at startup
//! and never mutated afterwards.

mod names;
pub mod reserved;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;

pub use reserved::{Reserved, INITIAL_SELECTION, RESERVED};

/// Number of programs on the disc
pub const DEFAULT_SIZE: usize = 500;

/// Error type for catalog generation and lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Catalog size or reserved numbers don't fit together
    InvalidConfiguration(String),
    /// Sequence number outside 1..=len
    OutOfRange { number: usize, len: usize },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::InvalidConfiguration(msg) => {
                write!(f, "invalid catalog configuration: {}", msg)
            }
            CatalogError::OutOfRange { number, len } => {
                write!(f, "program #{} is outside the catalog (1-{})", number, len)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// One catalog row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 1-indexed position
    pub number: usize,
    pub name: String,
    pub category: String,
    pub version: String,
    pub description: String,
    /// Wired to an actual launch target
    pub real: bool,
    /// Set exactly when `real` is
    pub launch_key: Option<String>,
}

impl Entry {
    fn from_reserved(r: &Reserved) -> Self {
        Self {
            number: r.number,
            name: r.name.to_string(),
            category: r.category.to_string(),
            version: r.version.to_string(),
            description: r.description.to_string(),
            real: true,
            launch_key: Some(r.launch_key.to_string()),
        }
    }

    /// File name the disc would install this program as
    pub fn file_name(&self) -> String {
        match &self.launch_key {
            Some(key) => key.clone(),
            None => format!("prog_{}.exe", self.number),
        }
    }
}

/// Immutable, 1-indexed program list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    /// Generate a catalog of `size` programs.
    ///
    /// Reserved numbers always produce their fixed entry; every other slot
    /// draws a filler name from `rng`, in ascending sequence order.
    pub fn generate<R: Rng + ?Sized>(
        size: usize,
        reserved: &[Reserved],
        rng: &mut R,
    ) -> Result<Self, CatalogError> {
        validate(size, reserved)?;

        let entries = (1..=size)
            .map(|number| match reserved.iter().find(|r| r.number == number) {
                Some(r) => Entry::from_reserved(r),
                None => {
                    let filler = names::filler(rng);
                    Entry {
                        number,
                        name: filler.name,
                        category: filler.category.to_string(),
                        version: filler.version.to_string(),
                        description: "Not installed".to_string(),
                        real: false,
                        launch_key: None,
                    }
                }
            })
            .collect();

        Ok(Self { entries })
    }

    /// Generate with a fixed seed, or from entropy when `seed` is `None`
    pub fn seeded(
        size: usize,
        reserved: &[Reserved],
        seed: Option<u64>,
    ) -> Result<Self, CatalogError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::generate(size, reserved, &mut rng)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a program by sequence number
    pub fn get(&self, number: usize) -> Result<&Entry, CatalogError> {
        number
            .checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
            .ok_or(CatalogError::OutOfRange {
                number,
                len: self.len(),
            })
    }

    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    pub fn filter_by_category<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.category == tag)
    }

    pub fn filter_real(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.real)
    }

    /// Up to `count` distinct programs in random order
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&Entry> {
        self.entries
            .choose_multiple(rng, count.min(self.len()))
            .collect()
    }

    /// Plain-text listing of the whole catalog
    pub fn export_text(&self) -> String {
        let mut text = String::from(EXPORT_HEADER);
        text.push_str(&format!("PROGRAM LISTING (Programs 1-{})\n\n", self.len()));
        for entry in &self.entries {
            let marker = if entry.real { " [INSTALLED]" } else { "" };
            text.push_str(&format!(
                "{:3}. {:<50}{}\n",
                entry.number, entry.name, marker
            ));
        }
        text
    }
}

const EXPORT_HEADER: &str = "\
╔════════════════════════════════════════════════════════════════════════════╗
║                  GAMEZILLA MEGA COLLECTION VOL. 4                          ║
║               The Ultimate Shareware & Freeware Compilation                ║
║                                                                            ║
║  500 Programs • Your Entertainment Solution for 1998!                      ║
║  Complete with Games, Utilities, Demos, and MORE!                          ║
╚════════════════════════════════════════════════════════════════════════════╝

";

fn validate(size: usize, reserved: &[Reserved]) -> Result<(), CatalogError> {
    if size == 0 {
        return Err(CatalogError::InvalidConfiguration(
            "catalog size must be at least 1".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(reserved.len());
    for r in reserved {
        if r.number == 0 || r.number > size {
            return Err(CatalogError::InvalidConfiguration(format!(
                "reserved program #{} does not fit in a catalog of {}",
                r.number, size
            )));
        }
        if !seen.insert(r.number) {
            return Err(CatalogError::InvalidConfiguration(format!(
                "program #{} is reserved twice",
                r.number
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(seed: u64) -> Catalog {
        Catalog::seeded(DEFAULT_SIZE, RESERVED, Some(seed)).unwrap()
    }

    #[test]
    fn test_reserved_entries_survive_any_seed() {
        for seed in [0, 1, 42, 0xdead_beef, u64::MAX] {
            let catalog = disc(seed);
            for r in RESERVED {
                let entry = catalog.get(r.number).unwrap();
                assert!(entry.real);
                assert_eq!(entry.name, r.name);
                assert_eq!(entry.launch_key.as_deref(), Some(r.launch_key));
            }
        }
    }

    #[test]
    fn test_same_seed_same_catalog() {
        assert_eq!(disc(1998), disc(1998));
    }

    #[test]
    fn test_different_seeds_differ_in_filler() {
        let a = disc(1);
        let b = disc(2);
        assert_ne!(a, b);
        for r in RESERVED {
            assert_eq!(a.get(r.number), b.get(r.number));
        }
    }

    #[test]
    fn test_numbers_match_positions() {
        let catalog = disc(3);
        assert_eq!(catalog.len(), DEFAULT_SIZE);
        for (idx, entry) in catalog.all().iter().enumerate() {
            assert_eq!(entry.number, idx + 1);
            assert_eq!(entry.real, entry.launch_key.is_some());
        }
    }

    #[test]
    fn test_only_reserved_are_real() {
        let catalog = disc(4);
        let real: Vec<usize> = catalog.filter_real().map(|e| e.number).collect();
        assert_eq!(real, vec![387, 388, 389, 390, 391, 392]);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let catalog = disc(5);
        assert_eq!(
            catalog.get(0),
            Err(CatalogError::OutOfRange { number: 0, len: 500 })
        );
        assert_eq!(
            catalog.get(501),
            Err(CatalogError::OutOfRange { number: 501, len: 500 })
        );
        assert_eq!(catalog.get(500).unwrap().number, 500);
    }

    #[test]
    fn test_reserved_past_the_end_is_rejected() {
        let err = Catalog::seeded(391, RESERVED, Some(0)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfiguration(_)));
        assert!(Catalog::seeded(392, RESERVED, Some(0)).is_ok());
    }

    #[test]
    fn test_colliding_reserved_is_rejected() {
        let twice = [RESERVED[0], RESERVED[0]];
        let err = Catalog::seeded(500, &twice, Some(0)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert!(matches!(
            Catalog::seeded(0, &[], None),
            Err(CatalogError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = disc(6);
        let docs: Vec<usize> = catalog
            .filter_by_category("documentation")
            .map(|e| e.number)
            .collect();
        assert_eq!(docs, vec![391]);
        assert!(catalog.filter_by_category("game").any(|e| e.number == 387));
        assert_eq!(catalog.filter_by_category("GAME").count(), 0);
        assert!(catalog.filter_by_category("game").all(|e| e.category == "game"));
    }

    #[test]
    fn test_sample_is_distinct_and_clamped() {
        let catalog = Catalog::seeded(400, RESERVED, Some(8)).unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        let picked = catalog.sample(20, &mut rng);
        assert_eq!(picked.len(), 20);
        let unique: HashSet<usize> = picked.iter().map(|e| e.number).collect();
        assert_eq!(unique.len(), 20);

        assert_eq!(catalog.sample(10_000, &mut rng).len(), 400);
    }

    #[test]
    fn test_export_marks_installed_programs() {
        let text = disc(9).export_text();
        assert!(text.contains("PROGRAM LISTING (Programs 1-500)"));
        assert!(text.contains(&format!("387. {:<50} [INSTALLED]", "GLITCHDEX MALL - Original")));
        assert_eq!(text.matches("[INSTALLED]").count(), 6);
        assert!(text.lines().any(|l| l.starts_with("  1. ")));
    }

    #[test]
    fn test_file_name() {
        let catalog = disc(10);
        assert_eq!(catalog.get(1).unwrap().file_name(), "prog_1.exe");
        assert_eq!(catalog.get(387).unwrap().file_name(), "v1");
    }
}
