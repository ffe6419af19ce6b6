//! Browser mode: paging through the catalog and launching installed programs

pub mod launch;
mod run;

pub use run::run;
