pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use config::catalog::{BundledCatalog, FileCatalog, StaticCatalog};
pub use config::remote::RemoteCatalog;
pub use core::{
    education::EducationLibrary, engine::ScanEngine, family::FamilyRoster, history::MemoryHistory,
    report::ReportExporter, scanner::RuleScanner,
};
pub use utils::error::{Result, ShieldError};
