pub mod education;
pub mod engine;
pub mod family;
pub mod history;
pub mod matcher;
pub mod report;
pub mod scanner;

pub use crate::domain::model::{
    RiskLevel, Rule, RuleSet, SafeDefaults, ScanCatalog, ScanKind, ScanRecord, ScanRequest,
    ScanStats, Verdict,
};
pub use crate::domain::ports::{CatalogProvider, HistoryStore, Scanner, Storage};
pub use crate::utils::error::Result;
