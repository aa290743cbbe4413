use crate::domain::model::{ScanCatalog, ScanRecord, ScanRequest, Verdict};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Supplies the ordered rule catalogue. Implementations: bundled fixtures, a
/// TOML file, or a remote rules endpoint. Injected so tests can substitute
/// their own catalogue.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load(&self) -> Result<ScanCatalog>;
}

#[async_trait]
pub trait Scanner: Send + Sync {
    async fn analyze(&self, request: &ScanRequest) -> Result<Verdict>;
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, record: ScanRecord) -> Result<()>;
    async fn snapshot(&self) -> Result<Vec<ScanRecord>>;
}
