use crate::config::catalog::validate_catalog;
use crate::domain::model::ScanCatalog;
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{Result, ShieldError};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches the rule catalogue as JSON from a rules endpoint. Any failure —
/// network, non-2xx status, unparsable body — propagates as an error; the
/// scanner never falls back to "safe" on a missing catalogue.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    endpoint: String,
    client: Client,
}

impl RemoteCatalog {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CatalogProvider for RemoteCatalog {
    async fn load(&self) -> Result<ScanCatalog> {
        tracing::debug!("Fetching rule catalogue from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShieldError::CatalogUnavailable {
                origin: self.endpoint.clone(),
                reason: format!("HTTP {}", status),
            });
        }

        let catalog: ScanCatalog = response.json().await?;
        validate_catalog(&catalog)?;

        tracing::info!("Rule catalogue refreshed from {}", self.endpoint);
        Ok(catalog)
    }
}
