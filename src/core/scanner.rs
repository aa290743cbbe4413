use crate::core::matcher;
use crate::domain::model::{ScanCatalog, ScanRequest, Verdict};
use crate::domain::ports::{CatalogProvider, Scanner};
use crate::utils::error::Result;
use tokio::sync::OnceCell;

/// Classifies scan requests against the rule catalogue supplied by `C`. The
/// catalogue is loaded once on first use and reused for the lifetime of the
/// scanner.
pub struct RuleScanner<C: CatalogProvider> {
    provider: C,
    catalog: OnceCell<ScanCatalog>,
}

impl<C: CatalogProvider> RuleScanner<C> {
    pub fn new(provider: C) -> Self {
        Self {
            provider,
            catalog: OnceCell::new(),
        }
    }

    async fn catalog(&self) -> Result<&ScanCatalog> {
        self.catalog
            .get_or_try_init(|| async {
                let catalog = self.provider.load().await?;
                tracing::debug!(
                    "Catalogue loaded: {} call, {} sms, {} link, {} qr rules",
                    catalog.call.rules.len(),
                    catalog.sms.rules.len(),
                    catalog.link.rules.len(),
                    catalog.qr.rules.len()
                );
                Ok(catalog)
            })
            .await
    }
}

#[async_trait::async_trait]
impl<C: CatalogProvider> Scanner for RuleScanner<C> {
    async fn analyze(&self, request: &ScanRequest) -> Result<Verdict> {
        let catalog = self.catalog().await?;
        let kind = request.kind();
        let verdict = matcher::evaluate(kind, &request.haystack(), catalog.rule_set(kind))?;

        if verdict.matched {
            tracing::warn!(
                "⚠️ {} scan flagged '{}': {} ({})",
                kind,
                request.subject(),
                verdict.category,
                verdict.risk_level
            );
        } else {
            tracing::debug!("{} scan clean: {}", kind, request.subject());
        }

        Ok(verdict)
    }
}
