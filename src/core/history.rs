use crate::domain::model::ScanRecord;
use crate::domain::ports::HistoryStore;
use crate::utils::error::Result;
use std::sync::{Arc, Mutex};

/// In-memory scan history. Nothing is persisted; a new process starts empty.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    records: Arc<Mutex<Vec<ScanRecord>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryStore for MemoryHistory {
    async fn append(&self, record: ScanRecord) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.push(record);
        Ok(())
    }

    async fn snapshot(&self) -> Result<Vec<ScanRecord>> {
        let records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RiskLevel, ScanKind, Verdict};
    use chrono::Utc;

    fn record(id: u64) -> ScanRecord {
        ScanRecord {
            id,
            kind: ScanKind::Sms,
            subject: format!("message {}", id),
            verdict: Verdict {
                matched: false,
                risk_level: RiskLevel::Low,
                category: "legitimate".to_string(),
                reason: "No suspicious patterns detected".to_string(),
                recommendation: "Message appears safe".to_string(),
            },
            scanned_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn append_preserves_insertion_order() {
        let history = MemoryHistory::new();
        history.append(record(1)).await.unwrap();
        history.append(record(2)).await.unwrap();

        let snapshot = history.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, 1);
        assert_eq!(snapshot[1].id, 2);
    }

    #[tokio::test]
    async fn clones_share_the_same_backing_store() {
        let history = MemoryHistory::new();
        let alias = history.clone();
        history.append(record(7)).await.unwrap();

        let snapshot = alias.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, 7);
    }
}
