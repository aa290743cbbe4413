use crate::domain::model::{ScanRecord, ScanRequest, ScanStats};
use crate::domain::ports::{HistoryStore, Scanner};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Drives a scanner and records every completed scan into the history store.
pub struct ScanEngine<S: Scanner, H: HistoryStore> {
    scanner: S,
    history: H,
    monitor: SystemMonitor,
    next_id: AtomicU64,
}

impl<S: Scanner, H: HistoryStore> ScanEngine<S, H> {
    pub fn new(scanner: S, history: H) -> Self {
        Self::new_with_monitoring(scanner, history, false)
    }

    pub fn new_with_monitoring(scanner: S, history: H, monitor_enabled: bool) -> Self {
        Self {
            scanner,
            history,
            monitor: SystemMonitor::new(monitor_enabled),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn scan(&self, request: ScanRequest) -> Result<ScanRecord> {
        let kind = request.kind();
        tracing::info!("🔍 Scanning {} input: {}", kind, request.subject());

        let verdict = self.scanner.analyze(&request).await?;

        let record = ScanRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            kind,
            subject: request.subject(),
            verdict,
            scanned_at: Utc::now(),
        };
        self.history.append(record.clone()).await?;

        if self.monitor.is_enabled() {
            self.monitor.log_stats(kind.as_str());
        }

        Ok(record)
    }

    pub async fn analyze_call(
        &self,
        phone_number: impl Into<String>,
        caller_name: Option<String>,
    ) -> Result<ScanRecord> {
        self.scan(ScanRequest::Call {
            phone_number: phone_number.into(),
            caller_name,
        })
        .await
    }

    pub async fn analyze_sms(
        &self,
        message: impl Into<String>,
        sender: Option<String>,
    ) -> Result<ScanRecord> {
        self.scan(ScanRequest::Sms {
            message: message.into(),
            sender,
        })
        .await
    }

    pub async fn analyze_link(&self, url: impl Into<String>) -> Result<ScanRecord> {
        self.scan(ScanRequest::Link { url: url.into() }).await
    }

    pub async fn analyze_qr(&self, content: impl Into<String>) -> Result<ScanRecord> {
        self.scan(ScanRequest::Qr {
            content: content.into(),
        })
        .await
    }

    /// Completed scans, newest first.
    pub async fn history(&self) -> Result<Vec<ScanRecord>> {
        let mut records = self.history.snapshot().await?;
        records.reverse();
        Ok(records)
    }

    pub async fn stats(&self) -> Result<ScanStats> {
        let records = self.history.snapshot().await?;
        Ok(ScanStats::from_records(&records))
    }
}
