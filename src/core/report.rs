use crate::domain::model::{ScanRecord, ScanStats};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ShieldError};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const REPORT_FILENAME: &str = "scan_report.zip";

/// Bundles scan history into a report archive: `history.csv`, `stats.json`,
/// and `threats.json` when at least one scan was flagged.
pub struct ReportExporter<S: Storage> {
    storage: S,
    output_path: String,
}

impl<S: Storage> ReportExporter<S> {
    pub fn new(storage: S, output_path: String) -> Self {
        Self {
            storage,
            output_path,
        }
    }

    pub async fn export(&self, records: &[ScanRecord]) -> Result<String> {
        let stats = ScanStats::from_records(records);
        let threats: Vec<&ScanRecord> = records.iter().filter(|r| r.verdict.matched).collect();

        tracing::debug!(
            "Building report archive: {} records, {} threats",
            records.len(),
            threats.len()
        );

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("history.csv", FileOptions::default())?;
            zip.write_all(history_csv(records)?.as_slice())?;

            zip.start_file::<_, ()>("stats.json", FileOptions::default())?;
            let stats_json = serde_json::to_string_pretty(&stats)?;
            zip.write_all(stats_json.as_bytes())?;

            if !threats.is_empty() {
                zip.start_file::<_, ()>("threats.json", FileOptions::default())?;
                let threats_json = serde_json::to_string_pretty(&threats)?;
                zip.write_all(threats_json.as_bytes())?;
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing report ({} bytes) to storage", zip_data.len());
        self.storage.write_file(REPORT_FILENAME, &zip_data).await?;

        Ok(format!("{}/{}", self.output_path, REPORT_FILENAME))
    }
}

fn history_csv(records: &[ScanRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "kind",
        "subject",
        "matched",
        "risk_level",
        "category",
        "reason",
        "recommendation",
        "scanned_at",
    ])?;

    for record in records {
        writer.write_record([
            record.id.to_string().as_str(),
            record.kind.as_str(),
            record.subject.as_str(),
            if record.verdict.matched { "true" } else { "false" },
            record.verdict.risk_level.as_str(),
            record.verdict.category.as_str(),
            record.verdict.reason.as_str(),
            record.verdict.recommendation.as_str(),
            record.scanned_at.to_rfc3339().as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ShieldError::ExportError {
            message: format!("Failed to finalize history.csv: {}", e),
        })
}
