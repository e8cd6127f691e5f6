use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::api::{ApiError, JournalApi};

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// Data rows, header excluded
    pub rows: usize,
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("trades_export_{}.csv", today.format("%Y-%m-%d"))
}

/// Count data records, so a malformed download is caught before it is saved
fn count_rows(bytes: &[u8]) -> Result<usize, ApiError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let mut rows = 0;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    Ok(rows)
}

/// Download the CSV export and save it as `trades_export_{date}.csv` in `dir`
pub async fn export_csv(api: &dyn JournalApi, dir: &Path, today: NaiveDate) -> Result<ExportSummary, ApiError> {
    let bytes = api.export_csv().await?;
    let rows = count_rows(&bytes)?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(today));
    tokio::fs::write(&path, &bytes).await?;
    log::info!("Exported {} trades to {}", rows, path.display());

    Ok(ExportSummary { path, rows })
}
