use std::path::{Path, PathBuf};

use crate::api::{screenshot_path, ApiError, JournalApi};
use crate::models::{CaptureUrlRequest, ScreenshotKind, ScreenshotResponse};

fn accepted(response: ScreenshotResponse) -> Result<ScreenshotResponse, ApiError> {
    if response.success {
        Ok(response)
    } else {
        Err(ApiError::Rejected(
            response.error.unwrap_or_else(|| "Screenshot was not stored".to_string()),
        ))
    }
}

/// Upload an image file from disk as the trade's before/after screenshot
pub async fn upload_screenshot(
    api: &dyn JournalApi,
    trade_id: i64,
    kind: ScreenshotKind,
    path: &Path,
) -> Result<ScreenshotResponse, ApiError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ApiError::InvalidInput(format!("Not a file path: {}", path.display())))?
        .to_string();
    let bytes = tokio::fs::read(path).await?;
    log::info!("Uploading {} screenshot for trade {} ({} bytes)", kind, trade_id, bytes.len());

    accepted(api.upload_screenshot(trade_id, kind, file_name, bytes).await?)
}

/// Ask the backend to capture a chart URL
pub async fn capture_screenshot(
    api: &dyn JournalApi,
    trade_id: i64,
    kind: ScreenshotKind,
    url: &str,
) -> Result<ScreenshotResponse, ApiError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ApiError::InvalidInput(format!("Not a web address: {}", url)));
    }
    let request = CaptureUrlRequest {
        trade_id,
        url: url.to_string(),
        kind,
    };
    accepted(api.capture_screenshot(&request).await?)
}

/// Absolute address of a stored screenshot
pub fn screenshot_url(api: &dyn JournalApi, filename: &str) -> String {
    format!("{}{}", api.base_url(), screenshot_path(filename))
}

/// Fetch a stored screenshot into `dir`, keeping its stored file name
pub async fn download_screenshot(api: &dyn JournalApi, filename: &str, dir: &Path) -> Result<PathBuf, ApiError> {
    let name = Path::new(filename)
        .file_name()
        .ok_or_else(|| ApiError::InvalidInput(format!("Bad screenshot name: {}", filename)))?;
    let bytes = api.fetch_screenshot(filename).await?;
    tokio::fs::create_dir_all(dir).await?;
    let target = dir.join(name);
    tokio::fs::write(&target, bytes).await?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::commands::mock::MockJournal;

    #[tokio::test]
    async fn test_upload_reads_file_and_keeps_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exit chart.png");
        std::fs::write(&path, [0u8; 32]).unwrap();

        let api = MockJournal::default();
        let response = upload_screenshot(&api, 5, ScreenshotKind::After, &path).await.unwrap();
        assert_eq!(response.filename.as_deref(), Some("5_after_exit chart.png"));

        let uploads = api.uploads.lock().unwrap();
        assert_eq!(uploads[0].file_name, "exit chart.png");
        assert_eq!(uploads[0].size, 32);
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let api = MockJournal::default();
        let result = upload_screenshot(&api, 5, ScreenshotKind::Before, &dir.path().join("nope.png")).await;
        assert!(matches!(result, Err(ApiError::Io(_))));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"x").unwrap();

        let api = MockJournal::default();
        api.reject_mutations.store(true, Ordering::SeqCst);
        let result = upload_screenshot(&api, 5, ScreenshotKind::Before, &path).await;
        assert!(matches!(result, Err(ApiError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_capture_requires_web_address() {
        let api = MockJournal::default();
        let result = capture_screenshot(&api, 3, ScreenshotKind::Before, "tradingview").await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
        assert!(api.calls().is_empty());

        let response = capture_screenshot(&api, 3, ScreenshotKind::Before, "https://www.tradingview.com/x/abc/")
            .await
            .unwrap();
        assert_eq!(response.filename.as_deref(), Some("3_before_capture.png"));
    }

    #[tokio::test]
    async fn test_url_and_download() {
        let api = MockJournal::default();
        assert_eq!(
            screenshot_url(&api, "3_before_capture.png"),
            "http://journal.test/api/screenshots/view/3_before_capture.png"
        );

        let dir = tempfile::tempdir().unwrap();
        let target = download_screenshot(&api, "3_before_capture.png", dir.path()).await.unwrap();
        assert_eq!(target, dir.path().join("3_before_capture.png"));
        assert!(std::fs::read(target).unwrap().starts_with(b"\x89PNG"));
    }
}
