use async_trait::async_trait;

use super::error::ApiError;
use crate::models::{
    AuthResponse, BreakdownStats, CaptureUrlRequest, CloseTradeResponse, CreateTagInput,
    CreateTagResponse, CreateTradeInput, CreateTradeResponse, Credentials, CurrentUser,
    DailyStats, HealthStatus, MistakeFrequency, MonthlyReport, OverallStats, RegisterInput,
    ScreenshotKind, ScreenshotResponse, SuccessResponse, Tag, Trade,
};

pub const HEALTH_ENDPOINT: &str = "/api/health";
pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const REGISTER_ENDPOINT: &str = "/auth/register";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";
pub const CURRENT_USER_ENDPOINT: &str = "/auth/user";
pub const TRADES_ENDPOINT: &str = "/api/trades/";
pub const EXPORT_CSV_ENDPOINT: &str = "/api/trades/export/csv";
pub const TAGS_ENDPOINT: &str = "/api/tags/";
pub const STATISTICS_ENDPOINT: &str = "/api/statistics";
pub const SCREENSHOT_UPLOAD_ENDPOINT: &str = "/api/screenshots/upload";
pub const SCREENSHOT_CAPTURE_ENDPOINT: &str = "/api/screenshots/capture-url";
pub const SCREENSHOT_VIEW_ENDPOINT: &str = "/api/screenshots/view";

pub fn trade_path(trade_id: i64) -> String {
    format!("/api/trades/{}", trade_id)
}

pub fn trade_tags_path(trade_id: i64) -> String {
    format!("/api/tags/trade/{}", trade_id)
}

/// Path of a stored screenshot, as used in `<img src>` on the page
pub fn screenshot_path(filename: &str) -> String {
    format!("{}/{}", SCREENSHOT_VIEW_ENDPOINT, filename)
}

/// Everything the client layer needs from the journal backend.
///
/// One method per endpoint; implementations only translate HTTP, they do not
/// touch client state.
#[async_trait]
pub trait JournalApi: Send + Sync {
    /// Base URL of the backend (no trailing slash)
    fn base_url(&self) -> &str;

    async fn health(&self) -> Result<HealthStatus, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    async fn register(&self, input: &RegisterInput) -> Result<AuthResponse, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    async fn current_user(&self) -> Result<CurrentUser, ApiError>;

    /// All trades of the logged-in user, newest entry first, with tags
    async fn fetch_trades(&self) -> Result<Vec<Trade>, ApiError>;

    async fn create_trade(&self, input: &CreateTradeInput) -> Result<CreateTradeResponse, ApiError>;

    async fn close_trade(&self, trade_id: i64, exit_price: f64) -> Result<CloseTradeResponse, ApiError>;

    async fn delete_trade(&self, trade_id: i64) -> Result<SuccessResponse, ApiError>;

    /// Raw CSV bytes of the trade export
    async fn export_csv(&self) -> Result<Vec<u8>, ApiError>;

    async fn fetch_tags(&self) -> Result<Vec<Tag>, ApiError>;

    async fn create_tag(&self, input: &CreateTagInput) -> Result<CreateTagResponse, ApiError>;

    async fn fetch_trade_tags(&self, trade_id: i64) -> Result<Vec<Tag>, ApiError>;

    async fn add_tag(&self, trade_id: i64, tag_id: i64) -> Result<SuccessResponse, ApiError>;

    async fn remove_tag(&self, trade_id: i64, tag_id: i64) -> Result<SuccessResponse, ApiError>;

    async fn overall_stats(&self) -> Result<OverallStats, ApiError>;

    async fn daily_stats(&self, days: u32) -> Result<Vec<DailyStats>, ApiError>;

    async fn session_stats(&self) -> Result<Vec<BreakdownStats>, ApiError>;

    async fn setup_stats(&self) -> Result<Vec<BreakdownStats>, ApiError>;

    async fn mistake_stats(&self) -> Result<Vec<MistakeFrequency>, ApiError>;

    async fn monthly_report(&self, year: i32, month: u32) -> Result<MonthlyReport, ApiError>;

    async fn upload_screenshot(
        &self,
        trade_id: i64,
        kind: ScreenshotKind,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<ScreenshotResponse, ApiError>;

    async fn capture_screenshot(&self, request: &CaptureUrlRequest) -> Result<ScreenshotResponse, ApiError>;

    async fn fetch_screenshot(&self, filename: &str) -> Result<Vec<u8>, ApiError>;
}
