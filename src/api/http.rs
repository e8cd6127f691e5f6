use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{redirect, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::models::{
    AuthResponse, BreakdownStats, CaptureUrlRequest, CloseTradeRequest, CloseTradeResponse,
    CreateTagInput, CreateTagResponse, CreateTradeInput, CreateTradeResponse, Credentials,
    CurrentUser, DailyStats, HealthStatus, MistakeFrequency, MonthlyReport, OverallStats,
    RegisterInput, ScreenshotKind, ScreenshotResponse, SuccessResponse, Tag, TagRequest, Trade,
};

use super::client::{
    screenshot_path, trade_path, trade_tags_path, JournalApi, CURRENT_USER_ENDPOINT,
    EXPORT_CSV_ENDPOINT, HEALTH_ENDPOINT, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, REGISTER_ENDPOINT,
    SCREENSHOT_CAPTURE_ENDPOINT, SCREENSHOT_UPLOAD_ENDPOINT, STATISTICS_ENDPOINT, TAGS_ENDPOINT,
    TRADES_ENDPOINT,
};
use super::error::ApiError;

/// Journal backend over HTTP with a session cookie jar
pub struct HttpJournalClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpJournalClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        // Unauthenticated requests are redirected to the HTML login page;
        // keep the redirect visible instead of following it.
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client: builder.build()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map non-success responses to errors, passing 2xx through
    async fn check_status(response: Response, path: &str) -> Result<Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status.is_redirection() {
            return Err(ApiError::AuthenticationError(format!(
                "{} redirected to login; session missing or expired",
                path
            )));
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::AuthenticationError(message)),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(format!("{}: {}", path, message))),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T, ApiError> {
        log::debug!("Journal API request: {}", path);

        let response = request.send().await?;
        let response = Self::check_status(response, path).await?;

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            ApiError::ParseError(format!("Failed to parse {} response: {} - Body: {}", path, e, response_text))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(self.http_client.get(self.url(path)), path).await
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        log::debug!("Journal API download: {}", path);

        let response = self.http_client.get(self.url(path)).send().await?;
        let response = Self::check_status(response, path).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn statistics<T: DeserializeOwned>(&self, suffix: &str) -> Result<T, ApiError> {
        self.get_json(&format!("{}/{}", STATISTICS_ENDPOINT, suffix)).await
    }
}

/// Pull `error` out of a JSON error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl JournalApi for HttpJournalClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json(HEALTH_ENDPOINT).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let request = self.http_client.post(self.url(LOGIN_ENDPOINT)).json(credentials);
        self.send_json(request, LOGIN_ENDPOINT).await
    }

    async fn register(&self, input: &RegisterInput) -> Result<AuthResponse, ApiError> {
        let request = self.http_client.post(self.url(REGISTER_ENDPOINT)).json(input);
        self.send_json(request, REGISTER_ENDPOINT).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self.http_client.get(self.url(LOGOUT_ENDPOINT)).send().await?;
        let status = response.status();

        // The backend answers logout with a redirect to the landing page
        if status.is_success() || status.is_redirection() {
            return Ok(());
        }

        Self::check_status(response, LOGOUT_ENDPOINT).await.map(|_| ())
    }

    async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        self.get_json(CURRENT_USER_ENDPOINT).await
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>, ApiError> {
        self.get_json(TRADES_ENDPOINT).await
    }

    async fn create_trade(&self, input: &CreateTradeInput) -> Result<CreateTradeResponse, ApiError> {
        let request = self.http_client.post(self.url(TRADES_ENDPOINT)).json(input);
        self.send_json(request, TRADES_ENDPOINT).await
    }

    async fn close_trade(&self, trade_id: i64, exit_price: f64) -> Result<CloseTradeResponse, ApiError> {
        let path = trade_path(trade_id);
        let request = self
            .http_client
            .put(self.url(&path))
            .json(&CloseTradeRequest { exit_price });
        self.send_json(request, &path).await
    }

    async fn delete_trade(&self, trade_id: i64) -> Result<SuccessResponse, ApiError> {
        let path = trade_path(trade_id);
        let request = self.http_client.delete(self.url(&path));
        self.send_json(request, &path).await
    }

    async fn export_csv(&self) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(EXPORT_CSV_ENDPOINT).await
    }

    async fn fetch_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.get_json(TAGS_ENDPOINT).await
    }

    async fn create_tag(&self, input: &CreateTagInput) -> Result<CreateTagResponse, ApiError> {
        let request = self.http_client.post(self.url(TAGS_ENDPOINT)).json(input);
        self.send_json(request, TAGS_ENDPOINT).await
    }

    async fn fetch_trade_tags(&self, trade_id: i64) -> Result<Vec<Tag>, ApiError> {
        self.get_json(&trade_tags_path(trade_id)).await
    }

    async fn add_tag(&self, trade_id: i64, tag_id: i64) -> Result<SuccessResponse, ApiError> {
        let path = format!("{}/add", trade_tags_path(trade_id));
        let request = self.http_client.post(self.url(&path)).json(&TagRequest { tag_id });
        self.send_json(request, &path).await
    }

    async fn remove_tag(&self, trade_id: i64, tag_id: i64) -> Result<SuccessResponse, ApiError> {
        let path = format!("{}/remove", trade_tags_path(trade_id));
        let request = self.http_client.post(self.url(&path)).json(&TagRequest { tag_id });
        self.send_json(request, &path).await
    }

    async fn overall_stats(&self) -> Result<OverallStats, ApiError> {
        self.statistics("overall").await
    }

    async fn daily_stats(&self, days: u32) -> Result<Vec<DailyStats>, ApiError> {
        self.statistics(&format!("daily/{}", days)).await
    }

    async fn session_stats(&self) -> Result<Vec<BreakdownStats>, ApiError> {
        self.statistics("session").await
    }

    async fn setup_stats(&self) -> Result<Vec<BreakdownStats>, ApiError> {
        self.statistics("setup").await
    }

    async fn mistake_stats(&self) -> Result<Vec<MistakeFrequency>, ApiError> {
        self.statistics("mistakes").await
    }

    async fn monthly_report(&self, year: i32, month: u32) -> Result<MonthlyReport, ApiError> {
        self.statistics(&format!("monthly-report/{}/{}", year, month)).await
    }

    async fn upload_screenshot(
        &self,
        trade_id: i64,
        kind: ScreenshotKind,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<ScreenshotResponse, ApiError> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("trade_id", trade_id.to_string())
            .text("type", kind.as_str());

        let request = self
            .http_client
            .post(self.url(SCREENSHOT_UPLOAD_ENDPOINT))
            .multipart(form);
        self.send_json(request, SCREENSHOT_UPLOAD_ENDPOINT).await
    }

    async fn capture_screenshot(&self, request: &CaptureUrlRequest) -> Result<ScreenshotResponse, ApiError> {
        let builder = self
            .http_client
            .post(self.url(SCREENSHOT_CAPTURE_ENDPOINT))
            .json(request);
        self.send_json(builder, SCREENSHOT_CAPTURE_ENDPOINT).await
    }

    async fn fetch_screenshot(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&screenshot_path(filename)).await
    }
}
