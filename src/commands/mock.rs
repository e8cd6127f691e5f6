//! In-memory journal backend for command tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, JournalApi};
use crate::models::{
    AuthResponse, BreakdownStats, CaptureUrlRequest, CloseTradeResponse, CreateTagInput,
    CreateTagResponse, CreateTradeInput, CreateTradeResponse, Credentials, CurrentUser,
    DailyStats, HealthStatus, MistakeFrequency, MonthlyReport, OverallStats, RegisterInput,
    ScreenshotKind, ScreenshotResponse, SuccessResponse, Tag, Trade, TradeStatus,
};

pub(crate) struct Upload {
    pub trade_id: i64,
    pub kind: ScreenshotKind,
    pub file_name: String,
    pub size: usize,
}

pub(crate) struct MockJournal {
    pub trades: Mutex<Vec<Trade>>,
    pub tags: Mutex<Vec<Tag>>,
    pub trade_tags: Mutex<HashMap<i64, Vec<i64>>>,
    pub calls: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<Upload>>,
    pub csv: Mutex<Option<Vec<u8>>>,
    /// Every call fails as if the server were unreachable
    pub offline: AtomicBool,
    /// Mutations answer `{success: false}`
    pub reject_mutations: AtomicBool,
    pub fail_session_stats: AtomicBool,
    /// `GET /api/trades/` answers with a body that does not parse
    pub fail_fetch_trades: AtomicBool,
    next_id: AtomicI64,
}

impl Default for MockJournal {
    fn default() -> Self {
        Self {
            trades: Mutex::new(Vec::new()),
            tags: Mutex::new(vec![
                Tag {
                    id: 1,
                    name: "Early Entry".to_string(),
                    color: "#ef4444".to_string(),
                },
                Tag {
                    id: 2,
                    name: "FOMO".to_string(),
                    color: "#dc2626".to_string(),
                },
            ]),
            trade_tags: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            csv: Mutex::new(None),
            offline: AtomicBool::new(false),
            reject_mutations: AtomicBool::new(false),
            fail_session_stats: AtomicBool::new(false),
            fail_fetch_trades: AtomicBool::new(false),
            next_id: AtomicI64::new(100),
        }
    }
}

impl MockJournal {
    pub fn with_trades(trades: Vec<Trade>) -> Self {
        let mock = Self::default();
        *mock.trades.lock().unwrap() = trades;
        mock
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.as_str() == call).count()
    }

    fn gate(&self, call: impl Into<String>) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call.into());
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        Ok(())
    }

    fn rejecting(&self) -> bool {
        self.reject_mutations.load(Ordering::SeqCst)
    }

    fn ack(&self) -> SuccessResponse {
        SuccessResponse {
            success: !self.rejecting(),
            error: None,
        }
    }

    /// Mirror the backend join of trade_tags into each trade
    fn sync_trade_tags(&self, trade_id: i64) {
        let tags = self.tags.lock().unwrap().clone();
        let ids = self.trade_tags.lock().unwrap().get(&trade_id).cloned().unwrap_or_default();
        if let Some(trade) = self.trades.lock().unwrap().iter_mut().find(|t| t.id == trade_id) {
            trade.tags = tags.into_iter().filter(|t| ids.contains(&t.id)).collect();
        }
    }
}

#[async_trait]
impl JournalApi for MockJournal {
    fn base_url(&self) -> &str {
        "http://journal.test"
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.gate("GET /api/health")?;
        Ok(HealthStatus {
            status: "ok".to_string(),
            message: Some("Trading Journal API is running!".to_string()),
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.gate("POST /auth/login")?;
        if credentials.password == "secret" {
            Ok(AuthResponse {
                success: true,
                redirect: Some("/".to_string()),
                error: None,
            })
        } else {
            Err(ApiError::AuthenticationError("Invalid credentials".to_string()))
        }
    }

    async fn register(&self, _input: &RegisterInput) -> Result<AuthResponse, ApiError> {
        self.gate("POST /auth/register")?;
        Ok(AuthResponse {
            success: true,
            redirect: Some("/".to_string()),
            error: None,
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.gate("GET /auth/logout")
    }

    async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        self.gate("GET /auth/user")?;
        Ok(CurrentUser {
            id: 1,
            email: "trader@example.com".to_string(),
            full_name: Some("Test Trader".to_string()),
            plan: Some("free".to_string()),
        })
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>, ApiError> {
        self.gate("GET /api/trades/")?;
        if self.fail_fetch_trades.load(Ordering::SeqCst) {
            return Err(ApiError::ParseError("reload failed".to_string()));
        }
        Ok(self.trades.lock().unwrap().clone())
    }

    async fn create_trade(&self, input: &CreateTradeInput) -> Result<CreateTradeResponse, ApiError> {
        self.gate("POST /api/trades/")?;
        if self.rejecting() {
            return Ok(CreateTradeResponse {
                success: false,
                trade_id: None,
                message: None,
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let risk = (input.entry_price - input.stop_loss).abs();
        let reward = (input.take_profit - input.entry_price).abs();
        let trade = Trade {
            id,
            pair: input.pair.clone(),
            session: input.session.clone(),
            timeframe: input.timeframe.clone(),
            setup_type: input.setup_type.clone(),
            trade_type: input.trade_type.clone(),
            entry_price: input.entry_price,
            stop_loss: input.stop_loss,
            take_profit: input.take_profit,
            position_size: input.position_size,
            risk_amount: risk * input.position_size,
            reward_amount: reward * input.position_size,
            risk_reward_ratio: if risk > 0.0 { (reward / risk * 100.0).round() / 100.0 } else { 0.0 },
            risk_percentage: Some(risk / input.entry_price * 100.0),
            status: TradeStatus::Open,
            exit_price: None,
            profit_loss: None,
            entry_time: Some("2024-01-02T09:00:00".to_string()),
            exit_time: None,
            confidence: input.confidence,
            emotion_before: input.emotion_before.clone(),
            rule_followed: Some(input.rule_followed == crate::models::RuleFollowed::Yes),
            notes: Some(input.notes.clone()),
            screenshot_before: None,
            screenshot_after: None,
            tags: Vec::new(),
        };
        // Newest first, like the backend's ORDER BY entry_time DESC
        self.trades.lock().unwrap().insert(0, trade);

        Ok(CreateTradeResponse {
            success: true,
            trade_id: Some(id),
            message: Some("Trade created successfully".to_string()),
        })
    }

    async fn close_trade(&self, trade_id: i64, exit_price: f64) -> Result<CloseTradeResponse, ApiError> {
        self.gate(format!("PUT /api/trades/{}", trade_id))?;
        if self.rejecting() {
            return Ok(CloseTradeResponse {
                success: false,
                profit_loss: None,
            });
        }

        let mut trades = self.trades.lock().unwrap();
        let trade = trades
            .iter_mut()
            .find(|t| t.id == trade_id)
            .ok_or_else(|| ApiError::NotFound("Trade not found or access denied".to_string()))?;

        let pnl = if trade.trade_type.eq_ignore_ascii_case("buy") {
            (exit_price - trade.entry_price) * trade.position_size
        } else {
            (trade.entry_price - exit_price) * trade.position_size
        };
        trade.status = TradeStatus::Closed;
        trade.exit_price = Some(exit_price);
        trade.profit_loss = Some(pnl);

        Ok(CloseTradeResponse {
            success: true,
            profit_loss: Some((pnl * 100.0).round() / 100.0),
        })
    }

    async fn delete_trade(&self, trade_id: i64) -> Result<SuccessResponse, ApiError> {
        self.gate(format!("DELETE /api/trades/{}", trade_id))?;
        if !self.rejecting() {
            self.trades.lock().unwrap().retain(|t| t.id != trade_id);
        }
        Ok(self.ack())
    }

    async fn export_csv(&self) -> Result<Vec<u8>, ApiError> {
        self.gate("GET /api/trades/export/csv")?;
        self.csv
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::NotFound("No trades to export".to_string()))
    }

    async fn fetch_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.gate("GET /api/tags/")?;
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn create_tag(&self, input: &CreateTagInput) -> Result<CreateTagResponse, ApiError> {
        self.gate("POST /api/tags/")?;
        let mut tags = self.tags.lock().unwrap();
        if tags.iter().any(|t| t.name == input.name) {
            return Err(ApiError::Status {
                status: 400,
                message: "UNIQUE constraint failed: tags.name".to_string(),
            });
        }
        let id = tags.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        tags.push(Tag {
            id,
            name: input.name.clone(),
            color: input.color.clone(),
        });
        Ok(CreateTagResponse {
            success: true,
            tag_id: Some(id),
        })
    }

    async fn fetch_trade_tags(&self, trade_id: i64) -> Result<Vec<Tag>, ApiError> {
        self.gate(format!("GET /api/tags/trade/{}", trade_id))?;
        let ids = self.trade_tags.lock().unwrap().get(&trade_id).cloned().unwrap_or_default();
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn add_tag(&self, trade_id: i64, tag_id: i64) -> Result<SuccessResponse, ApiError> {
        self.gate(format!("POST /api/tags/trade/{}/add", trade_id))?;
        if !self.rejecting() {
            self.trade_tags.lock().unwrap().entry(trade_id).or_default().push(tag_id);
            self.sync_trade_tags(trade_id);
        }
        Ok(self.ack())
    }

    async fn remove_tag(&self, trade_id: i64, tag_id: i64) -> Result<SuccessResponse, ApiError> {
        self.gate(format!("POST /api/tags/trade/{}/remove", trade_id))?;
        if !self.rejecting() {
            if let Some(ids) = self.trade_tags.lock().unwrap().get_mut(&trade_id) {
                ids.retain(|id| *id != tag_id);
            }
            self.sync_trade_tags(trade_id);
        }
        Ok(self.ack())
    }

    async fn overall_stats(&self) -> Result<OverallStats, ApiError> {
        self.gate("GET /api/statistics/overall")?;
        Ok(OverallStats {
            total_trades: 3,
            win_rate: 66.67,
            total_profit_loss: 25.0,
            total_wins: 2,
            total_losses: 1,
            ..OverallStats::default()
        })
    }

    async fn daily_stats(&self, days: u32) -> Result<Vec<DailyStats>, ApiError> {
        self.gate(format!("GET /api/statistics/daily/{}", days))?;
        Ok(vec![
            DailyStats {
                date: "2024-01-02".to_string(),
                trades: 2,
                profit_loss: 30.0,
                wins: 2,
                losses: 0,
            },
            DailyStats {
                date: "2024-01-03".to_string(),
                trades: 1,
                profit_loss: -5.0,
                wins: 0,
                losses: 1,
            },
        ])
    }

    async fn session_stats(&self) -> Result<Vec<BreakdownStats>, ApiError> {
        self.gate("GET /api/statistics/session")?;
        if self.fail_session_stats.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(vec![BreakdownStats {
            label: "London".to_string(),
            total_trades: 3,
            wins: 2,
            losses: 1,
            win_rate: 66.67,
            total_pnl: 25.0,
        }])
    }

    async fn setup_stats(&self) -> Result<Vec<BreakdownStats>, ApiError> {
        self.gate("GET /api/statistics/setup")?;
        Ok(Vec::new())
    }

    async fn mistake_stats(&self) -> Result<Vec<MistakeFrequency>, ApiError> {
        self.gate("GET /api/statistics/mistakes")?;
        Ok(vec![MistakeFrequency {
            name: "FOMO".to_string(),
            color: "#dc2626".to_string(),
            count: 2,
        }])
    }

    async fn monthly_report(&self, year: i32, month: u32) -> Result<MonthlyReport, ApiError> {
        self.gate(format!("GET /api/statistics/monthly-report/{}/{}", year, month))?;
        Ok(serde_json::from_str(&format!(
            r#"{{"month": "{}-{:02}", "total_trades": 0, "message": "No trades this month"}}"#,
            year, month
        ))?)
    }

    async fn upload_screenshot(
        &self,
        trade_id: i64,
        kind: ScreenshotKind,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<ScreenshotResponse, ApiError> {
        self.gate("POST /api/screenshots/upload")?;
        let stored = format!("{}_{}_{}", trade_id, kind, file_name);
        self.uploads.lock().unwrap().push(Upload {
            trade_id,
            kind,
            file_name,
            size: bytes.len(),
        });
        Ok(ScreenshotResponse {
            success: !self.rejecting(),
            url: Some(format!("/api/screenshots/view/{}", stored)),
            filename: Some(stored),
            error: None,
        })
    }

    async fn capture_screenshot(&self, request: &CaptureUrlRequest) -> Result<ScreenshotResponse, ApiError> {
        self.gate("POST /api/screenshots/capture-url")?;
        let stored = format!("{}_{}_capture.png", request.trade_id, request.kind);
        Ok(ScreenshotResponse {
            success: true,
            url: Some(format!("/api/screenshots/view/{}", stored)),
            filename: Some(stored),
            error: None,
        })
    }

    async fn fetch_screenshot(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        self.gate(format!("GET /api/screenshots/view/{}", filename))?;
        Ok(b"\x89PNG fake".to_vec())
    }
}
