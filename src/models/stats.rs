use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Loss,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Streak {
    #[serde(rename = "type")]
    pub kind: StreakKind,
    pub count: u32,
}

impl Default for Streak {
    fn default() -> Self {
        Self {
            kind: StreakKind::None,
            count: 0,
        }
    }
}

/// `GET /api/statistics/overall`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallStats {
    pub total_trades: u32,
    pub win_rate: f64,
    pub total_profit_loss: f64,
    pub expectancy: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub total_wins: u32,
    pub total_losses: u32,
    pub avg_r_multiple: f64,
    pub risk_discipline: f64,
    pub current_streak: Streak,
}

/// One row of `GET /api/statistics/daily/{n}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: String, // YYYY-MM-DD
    pub trades: u32,
    pub profit_loss: f64,
    pub wins: u32,
    pub losses: u32,
}

/// Per-session or per-setup breakdown row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownStats {
    #[serde(alias = "session", alias = "setup")]
    pub label: String,
    pub total_trades: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub total_pnl: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistakeFrequency {
    pub name: String,
    pub color: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeHighlight {
    pub pair: String,
    pub pnl: f64,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupHighlight {
    pub name: String,
    pub pnl: f64,
    pub trades: u32,
}

/// `GET /api/statistics/monthly-report/{year}/{month}`
///
/// An empty month only carries `month`, `total_trades` and `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub month: String, // YYYY-MM
    pub total_trades: u32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub trading_days: u32,
    #[serde(default)]
    pub total_pnl: f64,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub total_wins: u32,
    #[serde(default)]
    pub total_losses: u32,
    #[serde(default)]
    pub avg_win: f64,
    #[serde(default)]
    pub avg_loss: f64,
    #[serde(default)]
    pub best_trade: Option<TradeHighlight>,
    #[serde(default)]
    pub worst_trade: Option<TradeHighlight>,
    #[serde(default)]
    pub best_setup: Option<SetupHighlight>,
    #[serde(default)]
    pub discipline_score: f64,
}
