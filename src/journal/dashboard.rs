//! Dashboard view models built from the statistics endpoints.

use std::fmt;

use crate::models::{BreakdownStats, DailyStats, MistakeFrequency, OverallStats, StreakKind};

use super::view::format_usd;

#[derive(Debug, Clone, PartialEq)]
pub struct StatCards {
    pub total_pnl: String,
    pub pnl_positive: bool,
    pub win_rate: String,
    pub expectancy: String,
    pub profit_factor: String,
    pub max_drawdown: String,
    pub total_trades: String,
    pub avg_r_multiple: String,
    pub risk_discipline: String,
    pub current_streak: String,
}

impl StatCards {
    pub fn from_stats(stats: &OverallStats) -> Self {
        let streak = &stats.current_streak;
        let current_streak = match streak.kind {
            _ if streak.count == 0 => "-".to_string(),
            StreakKind::Win => format!("{} 🟢", streak.count),
            StreakKind::Loss => format!("{} 🔴", streak.count),
            StreakKind::None => "-".to_string(),
        };

        Self {
            total_pnl: format_usd(stats.total_profit_loss),
            pnl_positive: stats.total_profit_loss >= 0.0,
            win_rate: format!("{}%", stats.win_rate),
            expectancy: format_usd(stats.expectancy),
            profit_factor: format!("{:.2}", stats.profit_factor),
            max_drawdown: format_usd(stats.max_drawdown),
            total_trades: stats.total_trades.to_string(),
            avg_r_multiple: format!("{}R", stats.avg_r_multiple),
            risk_discipline: format!("{}%", stats.risk_discipline),
            current_streak,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: String,
    pub daily_pnl: f64,
    pub cumulative_pnl: f64,
}

/// Running total of daily P/L, in the order the backend returned the days
pub fn equity_curve(days: &[DailyStats]) -> Vec<EquityPoint> {
    let mut cumulative_pnl = 0.0;
    days.iter()
        .map(|day| {
            cumulative_pnl += day.profit_loss;
            EquityPoint {
                date: day.date.clone(),
                daily_pnl: day.profit_loss,
                cumulative_pnl,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

pub const PROFIT_COLOR: &str = "#26a69a";
pub const LOSS_COLOR: &str = "#ef5350";

/// Session P/L bars, green for profit and red for loss
pub fn session_bars(sessions: &[BreakdownStats]) -> Vec<Bar> {
    sessions
        .iter()
        .map(|s| Bar {
            label: s.label.clone(),
            value: s.total_pnl,
            color: if s.total_pnl >= 0.0 { PROFIT_COLOR } else { LOSS_COLOR }.to_string(),
        })
        .collect()
}

/// Mistake frequency bars in the tag's own colour
pub fn mistake_bars(mistakes: &[MistakeFrequency]) -> Vec<Bar> {
    mistakes
        .iter()
        .map(|m| Bar {
            label: m.name.clone(),
            value: f64::from(m.count),
            color: m.color.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub label: String,
    pub total_trades: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: String,
    pub total_pnl: String,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BreakdownTable {
    Empty(&'static str),
    Rows(Vec<BreakdownRow>),
}

fn breakdown_table(rows: &[BreakdownStats], empty: &'static str) -> BreakdownTable {
    if rows.is_empty() {
        return BreakdownTable::Empty(empty);
    }
    BreakdownTable::Rows(
        rows.iter()
            .map(|r| BreakdownRow {
                label: r.label.clone(),
                total_trades: r.total_trades,
                wins: r.wins,
                losses: r.losses,
                win_rate: format!("{}%", r.win_rate),
                total_pnl: format_usd(r.total_pnl),
                positive: r.total_pnl >= 0.0,
            })
            .collect(),
    )
}

pub fn setup_table(rows: &[BreakdownStats]) -> BreakdownTable {
    breakdown_table(rows, "No setup data available")
}

pub fn session_table(rows: &[BreakdownStats]) -> BreakdownTable {
    breakdown_table(rows, "No session data available")
}

/// Everything the dashboard page draws
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: StatCards,
    pub equity: Vec<EquityPoint>,
    pub wins: u32,
    pub losses: u32,
    pub session_bars: Vec<Bar>,
    pub mistake_bars: Vec<Bar>,
    pub setup_table: BreakdownTable,
    pub session_table: BreakdownTable,
}

impl DashboardView {
    pub fn build(
        overall: &OverallStats,
        daily: &[DailyStats],
        sessions: &[BreakdownStats],
        setups: &[BreakdownStats],
        mistakes: &[MistakeFrequency],
    ) -> Self {
        Self {
            cards: StatCards::from_stats(overall),
            equity: equity_curve(daily),
            wins: overall.total_wins,
            losses: overall.total_losses,
            session_bars: session_bars(sessions),
            mistake_bars: mistake_bars(mistakes),
            setup_table: setup_table(setups),
            session_table: session_table(sessions),
        }
    }
}

impl fmt::Display for BreakdownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakdownTable::Empty(message) => writeln!(f, "  {}", message),
            BreakdownTable::Rows(rows) => {
                writeln!(f, "  {:<22} {:>6} {:>5} {:>6} {:>9} {:>12}", "", "Trades", "Wins", "Losses", "Win rate", "P/L")?;
                for r in rows {
                    writeln!(
                        f,
                        "  {:<22} {:>6} {:>5} {:>6} {:>9} {:>12}",
                        r.label, r.total_trades, r.wins, r.losses, r.win_rate, r.total_pnl
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.cards;
        writeln!(f, "Total P/L       {}", c.total_pnl)?;
        writeln!(f, "Win rate        {}", c.win_rate)?;
        writeln!(f, "Expectancy      {}", c.expectancy)?;
        writeln!(f, "Profit factor   {}", c.profit_factor)?;
        writeln!(f, "Max drawdown    {}", c.max_drawdown)?;
        writeln!(f, "Total trades    {}", c.total_trades)?;
        writeln!(f, "Avg R multiple  {}", c.avg_r_multiple)?;
        writeln!(f, "Risk discipline {}", c.risk_discipline)?;
        writeln!(f, "Current streak  {}", c.current_streak)?;
        writeln!(f, "Wins / losses   {} / {}", self.wins, self.losses)?;

        if let Some(last) = self.equity.last() {
            writeln!(f, "\nEquity (last {} days with trades)", self.equity.len())?;
            for point in &self.equity {
                writeln!(f, "  {}  {:>12}  {:>12}", point.date, format_usd(point.daily_pnl), format_usd(point.cumulative_pnl))?;
            }
            writeln!(f, "  closing equity {}", format_usd(last.cumulative_pnl))?;
        }

        if !self.mistake_bars.is_empty() {
            writeln!(f, "\nMistakes")?;
            for bar in &self.mistake_bars {
                writeln!(f, "  {:<20} {}", bar.label, bar.value)?;
            }
        }

        writeln!(f, "\nBy setup")?;
        write!(f, "{}", self.setup_table)?;
        writeln!(f, "\nBy session")?;
        write!(f, "{}", self.session_table)
    }
}
