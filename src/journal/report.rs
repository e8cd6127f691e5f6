use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::models::{MonthlyReport, SetupHighlight, TradeHighlight};

use super::view::{format_signed_usd, format_usd};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month/year pickers for the report page
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSelector {
    /// (month number, name)
    pub months: Vec<(u32, &'static str)>,
    /// Current year and two back, newest first
    pub years: Vec<i32>,
    pub selected_month: u32,
    pub selected_year: i32,
}

impl MonthSelector {
    pub fn for_date(today: NaiveDate) -> Self {
        let year = today.year();
        Self {
            months: (1u32..).zip(MONTH_NAMES).collect(),
            years: (year - 2..=year).rev().collect(),
            selected_month: today.month(),
            selected_year: year,
        }
    }
}

/// Validate a month number coming from user input
pub fn check_month(month: u32) -> Result<u32, String> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(format!("Month must be 1-12, got {}", month))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightTrade {
    pub pair: String,
    pub pnl: String,
    pub date: String,
}

impl HighlightTrade {
    fn best(h: &TradeHighlight) -> Self {
        Self {
            pair: h.pair.clone(),
            pnl: format_signed_usd(h.pnl),
            date: h.date.clone(),
        }
    }

    fn worst(h: &TradeHighlight) -> Self {
        Self {
            pair: h.pair.clone(),
            pnl: format_usd(h.pnl),
            date: h.date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: String,
    pub total_pnl: String,
    pub pnl_positive: bool,
    pub win_rate: String,
    pub total_trades: u32,
    pub discipline_score: String,
    pub trading_days: u32,
    pub avg_win: String,
    pub avg_loss: String,
    pub best_setup: Option<String>,
    pub best_trade: Option<HighlightTrade>,
    pub worst_trade: Option<HighlightTrade>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonthlyReportView {
    Empty { month: String },
    Summary(Box<MonthlySummary>),
}

fn setup_line(setup: &SetupHighlight) -> String {
    format!("{} ({} trades, {})", setup.name, setup.trades, format_usd(setup.pnl))
}

impl MonthlyReportView {
    pub fn from_report(report: &MonthlyReport) -> Self {
        if report.total_trades == 0 {
            return MonthlyReportView::Empty {
                month: report.month.clone(),
            };
        }

        MonthlyReportView::Summary(Box::new(MonthlySummary {
            month: report.month.clone(),
            total_pnl: format_signed_usd(report.total_pnl),
            pnl_positive: report.total_pnl >= 0.0,
            win_rate: format!("{}%", report.win_rate),
            total_trades: report.total_trades,
            discipline_score: format!("{}%", report.discipline_score),
            trading_days: report.trading_days,
            avg_win: format_usd(report.avg_win),
            avg_loss: format_usd(report.avg_loss),
            best_setup: report.best_setup.as_ref().map(setup_line),
            best_trade: report.best_trade.as_ref().map(HighlightTrade::best),
            worst_trade: report.worst_trade.as_ref().map(HighlightTrade::worst),
        }))
    }
}

impl fmt::Display for MonthlyReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MonthlyReportView::Empty { month } => return writeln!(f, "No trades recorded for {}", month),
            MonthlyReportView::Summary(summary) => summary,
        };

        writeln!(f, "Report {}", s.month)?;
        writeln!(f, "  Total P/L         {}", s.total_pnl)?;
        writeln!(f, "  Win rate          {}", s.win_rate)?;
        writeln!(f, "  Total trades      {}", s.total_trades)?;
        writeln!(f, "  Discipline score  {}", s.discipline_score)?;
        writeln!(f, "  Trading days      {}", s.trading_days)?;
        writeln!(f, "  Avg win           {}", s.avg_win)?;
        writeln!(f, "  Avg loss          {}", s.avg_loss)?;
        if let Some(setup) = &s.best_setup {
            writeln!(f, "  Best setup        {}", setup)?;
        }
        if let Some(t) = &s.best_trade {
            writeln!(f, "  Best trade        {} {} on {}", t.pair, t.pnl, t.date)?;
        }
        if let Some(t) = &s.worst_trade {
            writeln!(f, "  Worst trade       {} {} on {}", t.pair, t.pnl, t.date)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_defaults_to_current_month() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let selector = MonthSelector::for_date(today);
        assert_eq!(selector.months.len(), 12);
        assert_eq!(selector.months[0], (1, "January"));
        assert_eq!(selector.months[11], (12, "December"));
        assert_eq!(selector.years, vec![2025, 2024, 2023]);
        assert_eq!(selector.selected_month, 3);
        assert_eq!(selector.selected_year, 2025);
    }

    #[test]
    fn test_check_month() {
        assert_eq!(check_month(12), Ok(12));
        assert!(check_month(0).is_err());
        assert!(check_month(13).is_err());
    }

    #[test]
    fn test_empty_month_view() {
        let report: MonthlyReport =
            serde_json::from_str(r#"{"month": "2025-02", "total_trades": 0, "message": "No trades this month"}"#)
                .unwrap();
        let view = MonthlyReportView::from_report(&report);
        assert_eq!(
            view,
            MonthlyReportView::Empty {
                month: "2025-02".to_string()
            }
        );
        assert_eq!(view.to_string().trim(), "No trades recorded for 2025-02");
    }

    #[test]
    fn test_summary_view() {
        let report: MonthlyReport = serde_json::from_str(
            r#"{
                "month": "2025-01", "total_trades": 4, "trading_days": 3,
                "total_pnl": 42.5, "win_rate": 75.0, "total_wins": 3, "total_losses": 1,
                "avg_win": 20.0, "avg_loss": 17.5,
                "best_trade": {"pair": "EURUSD", "pnl": 30.0, "date": "2025-01-10"},
                "worst_trade": {"pair": "GBPUSD", "pnl": -17.5, "date": "2025-01-12"},
                "best_setup": {"name": "breakout", "pnl": 50.0, "trades": 2},
                "discipline_score": 75.0
            }"#,
        )
        .unwrap();

        match MonthlyReportView::from_report(&report) {
            MonthlyReportView::Summary(s) => {
                assert_eq!(s.total_pnl, "+$42.50");
                assert!(s.pnl_positive);
                assert_eq!(s.win_rate, "75%");
                assert_eq!(s.best_trade.as_ref().unwrap().pnl, "+$30.00");
                assert_eq!(s.worst_trade.as_ref().unwrap().pnl, "-$17.50");
                assert_eq!(s.best_setup.as_deref(), Some("breakout (2 trades, $50.00)"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
