use crate::api::{ApiError, JournalApi};
use crate::journal::report::check_month;
use crate::journal::{DashboardView, MonthlyReportView};

/// Days of history behind the equity curve
pub const EQUITY_DAYS: u32 = 30;

/// A failed secondary panel is logged and drawn empty
fn or_empty<T: Default>(panel: &str, result: Result<T, ApiError>) -> T {
    result.unwrap_or_else(|e| {
        log::error!("Failed to load {} statistics: {}", panel, e);
        T::default()
    })
}

/// Fetch all dashboard statistics concurrently. The overall figures are
/// required; the charts and tables fall back to their empty states.
pub async fn load_dashboard(api: &dyn JournalApi) -> Result<DashboardView, ApiError> {
    let (overall, daily, sessions, setups, mistakes) = futures::join!(
        api.overall_stats(),
        api.daily_stats(EQUITY_DAYS),
        api.session_stats(),
        api.setup_stats(),
        api.mistake_stats(),
    );

    let overall = overall?;
    let daily = or_empty("daily", daily);
    let sessions = or_empty("session", sessions);
    let setups = or_empty("setup", setups);
    let mistakes = or_empty("mistake", mistakes);
    log::info!(
        "Dashboard: {} trades, {} days, {} sessions, {} setups, {} mistakes",
        overall.total_trades,
        daily.len(),
        sessions.len(),
        setups.len(),
        mistakes.len()
    );

    Ok(DashboardView::build(&overall, &daily, &sessions, &setups, &mistakes))
}

pub async fn load_monthly_report(api: &dyn JournalApi, year: i32, month: u32) -> Result<MonthlyReportView, ApiError> {
    let month = check_month(month).map_err(ApiError::InvalidInput)?;
    let report = api.monthly_report(year, month).await?;
    Ok(MonthlyReportView::from_report(&report))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::commands::mock::MockJournal;
    use crate::journal::dashboard::BreakdownTable;

    #[tokio::test]
    async fn test_dashboard_requests_every_panel() {
        let api = MockJournal::default();
        let view = load_dashboard(&api).await.unwrap();

        let mut calls = api.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "GET /api/statistics/daily/30",
                "GET /api/statistics/mistakes",
                "GET /api/statistics/overall",
                "GET /api/statistics/session",
                "GET /api/statistics/setup",
            ]
        );
        assert_eq!(view.cards.total_trades, "3");
        assert_eq!(view.equity.last().unwrap().cumulative_pnl, 25.0);
        assert_eq!(view.setup_table, BreakdownTable::Empty("No setup data available"));
        assert_eq!(view.mistake_bars[0].label, "FOMO");
    }

    #[tokio::test]
    async fn test_failed_panel_is_drawn_empty() {
        let api = MockJournal::default();
        api.fail_session_stats.store(true, Ordering::SeqCst);

        let view = load_dashboard(&api).await.unwrap();
        assert!(view.session_bars.is_empty());
        assert_eq!(view.session_table, BreakdownTable::Empty("No session data available"));
        assert_eq!(view.equity.len(), 2);
    }

    #[tokio::test]
    async fn test_dashboard_fails_without_overall() {
        let api = MockJournal::default();
        api.offline.store(true, Ordering::SeqCst);
        assert!(matches!(load_dashboard(&api).await, Err(ApiError::Io(_))));
    }

    #[tokio::test]
    async fn test_monthly_report() {
        let api = MockJournal::default();
        let view = load_monthly_report(&api, 2025, 2).await.unwrap();
        assert_eq!(
            view,
            MonthlyReportView::Empty {
                month: "2025-02".to_string()
            }
        );

        assert!(matches!(
            load_monthly_report(&api, 2025, 13).await,
            Err(ApiError::InvalidInput(_))
        ));
        assert_eq!(api.calls(), vec!["GET /api/statistics/monthly-report/2025/2"]);
    }
}
