pub mod dashboard;
pub mod filter;
pub mod metrics;
pub mod notice;
pub mod report;
pub mod state;
pub mod view;

pub use dashboard::DashboardView;
pub use filter::{filter_options, FilterOptions, TradeFilter};
pub use metrics::{risk_percentage, risk_reward_ratio, RiskPanel};
pub use notice::{Notice, NoticeLevel};
pub use report::{MonthSelector, MonthlyReportView};
pub use state::AppState;
pub use view::{render_trades, TradeCard, TradeListView};
