use std::fmt;

use crate::api::screenshot_path;
use crate::models::{Tag, Trade};

use super::state::AppState;

pub const NO_MATCHES: &str = "No trades match your filters.";
pub const NO_TAGS: &str = "No mistakes tagged";

/// `$12.30`, `-$12.30`
pub fn format_usd(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

/// `+$12.30`, `-$12.30`
pub fn format_signed_usd(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", format_usd(value))
    } else {
        format_usd(value)
    }
}

pub fn confidence_stars(confidence: u8) -> String {
    let filled = usize::from(confidence.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[derive(Debug, Clone, PartialEq)]
pub struct PnlLabel {
    pub text: String,
    pub positive: bool,
}

impl PnlLabel {
    fn signed(value: f64) -> Self {
        Self {
            text: format_signed_usd(value),
            positive: value >= 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotLink {
    pub label: &'static str,
    pub path: String,
}

/// One trade in the list, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct TradeCard {
    pub id: i64,
    pub pair: String,
    pub status_label: String,
    /// Closed trades start folded
    pub collapsed: bool,
    pub trade_type: String,
    pub rr_label: String,
    pub pnl: Option<PnlLabel>,

    pub confidence_stars: Option<String>,
    pub emotion: Option<String>,
    pub rules_label: Option<&'static str>,
    pub risk_pct_label: Option<String>,

    pub entry_price: f64,
    pub exit_price: Option<f64>,
    pub session: String,
    pub setup: String,

    pub screenshots: Vec<ScreenshotLink>,
    pub tags: Vec<Tag>,
    pub can_close: bool,
}

impl TradeCard {
    pub fn from_trade(trade: &Trade) -> Self {
        let closed = trade.closed_result();

        let mut screenshots = Vec::new();
        if let Some(name) = &trade.screenshot_before {
            screenshots.push(ScreenshotLink {
                label: "Before Entry",
                path: screenshot_path(name),
            });
        }
        if let Some(name) = &trade.screenshot_after {
            screenshots.push(ScreenshotLink {
                label: "After Exit",
                path: screenshot_path(name),
            });
        }

        Self {
            id: trade.id,
            pair: trade.pair.clone(),
            status_label: trade.status.as_str().to_uppercase(),
            collapsed: !trade.is_open(),
            trade_type: trade.trade_type.clone(),
            rr_label: format!("R:R 1:{}", trade.risk_reward_ratio),
            pnl: closed.map(|c| PnlLabel::signed(c.profit_loss)),
            confidence_stars: trade.confidence.filter(|c| *c > 0).map(confidence_stars),
            emotion: trade.emotion_before.clone().filter(|e| !e.is_empty()),
            rules_label: trade.rule_followed.map(|yes| if yes { "Yes" } else { "No" }),
            risk_pct_label: trade
                .risk_percentage
                .filter(|pct| *pct != 0.0)
                .map(|pct| format!("{:.2}%", pct)),
            entry_price: trade.entry_price,
            exit_price: closed.map(|c| c.exit_price),
            session: trade.session.clone(),
            setup: trade.setup_type.clone(),
            screenshots,
            tags: trade.tags.clone(),
            can_close: trade.is_open(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TradeListView {
    /// Nothing passed the filter; not an error
    Empty,
    Cards(Vec<TradeCard>),
}

impl TradeListView {
    pub fn len(&self) -> usize {
        match self {
            TradeListView::Empty => 0,
            TradeListView::Cards(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn render_trade_list(trades: &[&Trade]) -> TradeListView {
    if trades.is_empty() {
        return TradeListView::Empty;
    }
    TradeListView::Cards(trades.iter().map(|t| TradeCard::from_trade(t)).collect())
}

/// The list as the page shows it: snapshot, filtered
pub fn render_trades(state: &AppState) -> TradeListView {
    render_trade_list(&state.visible_trades())
}

impl fmt::Display for TradeCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<5} {:<8} {:<7} {:<5} {}",
            self.id, self.pair, self.status_label, self.trade_type, self.rr_label
        )?;
        if let Some(pnl) = &self.pnl {
            write!(f, "  {}", pnl.text)?;
        }
        writeln!(f)?;

        if self.collapsed {
            return Ok(());
        }

        write!(f, "       {} / {} | entry {}", self.session, self.setup, self.entry_price)?;
        if let Some(exit) = self.exit_price {
            write!(f, " | exit {}", exit)?;
        }
        if let Some(pct) = &self.risk_pct_label {
            write!(f, " | risk {}", pct)?;
        }
        writeln!(f)?;

        let mut meta = Vec::new();
        if let Some(stars) = &self.confidence_stars {
            meta.push(format!("confidence {}", stars));
        }
        if let Some(emotion) = &self.emotion {
            meta.push(format!("emotion {}", emotion));
        }
        if let Some(rules) = self.rules_label {
            meta.push(format!("rules {}", rules));
        }
        if !meta.is_empty() {
            writeln!(f, "       {}", meta.join(" | "))?;
        }

        let tags = if self.tags.is_empty() {
            NO_TAGS.to_string()
        } else {
            self.tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ")
        };
        writeln!(f, "       Mistakes: {}", tags)?;

        for shot in &self.screenshots {
            writeln!(f, "       {}: {}", shot.label, shot.path)?;
        }
        Ok(())
    }
}

impl fmt::Display for TradeListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeListView::Empty => writeln!(f, "{}", NO_MATCHES),
            TradeListView::Cards(cards) => cards.iter().try_for_each(|card| write!(f, "{}", card)),
        }
    }
}
