//! Risk/reward and risk-percentage arithmetic for the new-trade form.
//!
//! Inputs arrive as raw field text. Anything that does not start with a
//! number counts as zero, and a zero input means "not filled in yet".

/// Initial R:R text shown before any price is entered
pub const EMPTY_RR: &str = "0.00";

/// Lenient float parse: leading numeric prefix, otherwise zero.
///
/// `" 1.10 "` → 1.1, `"1.10abc"` → 1.1, `"abc"` / `""` → 0.
/// Non-finite values also give 0, so `"Infinity"` and `"1e400"` count as not
/// filled in, unlike the browser's `parseFloat`.
pub fn parse_price(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    // Exponent only counts when digits follow it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reward over risk, rounded to 2 decimals.
///
/// `None` when any input is zero; `Some(0.0)` when entry equals stop loss.
pub fn risk_reward_ratio(entry: f64, stop_loss: f64, take_profit: f64) -> Option<f64> {
    if entry == 0.0 || stop_loss == 0.0 || take_profit == 0.0 {
        return None;
    }

    let risk = (entry - stop_loss).abs();
    let reward = (take_profit - entry).abs();
    let rr = if risk > 0.0 { reward / risk } else { 0.0 };

    Some(round2(rr))
}

/// Distance to stop loss as a percentage of entry, rounded to 2 decimals.
///
/// `None` when entry or stop loss is zero.
pub fn risk_percentage(entry: f64, stop_loss: f64) -> Option<f64> {
    if entry == 0.0 || stop_loss == 0.0 {
        return None;
    }

    let risk = (entry - stop_loss).abs();
    Some(round2(risk / entry * 100.0))
}

pub fn format_rr(rr: f64) -> String {
    format!("1:{:.2}", rr)
}

pub fn format_risk_pct(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// The two live read-outs next to the price inputs
#[derive(Debug, Clone, PartialEq)]
pub struct RiskPanel {
    pub rr: String,
    pub risk_pct: Option<String>,
}

impl Default for RiskPanel {
    fn default() -> Self {
        Self {
            rr: EMPTY_RR.to_string(),
            risk_pct: None,
        }
    }
}

impl RiskPanel {
    /// Recompute from raw field values. Each read-out keeps its previous
    /// text when its inputs are incomplete.
    pub fn recalculate(&mut self, entry: &str, stop_loss: &str, take_profit: &str) {
        let entry = parse_price(entry);
        let stop_loss = parse_price(stop_loss);
        let take_profit = parse_price(take_profit);

        if let Some(rr) = risk_reward_ratio(entry, stop_loss, take_profit) {
            self.rr = format_rr(rr);
        }
        if let Some(pct) = risk_percentage(entry, stop_loss) {
            self.risk_pct = Some(format_risk_pct(pct));
        }
    }

    /// Back to the blank form state after a successful submit
    pub fn reset(&mut self) {
        self.rr = EMPTY_RR.to_string();
    }
}
