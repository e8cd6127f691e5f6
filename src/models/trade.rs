use serde::{Deserialize, Deserializer, Serialize};

use super::tag::Tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub pair: String,
    pub session: String,
    #[serde(default)]
    pub timeframe: String,
    pub setup_type: String,
    pub trade_type: String, // "buy" or "sell"

    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    #[serde(default)]
    pub position_size: f64,
    #[serde(default)]
    pub risk_amount: f64,
    #[serde(default)]
    pub reward_amount: f64,
    #[serde(default)]
    pub risk_reward_ratio: f64,
    pub risk_percentage: Option<f64>,

    pub status: TradeStatus,
    pub exit_price: Option<f64>,
    pub profit_loss: Option<f64>,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,

    #[serde(default, deserialize_with = "deserialize_rating")]
    pub confidence: Option<u8>, // 1-5
    pub emotion_before: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub rule_followed: Option<bool>,
    pub notes: Option<String>,

    pub screenshot_before: Option<String>,
    pub screenshot_after: Option<String>,

    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Result of a closed trade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedResult {
    pub exit_price: f64,
    pub profit_loss: f64,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    /// Exit price and P/L, only when the trade is closed and both are recorded
    pub fn closed_result(&self) -> Option<ClosedResult> {
        if self.status != TradeStatus::Closed {
            return None;
        }
        match (self.exit_price, self.profit_loss) {
            (Some(exit_price), Some(profit_loss)) => Some(ClosedResult {
                exit_price,
                profit_loss,
            }),
            _ => None,
        }
    }
}

/// SQLite hands booleans back as 0/1, so accept both shapes
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    }))
}

/// Ratings submitted from an empty form field come back as `""`
fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rating {
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Rating>::deserialize(deserializer)? {
        Some(Rating::Int(i)) => u8::try_from(i).ok().filter(|v| *v > 0),
        Some(Rating::Text(s)) => s.trim().parse::<u8>().ok().filter(|v| *v > 0),
        None => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFollowed {
    Yes,
    No,
}

/// Payload for `POST /api/trades/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTradeInput {
    pub pair: String,
    pub session: String,
    pub timeframe: String,
    pub setup_type: String,
    pub trade_type: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub position_size: f64,
    pub confidence: Option<u8>,
    pub emotion_before: Option<String>,
    pub rule_followed: RuleFollowed,
    pub notes: String,
}

/// Raw values of the new-trade form, as typed by the user
#[derive(Debug, Clone, Default)]
pub struct TradeForm {
    pub pair: String,
    pub session: String,
    pub timeframe: String,
    pub setup_type: String,
    pub trade_type: String,
    pub entry_price: String,
    pub stop_loss: String,
    pub take_profit: String,
    pub position_size: String,
    pub confidence: String,
    pub emotion_before: String,
    pub rule_followed: bool,
    pub notes: String,
}

impl TradeForm {
    /// Validate the form into an API payload. Prices and size must be numbers.
    pub fn to_input(&self) -> Result<CreateTradeInput, String> {
        for (label, value) in [
            ("pair", &self.pair),
            ("session", &self.session),
            ("timeframe", &self.timeframe),
            ("setup type", &self.setup_type),
            ("trade type", &self.trade_type),
        ] {
            if value.trim().is_empty() {
                return Err(format!("Missing {}", label));
            }
        }

        let confidence = match self.confidence.trim() {
            "" => None,
            raw => {
                let value = raw
                    .parse::<u8>()
                    .map_err(|_| format!("Invalid confidence: {}", raw))?;
                if !(1..=5).contains(&value) {
                    return Err(format!("Confidence must be between 1 and 5, got {}", value));
                }
                Some(value)
            }
        };

        let emotion = self.emotion_before.trim();

        Ok(CreateTradeInput {
            pair: self.pair.trim().to_string(),
            session: self.session.trim().to_string(),
            timeframe: self.timeframe.trim().to_string(),
            setup_type: self.setup_type.trim().to_string(),
            trade_type: self.trade_type.trim().to_lowercase(),
            entry_price: parse_number("entry price", &self.entry_price)?,
            stop_loss: parse_number("stop loss", &self.stop_loss)?,
            take_profit: parse_number("take profit", &self.take_profit)?,
            position_size: parse_number("position size", &self.position_size)?,
            confidence,
            emotion_before: (!emotion.is_empty()).then(|| emotion.to_string()),
            rule_followed: if self.rule_followed {
                RuleFollowed::Yes
            } else {
                RuleFollowed::No
            },
            notes: self.notes.clone(),
        })
    }
}

fn parse_number(label: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid {}: {:?}", label, raw))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTradeResponse {
    pub success: bool,
    pub trade_id: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseTradeRequest {
    pub exit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseTradeResponse {
    pub success: bool,
    pub profit_loss: Option<f64>,
}

/// Generic `{success}` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
