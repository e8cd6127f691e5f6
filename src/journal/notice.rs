use std::fmt;

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Common shape: success message, silence on backend refusals, a fixed
/// failure message otherwise. Rejected input is shown as-is.
fn outcome<T>(result: &Result<T, ApiError>, success: impl FnOnce(&T) -> Notice, failure: &str) -> Option<Notice> {
    match result {
        Ok(value) => Some(success(value)),
        Err(ApiError::InvalidInput(message)) => Some(Notice::error(message.clone())),
        Err(e) if e.is_silent() => {
            log::debug!("Suppressed backend refusal: {}", e);
            None
        }
        Err(e) => {
            log::error!("{}: {}", failure, e);
            Some(Notice::error(failure))
        }
    }
}

pub fn trade_created<T>(result: &Result<T, ApiError>) -> Option<Notice> {
    outcome(result, |_| Notice::success("✅ Trade added successfully!"), "❌ Error adding trade")
}

pub fn trade_closed(result: &Result<f64, ApiError>) -> Option<Notice> {
    outcome(
        result,
        |pnl| {
            if *pnl >= 0.0 {
                Notice::success(format!("✅ Trade closed! Profit: ${:.2}", pnl))
            } else {
                Notice::warning(format!("❌ Trade closed. Loss: ${:.2}", pnl.abs()))
            }
        },
        "Error closing trade",
    )
}

pub fn trade_deleted<T>(result: &Result<T, ApiError>) -> Option<Notice> {
    outcome(result, |_| Notice::success("✅ Trade deleted"), "Error deleting trade")
}

/// Export always answers: any refusal from the backend means nothing to export
pub fn exported<T>(result: &Result<T, ApiError>) -> Notice {
    match result {
        Ok(_) => Notice::success("✅ Trades exported successfully!"),
        Err(e) if e.is_silent() => Notice::warning("No trades to export"),
        Err(e) => {
            log::error!("Export failed: {}", e);
            Notice::error("❌ Export failed")
        }
    }
}

pub fn back_online() -> Notice {
    Notice::success("🟢 Back online - Data will sync automatically")
}

pub fn went_offline() -> Notice {
    Notice::warning("🔴 You're offline - Changes saved locally")
}
