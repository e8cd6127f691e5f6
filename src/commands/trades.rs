use std::path::Path;

use crate::api::{ApiError, JournalApi};
use crate::journal::{render_trades, AppState, TradeListView};
use crate::models::{ScreenshotKind, TradeForm};

use super::screenshots::upload_screenshot;

/// Fetch the trade list, replace the snapshot and render it through the active filter
pub async fn load_trades(api: &dyn JournalApi, state: &mut AppState) -> Result<TradeListView, ApiError> {
    let trades = api.fetch_trades().await?;
    log::info!("Loaded {} trades", trades.len());
    state.replace_trades(trades);
    Ok(render_trades(state))
}

/// Reload after a mutation the backend already accepted. A failed reload
/// leaves the old snapshot and does not turn the mutation into a failure.
async fn refresh_after_mutation(api: &dyn JournalApi, state: &mut AppState) {
    if let Err(e) = load_trades(api, state).await {
        log::error!("Failed to reload trades: {}", e);
    }
}

/// Validate the form, create the trade, attach the optional "before" screenshot
/// and reload. Returns the new trade id.
pub async fn create_trade(
    api: &dyn JournalApi,
    state: &mut AppState,
    form: &TradeForm,
    screenshot: Option<&Path>,
) -> Result<i64, ApiError> {
    let input = form.to_input().map_err(ApiError::InvalidInput)?;

    let response = api.create_trade(&input).await?;
    if !response.success {
        return Err(ApiError::Rejected(
            response.message.unwrap_or_else(|| "Trade was not created".to_string()),
        ));
    }
    let trade_id = response
        .trade_id
        .ok_or_else(|| ApiError::ParseError("Create response has no trade_id".to_string()))?;
    log::info!("Created trade {} ({} {})", trade_id, input.pair, input.trade_type);

    // A failed upload leaves the trade in place
    if let Some(path) = screenshot {
        if let Err(e) = upload_screenshot(api, trade_id, ScreenshotKind::Before, path).await {
            log::warn!("Screenshot upload for trade {} failed: {}", trade_id, e);
        }
    }

    refresh_after_mutation(api, state).await;
    Ok(trade_id)
}

/// Parse the exit price typed by the user. Empty or non-numeric input never
/// reaches the backend.
pub fn parse_exit_price(input: &str) -> Result<f64, ApiError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::InvalidInput("Invalid exit price".to_string()))
}

/// Close a trade at the given exit price and reload. Returns the realised P/L
/// as computed by the backend.
pub async fn close_trade(
    api: &dyn JournalApi,
    state: &mut AppState,
    trade_id: i64,
    exit_input: &str,
) -> Result<f64, ApiError> {
    let exit_price = parse_exit_price(exit_input)?;

    let response = api.close_trade(trade_id, exit_price).await?;
    if !response.success {
        return Err(ApiError::Rejected(format!("Trade {} was not closed", trade_id)));
    }
    let profit_loss = response
        .profit_loss
        .ok_or_else(|| ApiError::ParseError("Close response has no profit_loss".to_string()))?;
    log::info!("Closed trade {} at {} (P/L {:.2})", trade_id, exit_price, profit_loss);

    refresh_after_mutation(api, state).await;
    Ok(profit_loss)
}

pub async fn delete_trade(api: &dyn JournalApi, state: &mut AppState, trade_id: i64) -> Result<(), ApiError> {
    let response = api.delete_trade(trade_id).await?;
    if !response.success {
        return Err(ApiError::Rejected(
            response.error.unwrap_or_else(|| format!("Trade {} was not deleted", trade_id)),
        ));
    }
    log::info!("Deleted trade {}", trade_id);

    refresh_after_mutation(api, state).await;
    Ok(())
}
