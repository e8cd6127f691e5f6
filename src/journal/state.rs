use crate::models::{Tag, Trade};

use super::filter::{filter_options, FilterOptions, TradeFilter};

/// Client-side state behind the trade list page.
///
/// `trades` is the snapshot from the last fetch. It is only ever replaced as a
/// whole, never patched in place.
#[derive(Debug, Clone)]
pub struct AppState {
    trades: Vec<Trade>,
    tags: Vec<Tag>,
    pub filter: TradeFilter,
    online: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            trades: Vec::new(),
            tags: Vec::new(),
            filter: TradeFilter::default(),
            online: true,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn trade(&self, trade_id: i64) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == trade_id)
    }

    /// Swap in a freshly fetched list
    pub fn replace_trades(&mut self, trades: Vec<Trade>) {
        log::debug!("Replacing trade snapshot: {} -> {} trades", self.trades.len(), trades.len());
        self.trades = trades;
    }

    pub fn replace_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
    }

    pub fn set_filter(&mut self, filter: TradeFilter) {
        self.filter = filter;
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    /// Snapshot with the active filter applied
    pub fn visible_trades(&self) -> Vec<&Trade> {
        self.filter.apply(&self.trades)
    }

    pub fn filter_options(&self) -> FilterOptions {
        filter_options(&self.trades)
    }

    /// Returns true when the status flipped
    pub fn mark_online(&mut self) -> bool {
        let changed = !self.online;
        self.online = true;
        changed
    }

    /// Returns true when the status flipped
    pub fn mark_offline(&mut self) -> bool {
        let changed = self.online;
        self.online = false;
        changed
    }
}
