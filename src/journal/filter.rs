use serde::{Deserialize, Serialize};

use crate::models::Trade;

/// Trade list criteria. Every empty field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFilter {
    /// Case-insensitive substring of pair, notes or setup type
    pub search: String,
    pub pair: String,
    pub session: String,
    pub setup: String,
}

impl TradeFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.pair.is_empty() && self.session.is_empty() && self.setup.is_empty()
    }

    pub fn clear(&mut self) {
        *self = TradeFilter::default();
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        self.matches_search(trade)
            && (self.pair.is_empty() || trade.pair == self.pair)
            && (self.session.is_empty() || trade.session == self.session)
            && (self.setup.is_empty() || trade.setup_type == self.setup)
    }

    fn matches_search(&self, trade: &Trade) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();

        trade.pair.to_lowercase().contains(&needle)
            || trade
                .notes
                .as_deref()
                .is_some_and(|notes| notes.to_lowercase().contains(&needle))
            || trade.setup_type.to_lowercase().contains(&needle)
    }

    /// Matching trades in their original order; the input is untouched
    pub fn apply<'a>(&self, trades: &'a [Trade]) -> Vec<&'a Trade> {
        trades.iter().filter(|trade| self.matches(trade)).collect()
    }

    /// Owned variant of [`apply`](Self::apply)
    pub fn apply_owned(&self, trades: &[Trade]) -> Vec<Trade> {
        trades.iter().filter(|trade| self.matches(trade)).cloned().collect()
    }
}

/// Values offered by the pair and setup selectors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub pairs: Vec<String>,
    pub setups: Vec<String>,
}

/// Distinct pairs and setups in first-seen order
pub fn filter_options(trades: &[Trade]) -> FilterOptions {
    let mut options = FilterOptions::default();

    for trade in trades {
        if !options.pairs.contains(&trade.pair) {
            options.pairs.push(trade.pair.clone());
        }
        if !options.setups.contains(&trade.setup_type) {
            options.setups.push(trade.setup_type.clone());
        }
    }

    options
}
