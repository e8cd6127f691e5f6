//! Client for the trading journal backend: trade list filtering and rendering,
//! risk arithmetic for the entry form, dashboard/report view models, and the
//! async commands that keep the local snapshot in sync with the server.

pub mod api;
pub mod commands;
pub mod config;
pub mod journal;
pub mod models;

pub use api::{ApiError, HttpJournalClient, JournalApi};
pub use config::ClientConfig;
pub use journal::{AppState, Notice, TradeFilter};
