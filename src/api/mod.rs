pub mod client;
pub mod error;
pub mod http;

pub use client::{screenshot_path, JournalApi};
pub use error::ApiError;
pub use http::HttpJournalClient;
