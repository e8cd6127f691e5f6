pub mod export;
pub mod screenshots;
pub mod session;
pub mod stats;
pub mod tags;
pub mod trades;

#[cfg(test)]
pub(crate) mod mock;

pub use export::*;
pub use screenshots::*;
pub use session::*;
pub use stats::*;
pub use tags::*;
pub use trades::*;
