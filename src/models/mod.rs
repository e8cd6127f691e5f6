pub mod screenshot;
pub mod stats;
pub mod tag;
pub mod trade;
pub mod user;

pub use screenshot::*;
pub use stats::*;
pub use tag::*;
pub use trade::*;
pub use user::*;
