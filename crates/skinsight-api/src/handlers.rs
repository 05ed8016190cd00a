//! Request handlers.

pub mod analyze;
pub mod cache;
pub mod health;

pub use analyze::*;
pub use cache::*;
pub use health::*;
