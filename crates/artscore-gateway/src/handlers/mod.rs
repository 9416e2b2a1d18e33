//! Request handlers for the scoring API.

pub mod health;
pub mod score;

pub use health::health;
pub use score::score;
