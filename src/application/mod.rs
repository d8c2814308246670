// Application layer - use cases on top of the league ledger.
// Enforces the caller-side rules (known players, at least one placement)
// that the ledger itself leaves to its callers.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
