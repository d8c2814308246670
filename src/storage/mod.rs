mod store;

pub use store::*;

/// Save file used when no other path is given.
pub const DEFAULT_LEAGUE_FILE: &str = "league_scores.json";
