mod audit;
mod game;
mod league;
mod placement;
mod player;
mod standings;

pub use audit::*;
pub use game::*;
pub use league::*;
pub use placement::*;
pub use player::*;
pub use standings::*;
