use std::fmt;

use serde::{Deserialize, Serialize};

use super::Points;

/// Display color tag for a player. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Orange,
    Purple,
    Magenta,
    Cyan,
    Yellow,
    Pink,
}

impl PlayerColor {
    pub const PALETTE: [PlayerColor; 9] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Orange,
        PlayerColor::Purple,
        PlayerColor::Magenta,
        PlayerColor::Cyan,
        PlayerColor::Yellow,
        PlayerColor::Pink,
    ];

    /// Color for the player joining a roster of `index` players.
    /// Repeats once the roster outgrows the palette.
    pub fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
            PlayerColor::Orange => "orange",
            PlayerColor::Purple => "purple",
            PlayerColor::Magenta => "magenta",
            PlayerColor::Cyan => "cyan",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Pink => "pink",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accumulated league stats for one rostered player.
/// The player's name is the roster key and is not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub points: Points,
    pub games_played: u32,
    #[serde(default)]
    pub mvp_count: u32,
    pub color: PlayerColor,
}

impl Player {
    pub fn new(color: PlayerColor) -> Self {
        Self {
            points: 0,
            games_played: 0,
            mvp_count: 0,
            color,
        }
    }

    /// Points per game played, or 0 when the player has not played yet.
    pub fn average(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.points) / f64::from(self.games_played)
        }
    }

    pub fn credit_game(&mut self, points: Points) {
        self.points += points;
        self.games_played += 1;
    }

    pub fn credit_mvp(&mut self) {
        self.points += 1;
        self.mvp_count += 1;
    }

    pub fn reset(&mut self) {
        self.points = 0;
        self.games_played = 0;
        self.mvp_count = 0;
    }
}
