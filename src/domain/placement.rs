use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Points are whole numbers; there are no fractional awards.
pub type Points = u32;

/// Where a player finished in a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
    #[serde(rename = "5th+")]
    FifthOrLower,
    #[serde(rename = "Did Not Play")]
    DidNotPlay,
}

impl Placement {
    pub const ALL: [Placement; 6] = [
        Placement::First,
        Placement::Second,
        Placement::Third,
        Placement::Fourth,
        Placement::FifthOrLower,
        Placement::DidNotPlay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::First => "1st",
            Placement::Second => "2nd",
            Placement::Third => "3rd",
            Placement::Fourth => "4th",
            Placement::FifthOrLower => "5th+",
            Placement::DidNotPlay => "Did Not Play",
        }
    }

    /// League points awarded for finishing in this position.
    pub fn points(&self) -> Points {
        match self {
            Placement::First => 5,
            Placement::Second => 3,
            Placement::Third => 2,
            Placement::Fourth => 1,
            Placement::FifthOrLower | Placement::DidNotPlay => 0,
        }
    }

    /// Returns true if the player took part in the game.
    /// A fifth-or-lower finish still counts as a game played.
    pub fn played(&self) -> bool {
        !matches!(self, Placement::DidNotPlay)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1st" | "1" | "first" => Ok(Placement::First),
            "2nd" | "2" | "second" => Ok(Placement::Second),
            "3rd" | "3" | "third" => Ok(Placement::Third),
            "4th" | "4" | "fourth" => Ok(Placement::Fourth),
            "5th+" | "5th" | "5+" | "5" => Ok(Placement::FifthOrLower),
            "did not play" | "dnp" | "-" => Ok(Placement::DidNotPlay),
            _ => Err(ParsePlacementError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlacementError(pub String);

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid placement '{}' (expected 1st, 2nd, 3rd, 4th, 5th+ or 'Did Not Play')",
            self.0
        )
    }
}

impl std::error::Error for ParsePlacementError {}
