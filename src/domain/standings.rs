use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Player, Points};

/// Key used to rank standings, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Points per game played
    #[default]
    Average,
    /// Number of games played
    Games,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Average => "average",
            SortKey::Games => "games",
        }
    }
}

/// Anything other than "games" ranks by average.
impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("games") {
            SortKey::Games
        } else {
            SortKey::Average
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub points: Points,
    pub games_played: u32,
    pub average: f64,
    pub mvp_count: u32,
}

impl Standing {
    pub fn from_player(name: &str, player: &Player) -> Self {
        Self {
            name: name.to_string(),
            points: player.points,
            games_played: player.games_played,
            average: player.average(),
            mvp_count: player.mvp_count,
        }
    }

    fn cmp_by(&self, other: &Self, key: SortKey) -> Ordering {
        let primary = match key {
            SortKey::Average => other.average.total_cmp(&self.average),
            SortKey::Games => other.games_played.cmp(&self.games_played),
        };
        primary.then_with(|| self.name.cmp(&other.name))
    }
}

/// Rank every player descending by `key`. Ties are broken by name, ascending.
pub fn compute_standings(players: &BTreeMap<String, Player>, key: SortKey) -> Vec<Standing> {
    let mut standings: Vec<Standing> = players
        .iter()
        .map(|(name, player)| Standing::from_player(name, player))
        .collect();
    standings.sort_by(|a, b| a.cmp_by(b, key));
    standings
}
