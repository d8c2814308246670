use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::{GameRecord, Player, Points};

/// Tallies a player should have, recomputed from history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub points: Points,
    pub games_played: u32,
    pub mvp_count: u32,
}

impl Tally {
    fn of(player: &Player) -> Self {
        Self {
            points: player.points,
            games_played: player.games_played,
            mvp_count: player.mvp_count,
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pts, {} games, {} MVP",
            self.points, self.games_played, self.mvp_count
        )
    }
}

/// A rostered player whose stored stats disagree with history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatDrift {
    pub name: String,
    pub stored: Tally,
    pub expected: Tally,
}

impl fmt::Display for StatDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: stored {} but history gives {}",
            self.name, self.stored, self.expected
        )
    }
}

/// Result of checking the roster against the game history.
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    pub player_count: usize,
    pub game_count: usize,
    pub drifts: Vec<StatDrift>,
    /// Names found in history that are no longer on the roster.
    pub orphaned_names: BTreeSet<String>,
}

impl AuditReport {
    /// Orphaned names are expected after a removal and do not make
    /// the league unhealthy.
    pub fn is_healthy(&self) -> bool {
        self.drifts.is_empty()
    }
}

/// Recompute every rostered player's stats from history.
pub fn expected_tallies(
    players: &BTreeMap<String, Player>,
    history: &[GameRecord],
) -> BTreeMap<String, Tally> {
    let mut tallies: BTreeMap<String, Tally> = players
        .keys()
        .map(|name| (name.clone(), Tally::default()))
        .collect();

    for game in history {
        for (name, placement) in game.participants() {
            if let Some(tally) = tallies.get_mut(name) {
                tally.points += placement.points();
                tally.games_played += 1;
            }
        }
        if let Some(tally) = game.mvp.as_deref().and_then(|mvp| tallies.get_mut(mvp)) {
            tally.points += 1;
            tally.mvp_count += 1;
        }
    }

    tallies
}

pub fn build_audit_report(
    players: &BTreeMap<String, Player>,
    history: &[GameRecord],
) -> AuditReport {
    let expected = expected_tallies(players, history);

    let drifts = players
        .iter()
        .filter_map(|(name, player)| {
            let stored = Tally::of(player);
            let expected = expected.get(name).copied().unwrap_or_default();
            (stored != expected).then(|| StatDrift {
                name: name.clone(),
                stored,
                expected,
            })
        })
        .collect();

    let orphaned_names = history
        .iter()
        .flat_map(|game| game.results.keys().chain(game.mvp.iter()))
        .filter(|name| !players.contains_key(name.as_str()))
        .cloned()
        .collect();

    AuditReport {
        player_count: players.len(),
        game_count: history.len(),
        drifts,
        orphaned_names,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Placement, PlayerColor};

    fn game(entries: &[(&str, Placement)], mvp: Option<&str>) -> GameRecord {
        let results = entries
            .iter()
            .map(|(name, placement)| (name.to_string(), *placement))
            .collect();
        GameRecord::new(results).with_mvp(mvp.map(String::from))
    }

    #[test]
    fn test_expected_tallies() {
        let mut players = BTreeMap::new();
        players.insert("A".to_string(), Player::new(PlayerColor::Red));
        players.insert("B".to_string(), Player::new(PlayerColor::Blue));

        let history = vec![
            game(&[("A", Placement::First), ("B", Placement::Second)], Some("A")),
            game(&[("A", Placement::DidNotPlay), ("B", Placement::First)], None),
        ];

        let tallies = expected_tallies(&players, &history);
        assert_eq!(
            tallies["A"],
            Tally {
                points: 6,
                games_played: 1,
                mvp_count: 1
            }
        );
        assert_eq!(
            tallies["B"],
            Tally {
                points: 8,
                games_played: 2,
                mvp_count: 0
            }
        );
    }

    #[test]
    fn test_drift_detected() {
        let mut players = BTreeMap::new();
        players.insert("A".to_string(), Player::new(PlayerColor::Red));
        let history = vec![game(&[("A", Placement::Third)], None)];

        let report = build_audit_report(&players, &history);
        assert!(!report.is_healthy());
        assert_eq!(report.drifts.len(), 1);
        assert_eq!(report.drifts[0].expected.points, 2);
        assert_eq!(report.drifts[0].stored.points, 0);
    }

    #[test]
    fn test_orphans_are_informational() {
        let mut players = BTreeMap::new();
        let mut a = Player::new(PlayerColor::Red);
        a.credit_game(5);
        players.insert("A".to_string(), a);
        let history = vec![game(&[("A", Placement::First), ("Gone", Placement::Second)], Some("Ghost"))];

        let report = build_audit_report(&players, &history);
        assert!(report.is_healthy());
        assert_eq!(
            report.orphaned_names.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Ghost", "Gone"]
        );
    }
}
