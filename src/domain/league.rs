use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    build_audit_report, compute_standings, AuditReport, GameRecord, Placement, Player,
    PlayerColor, SortKey, Standing,
};

/// Roster a league starts with when no save file exists yet.
pub const DEFAULT_ROSTER: [&str; 9] = [
    "Mike", "Mez", "Dan", "Vik", "Noah", "Lucas", "Isaac", "Layla", "Steve",
];

/// The league ledger: the roster keyed by player name plus the append-only
/// game history. This is also the shape of the save file.
///
/// Stats are credited as games are recorded; standings are derived on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct League {
    #[serde(default)]
    players: BTreeMap<String, Player>,
    #[serde(default)]
    history: Vec<GameRecord>,
}

impl League {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a league with the given roster, colors assigned in order.
    pub fn with_players<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut league = Self::new();
        for name in names {
            league.add_player(name.as_ref());
        }
        league
    }

    pub fn players(&self) -> &BTreeMap<String, Player> {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(String::as_str)
    }

    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }

    /// Game by 1-based number, in recording order.
    pub fn game(&self, number: usize) -> Option<&GameRecord> {
        number.checked_sub(1).and_then(|index| self.history.get(index))
    }

    /// Append a game and credit everyone who played.
    ///
    /// Names not on the roster are kept in the record but credit nobody.
    /// The MVP bonus only applies to a rostered player. No check is made that
    /// anyone actually played.
    pub fn record_game_results(
        &mut self,
        results: BTreeMap<String, Placement>,
        notes: impl Into<String>,
        mvp: Option<String>,
        deck_used: impl Into<String>,
    ) -> &GameRecord {
        let game = GameRecord::new(results)
            .with_notes(notes)
            .with_mvp(mvp)
            .with_deck_used(deck_used);
        self.apply(game)
    }

    fn apply(&mut self, game: GameRecord) -> &GameRecord {
        for (name, placement) in game.participants() {
            if let Some(player) = self.players.get_mut(name) {
                player.credit_game(placement.points());
            }
        }

        if let Some(player) = game.mvp.as_deref().and_then(|mvp| self.players.get_mut(mvp)) {
            player.credit_mvp();
        }

        self.history.push(game);
        &self.history[self.history.len() - 1]
    }

    pub fn standings(&self, sort_by: SortKey) -> Vec<Standing> {
        compute_standings(&self.players, sort_by)
    }

    /// Add a player with zeroed stats. Returns false, changing nothing,
    /// when the name is blank or already taken.
    pub fn add_player(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.players.contains_key(name) {
            return false;
        }
        let color = PlayerColor::for_index(self.players.len());
        self.players.insert(name.to_string(), Player::new(color));
        true
    }

    /// Remove a player and their stats. History still mentions them.
    pub fn remove_player(&mut self, name: &str) -> Option<Player> {
        self.players.remove(name)
    }

    /// Number of recorded games that mention `name`.
    pub fn games_mentioning(&self, name: &str) -> usize {
        self.history.iter().filter(|game| game.mentions(name)).count()
    }

    /// Zero every player's stats and clear the history. The roster stays.
    pub fn reset(&mut self) {
        for player in self.players.values_mut() {
            player.reset();
        }
        self.history.clear();
    }

    pub fn audit(&self) -> AuditReport {
        build_audit_report(&self.players, &self.history)
    }
}
