use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{
    AuditReport, GameRecord, League, Placement, Player, SortKey, Standing, DEFAULT_ROSTER,
};
use crate::io::Exporter;
use crate::storage::LeagueStore;

use super::AppError;

/// Application service providing high-level operations for the league.
/// This is the primary interface for any client (CLI, TUI, etc.).
///
/// Every mutating operation writes the league file before returning.
pub struct LeagueService {
    league: League,
    store: LeagueStore,
}

/// A game as submitted by a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewGame {
    pub results: BTreeMap<String, Placement>,
    pub notes: String,
    pub mvp: Option<String>,
    pub deck_used: String,
}

/// Result of removing a player
pub struct RemovedPlayer {
    pub name: String,
    pub player: Player,
    /// Recorded games that still mention the removed name
    pub games_in_history: usize,
}

/// Detailed player information
pub struct PlayerInfo {
    pub name: String,
    pub player: Player,
    /// 1-based position in the standings by average
    pub rank: usize,
    pub average: f64,
    pub placements: Vec<(Placement, u32)>,
    pub last_played: Option<DateTime<Utc>>,
}

impl LeagueService {
    /// Create a service over an in-memory league and the store it saves to.
    pub fn new(league: League, store: LeagueStore) -> Self {
        Self { league, store }
    }

    /// Create a new league file with the given roster.
    pub fn init<S: AsRef<str>>(
        path: impl Into<PathBuf>,
        players: &[S],
    ) -> Result<Self, AppError> {
        let store = LeagueStore::new(path);
        if store.exists() {
            return Err(AppError::LeagueAlreadyExists(store.path().to_path_buf()));
        }

        let service = Self::new(League::with_players(players), store);
        service.save()?;
        info!(
            path = %service.store.path().display(),
            players = service.league.players().len(),
            "Initialized league"
        );
        Ok(service)
    }

    /// Open the league at `path`. If the file does not exist yet the league
    /// starts with the default roster; nothing is written until the first change.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let store = LeagueStore::new(path);
        let league = match store.load()? {
            Some(league) => league,
            None => {
                info!("Starting new league with the default roster");
                League::with_players(DEFAULT_ROSTER)
            }
        };
        Ok(Self::new(league, store))
    }

    pub fn league(&self) -> &League {
        &self.league
    }

    pub fn store(&self) -> &LeagueStore {
        &self.store
    }

    pub fn save(&self) -> Result<(), AppError> {
        Ok(self.store.save(&self.league)?)
    }

    /// Replace the in-memory league with the file contents.
    /// Returns false, leaving the league untouched, if there is no file.
    pub fn reload(&mut self) -> Result<bool, AppError> {
        match self.store.load()? {
            Some(league) => {
                self.league = league;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========================
    // Player operations
    // ========================

    /// Add a player to the roster.
    pub fn add_player(&mut self, name: &str) -> Result<&Player, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidPlayerName(name.to_string()));
        }
        if !self.league.add_player(name) {
            return Err(AppError::PlayerAlreadyExists(name.to_string()));
        }
        self.save()?;
        info!(player = name, "Added player");

        self.league
            .player(name)
            .ok_or_else(|| AppError::PlayerNotFound(name.to_string()))
    }

    /// Remove a player from the roster. Their past games stay in history.
    pub fn remove_player(&mut self, name: &str) -> Result<RemovedPlayer, AppError> {
        let name = name.trim();
        let player = self
            .league
            .remove_player(name)
            .ok_or_else(|| AppError::PlayerNotFound(name.to_string()))?;
        self.save()?;

        let games_in_history = self.league.games_mentioning(name);
        info!(player = name, games_in_history, "Removed player");
        Ok(RemovedPlayer {
            name: name.to_string(),
            player,
            games_in_history,
        })
    }

    /// Get a rostered player by name.
    pub fn get_player(&self, name: &str) -> Result<&Player, AppError> {
        let name = name.trim();
        self.league
            .player(name)
            .ok_or_else(|| AppError::PlayerNotFound(name.to_string()))
    }

    /// Get detailed player information.
    pub fn get_player_info(&self, name: &str) -> Result<PlayerInfo, AppError> {
        let name = name.trim();
        let player = self.get_player(name)?.clone();
        let rank = self
            .league
            .standings(SortKey::Average)
            .iter()
            .position(|standing| standing.name == name)
            .map(|index| index + 1)
            .unwrap_or(0);

        let placements = Placement::ALL
            .iter()
            .filter(|placement| placement.played())
            .map(|placement| {
                let count = self
                    .league
                    .history()
                    .iter()
                    .filter(|game| game.placement_of(name) == Some(*placement))
                    .count();
                (*placement, count as u32)
            })
            .collect();

        let last_played = self
            .league
            .history()
            .iter()
            .rev()
            .find(|game| game.placement_of(name).is_some_and(|p| p.played()))
            .map(|game| game.timestamp);

        Ok(PlayerInfo {
            name: name.to_string(),
            average: player.average(),
            player,
            rank,
            placements,
            last_played,
        })
    }

    // ========================
    // Game operations
    // ========================

    /// Record a game.
    ///
    /// Rostered players missing from `results` are entered as "Did Not Play".
    /// Every named player and the MVP must be on the roster, and at least one
    /// player must have a real placement.
    pub fn record_game(&mut self, game: NewGame) -> Result<GameRecord, AppError> {
        let NewGame {
            mut results,
            notes,
            mvp,
            deck_used,
        } = game;

        if let Some(unknown) = results.keys().find(|name| !self.league.has_player(name)) {
            return Err(AppError::PlayerNotFound(unknown.clone()));
        }
        for name in self.league.player_names() {
            results
                .entry(name.to_string())
                .or_insert(Placement::DidNotPlay);
        }
        if !results.values().any(Placement::played) {
            return Err(AppError::NoPlacements);
        }

        let mvp = mvp
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        if let Some(name) = &mvp {
            if !self.league.has_player(name) {
                return Err(AppError::PlayerNotFound(name.clone()));
            }
        }

        let record = self
            .league
            .record_game_results(results, notes.trim(), mvp, deck_used.trim())
            .clone();
        self.save()?;

        info!(
            game = self.league.history().len(),
            players = record.participants().count(),
            mvp = record.mvp.as_deref().unwrap_or("-"),
            "Recorded game"
        );
        Ok(record)
    }

    /// Most recent games first, at most `limit` of them, paired with their game number.
    pub fn list_games(&self, limit: Option<usize>) -> Vec<(usize, &GameRecord)> {
        let history = self.league.history();
        history
            .iter()
            .enumerate()
            .rev()
            .take(limit.unwrap_or(history.len()))
            .map(|(index, game)| (index + 1, game))
            .collect()
    }

    /// Get a game by its 1-based number.
    pub fn get_game(&self, number: usize) -> Result<&GameRecord, AppError> {
        self.league
            .game(number)
            .ok_or(AppError::GameNotFound(number))
    }

    // ========================
    // League operations
    // ========================

    pub fn standings(&self, sort_by: SortKey) -> Vec<Standing> {
        self.league.standings(sort_by)
    }

    /// Zero every player's stats and clear the history.
    pub fn reset(&mut self) -> Result<(), AppError> {
        let games = self.league.history().len();
        self.league.reset();
        self.save()?;
        info!(cleared_games = games, "Reset league");
        Ok(())
    }

    /// Check the stored stats against the game history.
    pub fn check_integrity(&self) -> AuditReport {
        let report = self.league.audit();
        debug!(
            drifts = report.drifts.len(),
            orphans = report.orphaned_names.len(),
            "Audited league"
        );
        report
    }

    // ========================
    // Export operations
    // ========================

    pub fn export_standings<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        Ok(Exporter::new(&self.league).export_standings_csv(writer)?)
    }

    pub fn export_history<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        Ok(Exporter::new(&self.league).export_history_csv(writer)?)
    }
}
