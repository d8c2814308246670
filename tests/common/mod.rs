// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use league_ledger::application::{LeagueService, NewGame};
use league_ledger::domain::Placement;
use tempfile::TempDir;

/// Helper to create a test service over a temporary league file
pub fn test_service(players: &[&str]) -> Result<(LeagueService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = LeagueService::init(league_path(&temp_dir), players)?;
    Ok((service, temp_dir))
}

pub fn league_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("league_scores.json")
}

/// Build a game from `(name, placement)` pairs
pub fn game(entries: &[(&str, Placement)]) -> NewGame {
    NewGame {
        results: entries
            .iter()
            .map(|(name, placement)| (name.to_string(), *placement))
            .collect::<BTreeMap<_, _>>(),
        ..NewGame::default()
    }
}

/// Same as `game`, with an MVP
pub fn game_with_mvp(entries: &[(&str, Placement)], mvp: &str) -> NewGame {
    NewGame {
        mvp: Some(mvp.to_string()),
        ..game(entries)
    }
}
