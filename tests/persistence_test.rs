mod common;

use std::fs;

use anyhow::Result;
use common::{game, game_with_mvp, league_path, test_service};
use league_ledger::application::{AppError, LeagueService};
use league_ledger::domain::{Placement, SortKey, DEFAULT_ROSTER};
use league_ledger::storage::LeagueStore;
use tempfile::TempDir;

#[test]
fn test_reopen_preserves_standings_and_history() -> Result<()> {
    let (mut service, temp) = test_service(&["Mike", "Dan", "Vik"])?;
    service.record_game(game_with_mvp(
        &[
            ("Mike", Placement::First),
            ("Dan", Placement::Third),
            ("Vik", Placement::Second),
        ],
        "Dan",
    ))?;
    service.record_game(game(&[("Dan", Placement::First), ("Vik", Placement::FifthOrLower)]))?;

    let reopened = LeagueService::open(league_path(&temp))?;

    for key in [SortKey::Average, SortKey::Games] {
        assert_eq!(reopened.standings(key), service.standings(key));
    }
    assert_eq!(reopened.league().history(), service.league().history());
    Ok(())
}

#[test]
fn test_open_missing_file_starts_with_default_roster() -> Result<()> {
    let temp = TempDir::new()?;
    let service = LeagueService::open(league_path(&temp))?;

    let names: Vec<&str> = service.league().player_names().collect();
    let mut expected = DEFAULT_ROSTER.to_vec();
    expected.sort();
    assert_eq!(names, expected);
    assert!(service.league().history().is_empty());
    // Nothing is written until the league changes
    assert!(!service.store().exists());
    Ok(())
}

#[test]
fn test_default_roster_persists_on_first_change() -> Result<()> {
    let temp = TempDir::new()?;
    let mut service = LeagueService::open(league_path(&temp))?;
    service.record_game(game(&[("Mike", Placement::First)]))?;

    let reopened = LeagueService::open(league_path(&temp))?;
    assert_eq!(reopened.league().players().len(), DEFAULT_ROSTER.len());
    assert_eq!(reopened.get_player("Mike")?.points, 5);
    assert_eq!(reopened.get_player("Steve")?.games_played, 0);
    Ok(())
}

#[test]
fn test_open_malformed_file_fails() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(league_path(&temp), r#"{"players": {"Mike": {"points": "lots"}}}"#)?;

    let result = LeagueService::open(league_path(&temp));
    assert!(matches!(result, Err(AppError::Storage(_))));
    Ok(())
}

#[test]
fn test_init_refuses_existing_file() -> Result<()> {
    let (_service, temp) = test_service(&["Mike"])?;

    let result = LeagueService::init(league_path(&temp), &["Dan"]);
    assert!(matches!(result, Err(AppError::LeagueAlreadyExists(_))));

    let service = LeagueService::open(league_path(&temp))?;
    assert!(service.league().has_player("Mike"));
    assert!(!service.league().has_player("Dan"));
    Ok(())
}

#[test]
fn test_reload_without_file_keeps_state() -> Result<()> {
    let (mut service, temp) = test_service(&["Mike"])?;
    fs::remove_file(league_path(&temp))?;

    assert!(!service.reload()?);
    assert!(service.league().has_player("Mike"));
    Ok(())
}

#[test]
fn test_reload_replaces_state() -> Result<()> {
    let (mut first, temp) = test_service(&["Mike"])?;
    let mut second = LeagueService::open(league_path(&temp))?;

    second.add_player("Dan")?;
    assert!(!first.league().has_player("Dan"));

    assert!(first.reload()?);
    assert!(first.league().has_player("Dan"));
    Ok(())
}

#[test]
fn test_loads_files_with_empty_mvp() -> Result<()> {
    let temp = TempDir::new()?;
    let json = r#"{
        "players": {
            "Mike": {"points": 5, "games_played": 1, "mvp_count": 0, "color": "red"},
            "Mez": {"points": 0, "games_played": 0, "mvp_count": 0, "color": "blue"}
        },
        "history": [
            {
                "timestamp": "2025-01-10 20:15:00",
                "results": {"Mike": "1st", "Mez": "Did Not Play"},
                "notes": "",
                "mvp": "",
                "deck_used": ""
            }
        ]
    }"#;
    fs::write(league_path(&temp), json)?;

    let service = LeagueService::open(league_path(&temp))?;
    let game = service.get_game(1)?;
    assert_eq!(game.mvp, None);
    assert_eq!(game.placement_of("Mike"), Some(Placement::First));
    assert_eq!(game.timestamp.to_rfc3339(), "2025-01-10T20:15:00+00:00");
    assert!(service.check_integrity().is_healthy());
    Ok(())
}

#[test]
fn test_store_loads_compact_legacy_output() -> Result<()> {
    let temp = TempDir::new()?;
    let json = concat!(
        r#"{"players": {"Mike": {"points": 6, "games_played": 1, "mvp_count": 1, "color": "red"}, "#,
        r#""Dan": {"points": 3, "games_played": 1, "mvp_count": 0, "color": "green"}}, "#,
        r#""history": [{"timestamp": "2025-01-10 20:15:00", "results": {"Mike": "1st", "Dan": "2nd"}, "#,
        r#""notes": "", "mvp": "Mike", "deck_used": ""}]}"#
    );
    fs::write(league_path(&temp), json)?;

    let store = LeagueStore::new(league_path(&temp));
    let league = store.load()?.expect("league file exists");
    assert_eq!(league.history().len(), 1);
    assert_eq!(league.player("Mike").map(|p| p.points), Some(6));

    // Saving rewrites timestamps as RFC 3339, and the file still loads
    store.save(&league)?;
    let reloaded = store.load()?.expect("league file exists");
    assert_eq!(reloaded, league);
    Ok(())
}

#[test]
fn test_export_standings_to_file() -> Result<()> {
    let (mut service, temp) = test_service(&["Mike", "Mez", "Noah"])?;
    service.record_game(game_with_mvp(
        &[("Mike", Placement::Second), ("Mez", Placement::Third)],
        "Mez",
    ))?;

    let path = temp.path().join("league_export.csv");
    let count = service.export_standings(fs::File::create(&path)?)?;
    assert_eq!(count, 3);

    let contents = fs::read_to_string(&path)?;
    let expected = "\
Player,Points,Games Played,Average Points per Game,MVP Awards
Mez,3,1,3.00,1
Mike,3,1,3.00,0
Noah,0,0,0.00,0
";
    assert_eq!(contents, expected);
    Ok(())
}

#[test]
fn test_export_history_rows() -> Result<()> {
    let (mut service, _temp) = test_service(&["Mike", "Mez", "Noah"])?;
    service.record_game(game(&[("Mike", Placement::First), ("Mez", Placement::Second)]))?;
    service.record_game(game(&[("Noah", Placement::First)]))?;

    let mut out = Vec::new();
    let count = service.export_history(&mut out)?;
    assert_eq!(count, 3);

    let text = String::from_utf8(out)?;
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("1,"));
    assert!(rows[2].starts_with("2,"));
    assert!(rows[2].contains(",Noah,1st,5,"));
    Ok(())
}
