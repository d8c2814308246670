use anyhow::Result;
use std::io::Write;

use crate::domain::{League, SortKey};

pub const STANDINGS_HEADER: [&str; 5] = [
    "Player",
    "Points",
    "Games Played",
    "Average Points per Game",
    "MVP Awards",
];

pub const HISTORY_HEADER: [&str; 8] = [
    "Game",
    "Timestamp",
    "Player",
    "Placement",
    "Points",
    "MVP",
    "Deck Used",
    "Notes",
];

/// Exporter for writing league data as CSV
pub struct Exporter<'a> {
    league: &'a League,
}

impl<'a> Exporter<'a> {
    pub fn new(league: &'a League) -> Self {
        Self { league }
    }

    /// Export standings, ranked by average, to CSV
    pub fn export_standings_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(STANDINGS_HEADER)?;

        let standings = self.league.standings(SortKey::Average);
        for standing in &standings {
            csv_writer.write_record(&[
                standing.name.clone(),
                standing.points.to_string(),
                standing.games_played.to_string(),
                format!("{:.2}", standing.average),
                standing.mvp_count.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(standings.len())
    }

    /// Export one row per player per game they took part in
    pub fn export_history_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(HISTORY_HEADER)?;

        let mut count = 0;
        for (index, game) in self.league.history().iter().enumerate() {
            let timestamp = game.timestamp.to_rfc3339();
            for (name, placement) in game.participants() {
                csv_writer.write_record(&[
                    (index + 1).to_string(),
                    timestamp.clone(),
                    name.to_string(),
                    placement.to_string(),
                    game.points_for(name).to_string(),
                    if game.is_mvp(name) { "yes" } else { "" }.to_string(),
                    game.deck_used.clone(),
                    game.notes.clone(),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
