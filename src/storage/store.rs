use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::domain::League;

/// JSON file holding the whole league: `{ "players": {...}, "history": [...] }`.
///
/// Writes go straight to the target file. An interrupted write can leave it
/// truncated.
#[derive(Debug, Clone)]
pub struct LeagueStore {
    path: PathBuf,
}

impl LeagueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the league from disk.
    /// Returns `Ok(None)` if the file does not exist; a malformed file is an error.
    pub fn load(&self) -> Result<Option<League>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Save file not found");
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read league file: {}", self.path.display())
                });
            }
        };

        let league: League = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse league file: {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            players = league.players().len(),
            games = league.history().len(),
            "Loaded league"
        );
        Ok(Some(league))
    }

    /// Write the league to disk, replacing any previous contents.
    pub fn save(&self, league: &League) -> Result<()> {
        let json = serde_json::to_string_pretty(league).context("Failed to serialize league")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write league file: {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            players = league.players().len(),
            games = league.history().len(),
            "Saved league"
        );
        Ok(())
    }
}
