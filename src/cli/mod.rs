use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::{LeagueService, NewGame};
use crate::domain::{GameRecord, Placement, SortKey};
use crate::storage::DEFAULT_LEAGUE_FILE;

/// League - Commander League Tracker
#[derive(Parser)]
#[command(name = "league")]
#[command(about = "Track placements, MVPs and standings for a recurring multiplayer game league")]
#[command(version)]
pub struct Cli {
    /// League save file path
    #[arg(short, long, default_value = DEFAULT_LEAGUE_FILE)]
    pub file: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Enable verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new league file
    Init {
        /// Initial roster
        players: Vec<String>,
    },

    /// Player management commands
    #[command(subcommand)]
    Player(PlayerCommands),

    /// Record the results of a game
    Record {
        /// Placement for a player, as NAME=PLACEMENT (1st, 2nd, 3rd, 4th, 5th+, dnp).
        /// Rostered players not listed did not play.
        #[arg(short, long = "place", value_name = "NAME=PLACEMENT", value_parser = parse_result, required = true)]
        places: Vec<(String, Placement)>,

        /// Notes about the game
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Most valuable player (must be on the roster)
        #[arg(short, long)]
        mvp: Option<String>,

        /// Deck used
        #[arg(short, long, default_value = "")]
        deck: String,
    },

    /// Show league standings
    Standings {
        /// Sort by: average, games
        #[arg(short, long, default_value = "average")]
        sort: String,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List recorded games, most recent first
    History {
        /// Maximum number of games to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a single recorded game
    Game {
        /// Game number, as listed by `history`
        number: usize,
    },

    /// Zero all scores and clear the history, keeping the roster
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Export data to CSV
    Export {
        /// What to export: standings, history
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Verify stored stats against the game history
    Check,
}

#[derive(Subcommand)]
pub enum PlayerCommands {
    /// Add a player to the roster
    Add {
        /// Player name (must be unique)
        name: String,
    },

    /// Remove a player from the roster
    Remove {
        /// Player name
        name: String,
    },

    /// List the roster
    List,

    /// Show detailed player information
    Show {
        /// Player name
        name: String,
    },
}

/// Parse a `NAME=PLACEMENT` pair.
fn parse_result(s: &str) -> Result<(String, Placement), String> {
    let (name, placement) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=PLACEMENT, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing player name in '{}'", s));
    }
    let placement = placement.parse::<Placement>().map_err(|e| e.to_string())?;
    Ok((name.to_string(), placement))
}

impl Cli {
    /// Install the tracing subscriber. `RUST_LOG` takes precedence over the flags.
    pub fn init_logging(&self) {
        let level = if self.verbose {
            "debug"
        } else {
            self.log_level.as_str()
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    pub fn run(self) -> Result<()> {
        if let Commands::Init { players } = &self.command {
            let service = LeagueService::init(&self.file, players.as_slice())?;
            println!(
                "League initialized: {} ({} players)",
                self.file,
                service.league().players().len()
            );
            return Ok(());
        }

        let mut service = LeagueService::open(&self.file)?;

        match self.command {
            Commands::Init { .. } => unreachable!("handled above"),

            Commands::Player(player_cmd) => {
                run_player_command(&mut service, player_cmd)?;
            }

            Commands::Record {
                places,
                notes,
                mvp,
                deck,
            } => {
                let mut results = BTreeMap::new();
                for (name, placement) in places {
                    if results.insert(name.clone(), placement).is_some() {
                        anyhow::bail!("Placement for '{}' given more than once", name);
                    }
                }

                let game = service.record_game(NewGame {
                    results,
                    notes,
                    mvp,
                    deck_used: deck,
                })?;
                println!(
                    "Recorded game #{} ({} players)",
                    service.league().history().len(),
                    game.participants().count()
                );
                print_game_results(&game);
            }

            Commands::Standings { sort, format } => {
                run_standings_command(&service, SortKey::from(sort.as_str()), &format)?;
            }

            Commands::History { limit } => {
                let games = service.list_games(limit);
                if games.is_empty() {
                    println!("No games recorded yet.");
                } else {
                    for (number, game) in games {
                        print_game(number, game);
                        println!();
                    }
                }
            }

            Commands::Game { number } => {
                let game = service.get_game(number)?;
                print_game(number, game);
            }

            Commands::Reset { yes } => {
                if !yes {
                    anyhow::bail!(
                        "Reset clears all scores and history. Re-run with --yes to confirm."
                    );
                }
                service.reset()?;
                println!("League has been reset.");
            }

            Commands::Export {
                export_type,
                output,
            } => {
                run_export_command(&service, &export_type, output.as_deref())?;
            }

            Commands::Check => {
                run_check_command(&service)?;
            }
        }

        Ok(())
    }
}

fn run_player_command(service: &mut LeagueService, cmd: PlayerCommands) -> Result<()> {
    match cmd {
        PlayerCommands::Add { name } => {
            let player = service.add_player(&name)?;
            println!("Added player: {} ({})", name.trim(), player.color);
        }

        PlayerCommands::Remove { name } => {
            let removed = service.remove_player(&name)?;
            println!(
                "Removed player: {} ({} pts, {} games)",
                removed.name, removed.player.points, removed.player.games_played
            );
            if removed.games_in_history > 0 {
                println!(
                    "  {} recorded game(s) still mention {}",
                    removed.games_in_history, removed.name
                );
            }
        }

        PlayerCommands::List => {
            let players = service.league().players();
            if players.is_empty() {
                println!("No players found.");
            } else {
                println!("{:<20} {:<10}", "NAME", "COLOR");
                println!("{}", "-".repeat(31));
                for (name, player) in players {
                    println!("{:<20} {:<10}", name, player.color);
                }
            }
        }

        PlayerCommands::Show { name } => {
            let info = service.get_player_info(&name)?;
            let player = &info.player;

            println!("Player: {}", info.name);
            println!("  Color:        {}", player.color);
            println!("  Rank:         {}", info.rank);
            println!("  Points:       {}", player.points);
            println!("  Games played: {}", player.games_played);
            println!("  Average:      {:.2}", info.average);
            println!("  MVP awards:   {}", player.mvp_count);
            if let Some(last) = info.last_played {
                println!("  Last played:  {}", last.format("%Y-%m-%d %H:%M:%S"));
            }
            println!();
            println!("  Placements:");
            for (placement, count) in &info.placements {
                println!("    {:<6} {}", placement, count);
            }
        }
    }
    Ok(())
}

fn run_standings_command(service: &LeagueService, sort: SortKey, format: &str) -> Result<()> {
    match format {
        "json" => {
            let standings = service.standings(sort);
            println!("{}", serde_json::to_string_pretty(&standings)?);
        }
        "csv" => {
            service.export_standings(std::io::stdout())?;
        }
        _ => {
            let standings = service.standings(sort);
            if standings.is_empty() {
                println!("No players found.");
                return Ok(());
            }
            println!("Standings (sorted by {})", sort);
            println!();
            println!(
                "{:>3}  {:<20} {:>6} {:>6} {:>7} {:>4}",
                "#", "PLAYER", "POINTS", "GAMES", "AVG", "MVP"
            );
            println!("{}", "-".repeat(51));
            for (position, standing) in standings.iter().enumerate() {
                println!(
                    "{:>3}  {:<20} {:>6} {:>6} {:>7.2} {:>4}",
                    position + 1,
                    standing.name,
                    standing.points,
                    standing.games_played,
                    standing.average,
                    standing.mvp_count
                );
            }
        }
    }
    Ok(())
}

fn run_export_command(
    service: &LeagueService,
    export_type: &str,
    output: Option<&str>,
) -> Result<()> {
    use std::fs::File;
    use std::io::{stdout, Write};

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match export_type {
        "standings" => {
            let count = service.export_standings(writer)?;
            if let Some(path) = output {
                eprintln!("Exported {} players to {}", count, path);
            }
        }
        "history" => {
            let count = service.export_history(writer)?;
            if let Some(path) = output {
                eprintln!("Exported {} game results to {}", count, path);
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: standings, history",
                export_type
            );
        }
    }

    Ok(())
}

fn run_check_command(service: &LeagueService) -> Result<()> {
    println!("Checking league integrity...\n");

    let report = service.check_integrity();

    println!("Players: {}", report.player_count);
    println!("Games:   {}", report.game_count);
    println!();

    if !report.orphaned_names.is_empty() {
        println!("Removed players still in history:");
        for name in &report.orphaned_names {
            println!("  - {}", name);
        }
        println!();
    }

    if report.is_healthy() {
        println!("League is consistent.");
    } else {
        println!("Issues found:");
        for drift in &report.drifts {
            println!("  - {}", drift);
        }
        anyhow::bail!("League integrity check failed");
    }

    Ok(())
}

fn print_game(number: usize, game: &GameRecord) {
    println!(
        "Game #{} - {}",
        number,
        game.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    print_game_results(game);
}

fn print_game_results(game: &GameRecord) {
    for (name, placement) in &game.results {
        println!("  {}: {}", name, placement);
    }
    if !game.notes.is_empty() {
        println!("  Notes: {}", game.notes);
    }
    if let Some(mvp) = &game.mvp {
        println!("  MVP: {}", mvp);
    }
    if !game.deck_used.is_empty() {
        println!("  Deck Used: {}", game.deck_used);
    }
}
