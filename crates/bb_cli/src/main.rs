//! Ballpark CLI
//!
//! Simulate single games, draw tournament brackets, play whole seasons.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "bb_cli")]
#[command(about = "Baseball match simulation and tournament brackets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Simulate one game from a JSON request file
    Game {
        /// Request file (schema_version, seed, home, away)
        #[arg(long)]
        request: PathBuf,

        /// Write the JSON response here instead of printing a line score
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate a tournament bracket
    Bracket {
        /// Candidate pool JSON file
        #[arg(long)]
        pool: PathBuf,

        /// regional | national | world
        #[arg(long, default_value = "regional")]
        tier: bb_core::TournamentTier,

        #[arg(long, default_value = "1")]
        seed: u64,

        /// Overrides the tier's bracket size (power of two)
        #[arg(long)]
        teams: Option<usize>,

        /// Write the bracket JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Play a whole tournament with the pool's strongest nine
    Season {
        /// Candidate pool JSON file
        #[arg(long)]
        pool: PathBuf,

        #[arg(long, default_value = "regional")]
        tier: bb_core::TournamentTier,

        #[arg(long, default_value = "1")]
        seed: u64,

        #[arg(long)]
        teams: Option<usize>,

        /// Write the season summary JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bb_cli=info,bb_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn write_json<T: serde::Serialize>(path: &PathBuf, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Saved to: {}", path.display());
    Ok(())
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Game { request, out } => {
            let response = bb_cli::run_game_request(&request)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &response)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Saved to: {}", path.display());
                }
                None => {
                    let parsed: bb_core::GameResponse = serde_json::from_str(&response)?;
                    let game = bb_core::GameResult {
                        home_name: parsed.home_name,
                        away_name: parsed.away_name,
                        innings: parsed.innings,
                        home_at_bats: parsed.home_at_bats,
                        away_at_bats: parsed.away_at_bats,
                        home_total: parsed.home_total,
                        away_total: parsed.away_total,
                    };
                    print!("{}", bb_cli::format_line_score(&game));
                    println!("Final: {} ({:?})", parsed.score, parsed.winner);
                }
            }
        }

        Commands::Bracket { pool, tier, seed, teams, out } => {
            let candidates = bb_cli::load_pool(&pool)?;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let bracket = bb_core::tournament::generate_bracket_sized(
                &candidates,
                tier,
                teams.unwrap_or_else(|| tier.team_count()),
                &mut rng,
            )?;
            print!("{}", bb_cli::format_bracket(&bracket));
            if let Some(path) = out {
                write_json(&path, &bracket)?;
            }
        }

        Commands::Season { pool, tier, seed, teams, out } => {
            let candidates = bb_cli::load_pool(&pool)?;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let summary = bb_cli::run_season(
                &candidates,
                tier,
                teams.unwrap_or_else(|| tier.team_count()),
                &mut rng,
            )?;

            for game in &summary.games {
                println!(
                    "Round {} vs {:<20} {:>6}  {}",
                    game.round,
                    game.opponent,
                    game.score,
                    if game.won { "W" } else { "L" }
                );
            }
            println!("Champion: {}", summary.champion);
            print!("{}", bb_cli::format_bracket(&summary.bracket));

            if let Some(path) = out {
                write_json(&path, &summary)?;
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("bb_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
