//! Ballpark CLI library
//!
//! File loading, the player's lineup, season runs and text rendering used by
//! the `bb_cli` binary.

use anyhow::{Context, Result};
use bb_core::models::{InningScore, LINEUP_SIZE};
use bb_core::opponent::{assign_positions, AssignmentStrategy};
use bb_core::tournament::{generate_bracket_sized, MatchWinner, TournamentBracket, TournamentTier};
use bb_core::{GameResult, GameSimulator, RosterCandidate, TeamLineup};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name the player's side plays under.
pub const PLAYER_TEAM_NAME: &str = "Player";

/// Read a candidate pool (JSON array of candidates).
pub fn load_pool(path: &Path) -> Result<Vec<RosterCandidate>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pool file: {}", path.display()))?;
    let pool: Vec<RosterCandidate> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse pool file: {}", path.display()))?;
    log::info!("loaded {} candidates from {}", pool.len(), path.display());
    Ok(pool)
}

/// Run a game request file through the JSON API.
pub fn run_game_request(path: &Path) -> Result<String> {
    let request = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file: {}", path.display()))?;
    bb_core::simulate_game_json(&request).map_err(|e| anyhow::anyhow!(e))
}

/// The player's side: the nine candidates with the highest stat average,
/// placed by optimal assignment.
pub fn player_lineup(pool: &[RosterCandidate]) -> Result<TeamLineup> {
    if pool.len() < LINEUP_SIZE {
        anyhow::bail!("pool has {} candidates, need at least {}", pool.len(), LINEUP_SIZE);
    }
    let mut ranked: Vec<&RosterCandidate> = pool.iter().collect();
    ranked.sort_by(|a, b| b.stats.average().total_cmp(&a.stats.average()));
    let best: Vec<RosterCandidate> = ranked.into_iter().take(LINEUP_SIZE).cloned().collect();
    let members = assign_positions(&best, AssignmentStrategy::Optimal);
    Ok(TeamLineup::from_members(PLAYER_TEAM_NAME, &members, 1.0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonGame {
    pub match_id: String,
    pub round: u32,
    pub opponent: String,
    /// "player-opponent"
    pub score: String,
    pub won: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub tier: TournamentTier,
    pub games: Vec<SeasonGame>,
    pub champion: String,
    pub player_is_champion: bool,
    pub bracket: TournamentBracket,
}

/// Play a whole bracket: the player's games are simulated, everything else
/// is settled by strength. A tied game counts as a player loss.
pub fn run_season(
    pool: &[RosterCandidate],
    tier: TournamentTier,
    team_count: usize,
    rng: &mut impl Rng,
) -> Result<SeasonSummary> {
    let player = player_lineup(pool)?;
    let simulator = GameSimulator::default();
    let mut bracket = generate_bracket_sized(pool, tier, team_count, rng)?;
    let mut games = Vec::new();

    while let Some(next) = bracket.player_match().map(|m| m.id.clone()) {
        bracket = bracket.resolve_cpu_matches(rng)?;
        let current = bracket
            .find_match(&next)
            .cloned()
            .with_context(|| format!("match {} disappeared", next))?;
        let opponent = current
            .opponent()
            .with_context(|| format!("match {} has no opponent yet", next))?;
        let lineup = opponent.lineup(tier.power_multiplier());

        let game = simulator.simulate(&player, &lineup, rng)?;
        let won = game.home_total.runs > game.away_total.runs;
        log::info!(
            "round {} vs {}: {} ({})",
            current.round,
            opponent.name,
            game.score_string(),
            if won { "win" } else { "loss" }
        );
        games.push(SeasonGame {
            match_id: next.clone(),
            round: current.round,
            opponent: opponent.name.clone(),
            score: game.score_string(),
            won,
        });
        bracket = bracket.record_match_result(&next, won, &game.score_string())?;
    }
    bracket = bracket.resolve_cpu_matches(rng)?;

    let champion = match bracket.champion() {
        Some(MatchWinner::Player) => PLAYER_TEAM_NAME.to_string(),
        Some(MatchWinner::Team(team)) => team.name.clone(),
        None => anyhow::bail!("bracket finished without a champion"),
    };

    Ok(SeasonSummary {
        tier,
        games,
        player_is_champion: bracket.player_is_champion(),
        champion,
        bracket,
    })
}

/// Classic line score, visitors on top.
pub fn format_line_score(game: &GameResult) -> String {
    let width = game.away_name.len().max(game.home_name.len()).max(4);
    let mut out = String::new();

    out.push_str(&format!("{:width$} ", "", width = width));
    for inning in &game.innings {
        out.push_str(&format!("{:>3}", inning.inning));
    }
    out.push_str("    R  H  E\n");

    let row = |name: &str, cell: &dyn Fn(&InningScore) -> String, r: u32, h: u32, e: u32| {
        let mut line = format!("{:width$} ", name, width = width);
        for inning in &game.innings {
            line.push_str(&format!("{:>3}", cell(inning)));
        }
        line.push_str(&format!("  {:>3}{:>3}{:>3}\n", r, h, e));
        line
    };

    out.push_str(&row(
        &game.away_name,
        &|i: &InningScore| i.team_b_score.to_string(),
        game.away_total.runs,
        game.away_total.hits,
        game.away_total.errors,
    ));
    out.push_str(&row(
        &game.home_name,
        &|i: &InningScore| if i.team_a_skipped { "x".to_string() } else { i.team_a_score.to_string() },
        game.home_total.runs,
        game.home_total.hits,
        game.home_total.errors,
    ));
    out
}

/// One line per match, round by round.
pub fn format_bracket(bracket: &TournamentBracket) -> String {
    let mut out = format!(
        "{} bracket ({} teams, player seed {})\n",
        bracket.tier.display_name(),
        bracket.team_count(),
        bracket.player_seed
    );
    for (i, round) in bracket.rounds.iter().enumerate() {
        out.push_str(&format!("Round {}\n", i + 1));
        for m in round {
            let result = match (&m.winner, &m.score) {
                (Some(MatchWinner::Player), Some(score)) => format!("  -> {} ({})", PLAYER_TEAM_NAME, score),
                (Some(MatchWinner::Team(team)), Some(score)) => format!("  -> {} ({})", team.name, score),
                _ => String::new(),
            };
            out.push_str(&format!(
                "  {:<7} {} vs {}{}\n",
                m.id,
                m.team1.label(),
                m.team2.label(),
                result
            ));
        }
    }
    out
}
