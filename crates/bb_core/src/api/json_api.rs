use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::{GameConfig, GameSimulator, GameWinner};
use crate::models::{AtBatRecord, InningScore, LineTotals, RosterCandidate, TeamLineup};
use crate::stats::BoxScore;
use crate::tournament::{generate_bracket_sized, TournamentBracket, TournamentTier};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const SCHEMA_VERSION: u8 = 1;

pub mod error_codes {
    pub const INVALID_JSON: &str = "E_INVALID_JSON";
    pub const SCHEMA_VERSION: &str = "E_SCHEMA_VERSION";
    pub const SERIALIZE: &str = "E_SERIALIZE";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

fn parse_request<'a, T: Deserialize<'a>>(request_json: &'a str) -> Result<T, String> {
    serde_json::from_str(request_json).map_err(|e| {
        warn!("rejected request: {}", e);
        err_code(error_codes::INVALID_JSON, format!("Invalid JSON request: {}", e))
    })
}

fn check_schema(version: u8) -> Result<(), String> {
    if version != SCHEMA_VERSION {
        return Err(err_code(
            error_codes::SCHEMA_VERSION,
            format!("Unsupported schema version: {}", version),
        ));
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| err_code(error_codes::SERIALIZE, e))
}

#[derive(Debug, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Overrides `config.innings` when set
    #[serde(default)]
    pub innings: Option<u8>,
    #[serde(default)]
    pub config: Option<GameConfig>,
    pub home: TeamLineup,
    pub away: TeamLineup,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub home_name: String,
    pub away_name: String,
    pub winner: GameWinner,
    /// "home-away"
    pub score: String,
    pub innings: Vec<InningScore>,
    pub home_total: LineTotals,
    pub away_total: LineTotals,
    pub home_at_bats: Vec<AtBatRecord>,
    pub away_at_bats: Vec<AtBatRecord>,
    pub box_score: BoxScore,
}

/// Simulate one game from a [`GameRequest`] and return a [`GameResponse`].
pub fn simulate_game_json(request_json: &str) -> Result<String, String> {
    let request: GameRequest = parse_request(request_json)?;
    check_schema(request.schema_version)?;

    let mut config = request.config.unwrap_or_default();
    if let Some(innings) = request.innings {
        config = config.with_innings(innings);
    }
    let simulator = GameSimulator::new(config).map_err(|e| err_code(e.code(), e))?;

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let game = simulator
        .simulate(&request.home, &request.away, &mut rng)
        .map_err(|e| err_code(e.code(), e))?;
    let box_score = BoxScore::from_game(&game, &request.home, &request.away, &mut rng);

    info!(
        "simulate_game_json: {} at {} {} (seed {})",
        game.away_name,
        game.home_name,
        game.score_string(),
        request.seed
    );

    to_json(&GameResponse {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        winner: game.winner(),
        home_name: game.home_name.clone(),
        away_name: game.away_name.clone(),
        score: game.score_string(),
        innings: game.innings,
        home_total: game.home_total,
        away_total: game.away_total,
        home_at_bats: game.home_at_bats,
        away_at_bats: game.away_at_bats,
        box_score,
    })
}

#[derive(Debug, Deserialize)]
pub struct BracketRequest {
    pub schema_version: u8,
    pub seed: u64,
    #[serde(default)]
    pub tier: TournamentTier,
    /// Defaults to the tier's bracket size
    #[serde(default)]
    pub team_count: Option<usize>,
    pub candidates: Vec<RosterCandidate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BracketResponse {
    pub schema_version: u8,
    pub bracket: TournamentBracket,
}

pub fn generate_bracket_json(request_json: &str) -> Result<String, String> {
    let request: BracketRequest = parse_request(request_json)?;
    check_schema(request.schema_version)?;

    let team_count = request.team_count.unwrap_or_else(|| request.tier.team_count());
    debug!(
        "generate_bracket_json: tier={:?} teams={} pool={}",
        request.tier,
        team_count,
        request.candidates.len()
    );

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let bracket = generate_bracket_sized(&request.candidates, request.tier, team_count, &mut rng)
        .map_err(|e| err_code(e.code(), e))?;

    to_json(&BracketResponse { schema_version: SCHEMA_VERSION, bracket })
}

#[derive(Debug, Deserialize)]
pub struct MatchResultRequest {
    pub schema_version: u8,
    pub bracket: TournamentBracket,
    pub match_id: String,
    pub player_won: bool,
    pub score: String,
}

pub fn record_match_result_json(request_json: &str) -> Result<String, String> {
    let request: MatchResultRequest = parse_request(request_json)?;
    check_schema(request.schema_version)?;

    let bracket = request
        .bracket
        .record_match_result(&request.match_id, request.player_won, &request.score)
        .map_err(|e| {
            warn!("record_match_result_json: {}", e);
            err_code(e.code(), e)
        })?;

    to_json(&BracketResponse { schema_version: SCHEMA_VERSION, bracket })
}

#[derive(Debug, Deserialize)]
pub struct ResolveCpuRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub bracket: TournamentBracket,
}

/// Settle every ready CPU-vs-CPU match of the bracket.
pub fn resolve_cpu_matches_json(request_json: &str) -> Result<String, String> {
    let request: ResolveCpuRequest = parse_request(request_json)?;
    check_schema(request.schema_version)?;

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let bracket = request
        .bracket
        .resolve_cpu_matches(&mut rng)
        .map_err(|e| err_code(e.code(), e))?;

    to_json(&BracketResponse { schema_version: SCHEMA_VERSION, bracket })
}
