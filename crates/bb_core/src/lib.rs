//! # bb_core - Baseball Match Simulation and Tournament Engine
//!
//! Turns two nine-member lineups into an inning-by-inning scoreboard plus the
//! full ordered plate-appearance stream of each side, and runs
//! single-elimination brackets of generated opponents around it.
//!
//! ## Features
//! - Seeded, reproducible simulation (same seed = same game)
//! - Box scores derived from the plate-appearance streams
//! - Opponent rosters generated from a candidate pool by type and stat band
//! - Immutable bracket updates with winner propagation
//! - JSON API for host applications

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Bracket slots carry whole opponent rosters
#![allow(clippy::large_enum_variant)]
#![allow(clippy::needless_range_loop)]

pub mod ability;
pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod opponent;
pub mod stats;
pub mod tournament;

// Re-export main API functions
pub use api::{
    generate_bracket_json, record_match_result_json, resolve_cpu_matches_json,
    simulate_game_json, GameRequest, GameResponse, SCHEMA_VERSION,
};
pub use error::{BracketError, EngineError, Result};

pub use ability::{evaluate_candidate, AbilityProfile, FielderAbility, PitcherAbility, PositionFitness};
pub use engine::{GameConfig, GameResult, GameSimulator, GameWinner, InningSimulator};
pub use models::{
    AtBatRecord, AtBatResult, ElementType, FieldPosition, InningScore, LineupEntry,
    RosterCandidate, RosterMember, StatProfile, TeamLineup,
};
pub use opponent::{generate_opponent_team, OpponentRequest, OpponentTeam};
pub use stats::{BatterStats, BoxScore, PitcherStats};
pub use tournament::{
    generate_bracket, BracketSlot, MatchWinner, TournamentBracket, TournamentMatch, TournamentTier,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
