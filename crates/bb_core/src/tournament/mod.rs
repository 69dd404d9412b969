//! # Tournament brackets
//!
//! Single elimination. One seed slot belongs to the player; the other
//! `team_count - 1` are generated opponents. Results propagate winners into
//! the next round; CPU-vs-CPU matches can be settled in bulk with
//! [`TournamentBracket::resolve_cpu_matches`].

pub mod bracket;
pub mod tier;

pub use bracket::{
    generate_bracket, generate_bracket_sized, match_id, BracketSlot, MatchWinner, MAX_TEAM_COUNT,
    TournamentBracket, TournamentMatch,
};
pub use tier::TournamentTier;
