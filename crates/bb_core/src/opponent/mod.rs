//! # Synthetic opponent rosters
//!
//! ```text
//! pool ──► filter_candidates (type → band → widened band → fallback)
//!      ──► select_candidates (Uniform | Balanced)
//!      ──► assign_positions (Greedy | Optimal)
//!      ──► OpponentTeam
//! ```

pub mod assignment;
pub mod selection;

pub use assignment::{assign_positions, total_fitness, AssignmentStrategy};
pub use selection::{
    filter_candidates, select_candidates, CandidateFilter, FilterStage, SelectionStrategy,
    BAND_WIDEN_STEP,
};

use crate::error::Result;
use crate::models::{ElementType, RosterMember, StatProfile, TeamLineup, LINEUP_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name suffixes for generated teams.
const TEAM_SUFFIXES: [&str; 8] =
    ["Comets", "Tigers", "Rangers", "Giants", "Storm", "Pirates", "Knights", "Wolves"];

/// Prefixes for teams without a theme type.
const MIXED_PREFIXES: [&str; 6] = ["United", "All-Star", "Metro", "Coastal", "Capital", "Northern"];

/// Per-stat means over a roster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AverageStats {
    pub hp: f32,
    pub attack: f32,
    pub defense: f32,
    pub special_attack: f32,
    pub special_defense: f32,
    pub speed: f32,
    /// Mean of the six means
    pub overall: f32,
}

impl AverageStats {
    pub fn from_profiles<'a>(profiles: impl IntoIterator<Item = &'a StatProfile>) -> Self {
        let mut sums = [0u32; 6];
        let mut count = 0u32;
        for p in profiles {
            for (sum, value) in sums.iter_mut().zip(p.as_array()) {
                *sum += value as u32;
            }
            count += 1;
        }
        if count == 0 {
            return Self::default();
        }
        let mean = |i: usize| sums[i] as f32 / count as f32;
        let overall = sums.iter().sum::<u32>() as f32 / (count * 6) as f32;
        Self {
            hp: mean(0),
            attack: mean(1),
            defense: mean(2),
            special_attack: mean(3),
            special_defense: mean(4),
            speed: mean(5),
            overall,
        }
    }
}

/// A generated nine-member opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentTeam {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub team_type: Option<ElementType>,
    /// Exactly nine, one per position, in batting order
    pub members: Vec<RosterMember>,
    pub average_stats: AverageStats,
    /// Bracket seed slot (1-based)
    pub seed: u32,
}

impl OpponentTeam {
    /// Lineup for the game simulator, powers scaled by `power_multiplier`.
    pub fn lineup(&self, power_multiplier: f64) -> TeamLineup {
        TeamLineup::from_members(self.name.clone(), &self.members, power_multiplier)
    }

    /// Overall average stat, used for CPU-vs-CPU win odds.
    pub fn strength(&self) -> f32 {
        self.average_stats.overall
    }
}

/// Generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentRequest {
    pub required_type: Option<ElementType>,
    pub min_average: f32,
    pub max_average: f32,
    #[serde(default)]
    pub selection: SelectionStrategy,
    #[serde(default)]
    pub assignment: AssignmentStrategy,
    #[serde(default = "default_seed")]
    pub seed: u32,
}

fn default_seed() -> u32 {
    1
}

impl OpponentRequest {
    pub fn new(required_type: Option<ElementType>, min_average: f32, max_average: f32) -> Self {
        Self {
            required_type,
            min_average,
            max_average,
            selection: SelectionStrategy::default(),
            assignment: AssignmentStrategy::default(),
            seed: default_seed(),
        }
    }

    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_assignment(mut self, assignment: AssignmentStrategy) -> Self {
        self.assignment = assignment;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

/// Build one opponent from the candidate pool.
///
/// Never fails on a thin pool (see [`filter_candidates`]); fails only when the
/// pool holds fewer than nine candidates.
pub fn generate_opponent_team(
    pool: &[crate::models::RosterCandidate],
    request: &OpponentRequest,
    rng: &mut impl Rng,
) -> Result<OpponentTeam> {
    let filtered = filter_candidates(
        pool,
        request.required_type,
        request.min_average,
        request.max_average,
    )?;
    let selected = select_candidates(&filtered.candidates, request.selection, LINEUP_SIZE, rng);
    let members = assign_positions(&selected, request.assignment);
    let average_stats = AverageStats::from_profiles(members.iter().map(|m| &m.candidate.stats));
    let name = team_name(request.required_type, rng);
    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();

    log::debug!(
        "generated {} (seed {}, {:?} stage, avg {:.1})",
        name,
        request.seed,
        filtered.stage,
        average_stats.overall
    );

    Ok(OpponentTeam {
        id,
        name,
        team_type: request.required_type,
        members,
        average_stats,
        seed: request.seed,
    })
}

fn team_name(team_type: Option<ElementType>, rng: &mut impl Rng) -> String {
    let suffix = TEAM_SUFFIXES.choose(rng).copied().unwrap_or("Nine");
    match team_type {
        Some(t) => format!("{} {}", t.display_name(), suffix),
        None => {
            let prefix = MIXED_PREFIXES.choose(rng).copied().unwrap_or("Open");
            format!("{} {}", prefix, suffix)
        }
    }
}
