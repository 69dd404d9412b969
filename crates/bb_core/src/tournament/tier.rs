//! Tournament difficulty tiers

use crate::opponent::SelectionStrategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TournamentTier {
    #[default]
    Regional,
    National,
    World,
}

impl TournamentTier {
    pub const ALL: [TournamentTier; 3] =
        [TournamentTier::Regional, TournamentTier::National, TournamentTier::World];

    /// Default bracket size (기본: 8 / 16 / 16)
    pub fn team_count(&self) -> usize {
        match self {
            TournamentTier::Regional => 8,
            TournamentTier::National | TournamentTier::World => 16,
        }
    }

    /// Average-stat band opponents are drawn from.
    pub fn stat_band(&self) -> (f32, f32) {
        match self {
            TournamentTier::Regional => (50.0, 80.0),
            TournamentTier::National => (70.0, 100.0),
            TournamentTier::World => (90.0, 140.0),
        }
    }

    pub fn selection(&self) -> SelectionStrategy {
        match self {
            TournamentTier::Regional | TournamentTier::National => SelectionStrategy::Uniform,
            TournamentTier::World => SelectionStrategy::Balanced,
        }
    }

    /// Scales opponent batter and pitcher power.
    pub fn power_multiplier(&self) -> f64 {
        match self {
            TournamentTier::Regional => 0.9,
            TournamentTier::National => 1.0,
            TournamentTier::World => 1.1,
        }
    }

    /// Whether each opponent is built around a single creature type.
    pub fn type_themed(&self) -> bool {
        !matches!(self, TournamentTier::World)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TournamentTier::Regional => "Regional",
            TournamentTier::National => "National",
            TournamentTier::World => "World",
        }
    }
}

impl std::str::FromStr for TournamentTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regional" => Ok(TournamentTier::Regional),
            "national" => Ok(TournamentTier::National),
            "world" => Ok(TournamentTier::World),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}
