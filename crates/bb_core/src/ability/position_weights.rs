//! Position-specific weighting for fitness scores
//!
//! Each position reads a subset of the ability vectors:
//! - P: velocity, control, breaking, stamina (pitching vector only)
//! - C: defense, arm, stamina, meet
//! - infield: defense/arm/speed heavy, 1B and 3B lean on power
//! - outfield: speed/arm with a batting component
//!
//! Weights sum to at most 1.0 per position; unused abilities are 0.

use super::AbilityProfile;
use crate::models::{FieldPosition, StatProfile};
use serde::{Deserialize, Serialize};

/// Per-position ability weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PositionWeights {
    pub meet: f32,
    pub power: f32,
    pub speed: f32,
    pub arm: f32,
    pub defense: f32,
    pub stamina: f32,
    pub velocity: f32,
    pub control: f32,
    pub pitch_stamina: f32,
    pub breaking: f32,
}

impl PositionWeights {
    pub fn get_for_position(position: FieldPosition) -> Self {
        match position {
            FieldPosition::Pitcher => Self {
                velocity: 0.35,
                control: 0.30,
                breaking: 0.20,
                pitch_stamina: 0.15,
                ..Default::default()
            },
            FieldPosition::Catcher => {
                Self { defense: 0.35, arm: 0.30, stamina: 0.20, meet: 0.15, ..Default::default() }
            }
            FieldPosition::FirstBase => {
                Self { power: 0.40, meet: 0.30, defense: 0.20, arm: 0.10, ..Default::default() }
            }
            FieldPosition::SecondBase => {
                Self { defense: 0.35, speed: 0.30, meet: 0.25, arm: 0.10, ..Default::default() }
            }
            FieldPosition::ThirdBase => {
                Self { arm: 0.35, defense: 0.30, power: 0.25, meet: 0.10, ..Default::default() }
            }
            FieldPosition::Shortstop => {
                Self { defense: 0.35, arm: 0.30, speed: 0.25, meet: 0.10, ..Default::default() }
            }
            FieldPosition::LeftField => Self {
                meet: 0.30,
                power: 0.30,
                speed: 0.20,
                arm: 0.10,
                defense: 0.10,
                ..Default::default()
            },
            FieldPosition::CenterField => {
                Self { speed: 0.40, defense: 0.30, meet: 0.20, arm: 0.10, ..Default::default() }
            }
            FieldPosition::RightField => {
                Self { arm: 0.40, power: 0.25, meet: 0.20, speed: 0.15, ..Default::default() }
            }
        }
    }

    pub fn total_weight(&self) -> f32 {
        self.meet
            + self.power
            + self.speed
            + self.arm
            + self.defense
            + self.stamina
            + self.velocity
            + self.control
            + self.pitch_stamina
            + self.breaking
    }

    /// Weighted sum over both ability vectors.
    pub fn apply(&self, ability: &AbilityProfile) -> f32 {
        let f = &ability.fielder;
        let p = &ability.pitcher;
        f.meet as f32 * self.meet
            + f.power as f32 * self.power
            + f.speed as f32 * self.speed
            + f.arm as f32 * self.arm
            + f.defense as f32 * self.defense
            + f.stamina as f32 * self.stamina
            + p.velocity as f32 * self.velocity
            + p.control as f32 * self.control
            + p.stamina as f32 * self.pitch_stamina
            + p.breaking as f32 * self.breaking
    }
}

/// Fitness of one candidate for one position, with its rank among all nine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFitness {
    pub position: FieldPosition,
    /// 0-100
    pub score: u8,
    /// 1-5
    pub stars: u8,
    /// 1-9, 1 = best position for this candidate
    pub rank: u8,
}

/// Integer fitness score in [0, 100].
pub fn fitness_score(ability: &AbilityProfile, position: FieldPosition) -> u8 {
    PositionWeights::get_for_position(position).apply(ability).round().clamp(0.0, 100.0) as u8
}

pub fn stars_for_score(score: u8) -> u8 {
    match score {
        80..=u8::MAX => 5,
        65..=79 => 4,
        50..=64 => 3,
        35..=49 => 2,
        _ => 1,
    }
}

/// Sort (position, score) pairs by descending score and assign ranks.
///
/// The sort is stable: equal scores keep their input order.
pub fn rank_fitness(scores: &[(FieldPosition, u8)]) -> Vec<PositionFitness> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, (position, score))| PositionFitness {
            position,
            score,
            stars: stars_for_score(score),
            rank: i as u8 + 1,
        })
        .collect()
}

/// Fitness for all nine positions, best first.
pub fn evaluate_candidate(stats: &StatProfile) -> Vec<PositionFitness> {
    let ability = AbilityProfile::from_stats(stats);
    let scores: Vec<(FieldPosition, u8)> = FieldPosition::PRIORITY
        .iter()
        .map(|&pos| (pos, fitness_score(&ability, pos)))
        .collect();
    rank_fitness(&scores)
}
