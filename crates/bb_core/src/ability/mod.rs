//! Ability model
//!
//! Converts a six-value stat profile (0-255 each) into two derived 0-100
//! ability vectors:
//! - fielding: meet, power, speed, arm, defense, stamina
//! - pitching: velocity, control, stamina, breaking
//!
//! Each ability is a fixed linear combination of the six stats (weights sum to
//! 1.0), scaled so that 180 in every contributing stat maps to 100, rounded and
//! clamped to [0, 100].

pub mod position_weights;

pub use position_weights::{
    evaluate_candidate, fitness_score, rank_fitness, stars_for_score, PositionFitness,
    PositionWeights,
};

use crate::models::StatProfile;
use serde::{Deserialize, Serialize};

/// Stat value that maps to an ability of 100.
pub const ABILITY_SCALE_CEILING: f32 = 180.0;

/// Weights over (hp, attack, defense, special_attack, special_defense, speed).
type StatWeights = [f32; 6];

const MEET: StatWeights = [0.0, 0.3, 0.0, 0.3, 0.2, 0.2];
const POWER: StatWeights = [0.2, 0.6, 0.0, 0.2, 0.0, 0.0];
const SPEED: StatWeights = [0.0, 0.2, 0.0, 0.0, 0.0, 0.8];
const ARM: StatWeights = [0.0, 0.4, 0.3, 0.3, 0.0, 0.0];
const DEFENSE: StatWeights = [0.0, 0.0, 0.5, 0.0, 0.3, 0.2];
const FIELDER_STAMINA: StatWeights = [0.7, 0.0, 0.15, 0.0, 0.15, 0.0];

const VELOCITY: StatWeights = [0.0, 0.3, 0.0, 0.3, 0.0, 0.4];
const CONTROL: StatWeights = [0.0, 0.0, 0.3, 0.3, 0.4, 0.0];
const PITCHER_STAMINA: StatWeights = [0.6, 0.0, 0.2, 0.0, 0.2, 0.0];
const BREAKING: StatWeights = [0.0, 0.0, 0.0, 0.6, 0.2, 0.2];

fn combine(stats: &StatProfile, weights: &StatWeights) -> u8 {
    let raw: f32 = stats
        .as_array()
        .iter()
        .zip(weights.iter())
        .map(|(&value, &w)| value as f32 * w)
        .sum();
    (raw * 100.0 / ABILITY_SCALE_CEILING).round().clamp(0.0, 100.0) as u8
}

/// Fielding/batting ability vector (0-100 each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct FielderAbility {
    pub meet: u8,
    pub power: u8,
    pub speed: u8,
    pub arm: u8,
    pub defense: u8,
    pub stamina: u8,
}

impl FielderAbility {
    pub fn from_stats(stats: &StatProfile) -> Self {
        Self {
            meet: combine(stats, &MEET),
            power: combine(stats, &POWER),
            speed: combine(stats, &SPEED),
            arm: combine(stats, &ARM),
            defense: combine(stats, &DEFENSE),
            stamina: combine(stats, &FIELDER_STAMINA),
        }
    }
}

/// Pitching ability vector (0-100 each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PitcherAbility {
    pub velocity: u8,
    pub control: u8,
    pub stamina: u8,
    pub breaking: u8,
}

impl PitcherAbility {
    pub fn from_stats(stats: &StatProfile) -> Self {
        Self {
            velocity: combine(stats, &VELOCITY),
            control: combine(stats, &CONTROL),
            stamina: combine(stats, &PITCHER_STAMINA),
            breaking: combine(stats, &BREAKING),
        }
    }
}

/// Both ability vectors of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AbilityProfile {
    pub fielder: FielderAbility,
    pub pitcher: PitcherAbility,
}

impl AbilityProfile {
    pub fn from_stats(stats: &StatProfile) -> Self {
        Self { fielder: FielderAbility::from_stats(stats), pitcher: PitcherAbility::from_stats(stats) }
    }
}

/// Batter-power scalar fed to the outcome model.
pub fn batting_power(fielder: &FielderAbility) -> f64 {
    fielder.meet as f64 * 0.4 + fielder.power as f64 * 0.4 + fielder.speed as f64 * 0.2
}

/// Pitcher-power scalar fed to the outcome model.
pub fn pitching_power(pitcher: &PitcherAbility) -> f64 {
    pitcher.velocity as f64 * 0.3
        + pitcher.control as f64 * 0.3
        + pitcher.breaking as f64 * 0.25
        + pitcher.stamina as f64 * 0.15
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_weights_sum_to_one() {
        for w in [
            MEET,
            POWER,
            SPEED,
            ARM,
            DEFENSE,
            FIELDER_STAMINA,
            VELOCITY,
            CONTROL,
            PITCHER_STAMINA,
            BREAKING,
        ] {
            let sum: f32 = w.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "weights {:?} sum to {}", w, sum);
        }
    }

    #[test]
    fn test_uniform_scaling() {
        // 90 across the board → exactly half of the ceiling
        let ability = FielderAbility::from_stats(&StatProfile::uniform(90));
        assert_eq!(ability, FielderAbility { meet: 50, power: 50, speed: 50, arm: 50, defense: 50, stamina: 50 });

        let maxed = PitcherAbility::from_stats(&StatProfile::uniform(255));
        assert_eq!(maxed, PitcherAbility { velocity: 100, control: 100, stamina: 100, breaking: 100 });

        let zero = AbilityProfile::from_stats(&StatProfile::uniform(0));
        assert_eq!(zero, AbilityProfile::default());
    }

    #[test]
    fn test_specialised_profile() {
        // fast glass cannon
        let stats = StatProfile::new(40, 130, 40, 60, 40, 150);
        let f = FielderAbility::from_stats(&stats);
        assert!(f.speed > f.defense);
        assert!(f.power > f.stamina);
        // speed: (130*0.2 + 150*0.8) * 100/180 = 81.1
        assert_eq!(f.speed, 81);
    }

    #[test]
    fn test_powers() {
        let f = FielderAbility { meet: 50, power: 50, speed: 50, arm: 0, defense: 0, stamina: 0 };
        assert!((batting_power(&f) - 50.0).abs() < 1e-9);
        let p = PitcherAbility { velocity: 40, control: 40, stamina: 40, breaking: 40 };
        assert!((pitching_power(&p) - 40.0).abs() < 1e-9);
    }

    fn stat_profile_strategy() -> impl Strategy<Value = StatProfile> {
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(a, b, c, d, e, f)| StatProfile::new(a, b, c, d, e, f))
    }

    proptest! {
        /// Property: every ability stays inside [0, 100]
        #[test]
        fn prop_abilities_clamped(stats in stat_profile_strategy()) {
            let a = AbilityProfile::from_stats(&stats);
            for v in [a.fielder.meet, a.fielder.power, a.fielder.speed, a.fielder.arm,
                      a.fielder.defense, a.fielder.stamina, a.pitcher.velocity,
                      a.pitcher.control, a.pitcher.stamina, a.pitcher.breaking] {
                prop_assert!(v <= 100);
            }
        }
    }
}
