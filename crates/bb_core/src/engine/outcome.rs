//! At-bat outcome model
//!
//! Batter/pitcher strength plus the base/out situation → a weight per outcome,
//! then a single cumulative-weight draw.

use super::config::OutcomeTable;
use crate::models::AtBatResult;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MIN_ADVANTAGE: f64 = 0.5;
pub const MAX_ADVANTAGE: f64 = 1.5;

/// `batter / max(pitcher, 1)` clamped to [0.5, 1.5].
pub fn advantage(batter_power: f64, pitcher_power: f64) -> f64 {
    let ratio = batter_power / pitcher_power.max(1.0);
    if ratio.is_nan() {
        return 1.0;
    }
    ratio.clamp(MIN_ADVANTAGE, MAX_ADVANTAGE)
}

/// Sacrifices need a runner to move and fewer than two outs.
pub fn sacrifice_allowed(outs: u8, runners_on_base: u8) -> bool {
    outs < 2 && runners_on_base > 0
}

/// Weight per outcome, indexed by [`AtBatResult::index`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeWeights {
    weights: [f64; 13],
}

impl OutcomeWeights {
    pub fn get(&self, result: AtBatResult) -> f64 {
        self.weights[result.index()]
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AtBatResult, f64)> + '_ {
        AtBatResult::ALL.iter().map(move |r| (*r, self.weights[r.index()]))
    }

    /// Probability of one outcome under these weights.
    pub fn probability(&self, result: AtBatResult) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.get(result) / total
        } else {
            0.0
        }
    }

    /// Cumulative scan with `roll` in [0, 1).
    pub fn select_with_roll(&self, roll: f64) -> AtBatResult {
        let target = roll.clamp(0.0, 1.0) * self.total();
        let mut cumulative = 0.0;
        let mut last_positive = AtBatResult::Groundout;
        for (result, weight) in self.iter() {
            if weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            last_positive = result;
            if target < cumulative {
                return result;
            }
        }
        // roll == 1.0 or float drift at the upper edge
        last_positive
    }

    pub fn sample(&self, rng: &mut impl Rng) -> AtBatResult {
        self.select_with_roll(rng.gen::<f64>())
    }
}

/// Outcome model over a base weight table.
#[derive(Debug, Clone, Default)]
pub struct AtBatOutcomeModel {
    table: OutcomeTable,
}

impl AtBatOutcomeModel {
    pub fn new(table: OutcomeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &OutcomeTable {
        &self.table
    }

    /// Situational weights.
    ///
    /// Hit and walk weights scale up with the advantage, strikeouts scale down.
    pub fn weights(
        &self,
        batter_power: f64,
        pitcher_power: f64,
        outs: u8,
        runners_on_base: u8,
    ) -> OutcomeWeights {
        let adv = advantage(batter_power, pitcher_power);
        let sac_ok = sacrifice_allowed(outs, runners_on_base);

        let mut weights = [0.0; 13];
        for result in AtBatResult::ALL {
            let base = self.table.base_weight(result).max(0.0);
            let w = match result {
                AtBatResult::Single
                | AtBatResult::Double
                | AtBatResult::Triple
                | AtBatResult::Homerun
                | AtBatResult::Walk => base * adv,
                AtBatResult::Strikeout => base / adv,
                AtBatResult::Sacrifice | AtBatResult::SacrificeFly => {
                    if sac_ok {
                        base
                    } else {
                        0.0
                    }
                }
                _ => base,
            };
            weights[result.index()] = w;
        }
        OutcomeWeights { weights }
    }

    pub fn draw(
        &self,
        batter_power: f64,
        pitcher_power: f64,
        outs: u8,
        runners_on_base: u8,
        rng: &mut impl Rng,
    ) -> AtBatResult {
        self.weights(batter_power, pitcher_power, outs, runners_on_base).sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_advantage_clamped() {
        assert_eq!(advantage(50.0, 50.0), 1.0);
        assert_eq!(advantage(200.0, 50.0), 1.5);
        assert_eq!(advantage(10.0, 50.0), 0.5);
        // pitcher floor of 1
        assert_eq!(advantage(1.2, 0.1), 1.2);
        assert_eq!(advantage(f64::NAN, 50.0), 1.0);
    }

    #[test]
    fn test_sacrifice_weights_gated() {
        let model = AtBatOutcomeModel::default();
        let empty = model.weights(50.0, 50.0, 0, 0);
        assert_eq!(empty.get(AtBatResult::Sacrifice), 0.0);
        assert_eq!(empty.get(AtBatResult::SacrificeFly), 0.0);

        let two_outs = model.weights(50.0, 50.0, 2, 2);
        assert_eq!(two_outs.get(AtBatResult::Sacrifice), 0.0);

        let open = model.weights(50.0, 50.0, 1, 1);
        assert!(open.get(AtBatResult::Sacrifice) > 0.0);
        assert!(open.get(AtBatResult::SacrificeFly) > 0.0);
    }

    #[test]
    fn test_advantage_skews_hits_and_strikeouts() {
        let model = AtBatOutcomeModel::default();
        let weak = model.weights(25.0, 50.0, 0, 0);
        let even = model.weights(50.0, 50.0, 0, 0);
        let strong = model.weights(75.0, 50.0, 0, 0);

        assert!(strong.get(AtBatResult::Homerun) > even.get(AtBatResult::Homerun));
        assert!(weak.get(AtBatResult::Single) < even.get(AtBatResult::Single));
        assert!(strong.get(AtBatResult::Strikeout) < even.get(AtBatResult::Strikeout));
        assert!(weak.get(AtBatResult::Strikeout) > even.get(AtBatResult::Strikeout));
        assert_eq!(strong.get(AtBatResult::Groundout), even.get(AtBatResult::Groundout));
        assert!((even.get(AtBatResult::Walk) - OutcomeTable::default().walk).abs() < 1e-12);
    }

    #[test]
    fn test_select_with_roll_cumulative_scan() {
        let model = AtBatOutcomeModel::default();
        let w = model.weights(50.0, 50.0, 0, 0);
        assert_eq!(w.select_with_roll(0.0), AtBatResult::Single);
        // the first 15/total of the interval belongs to singles
        let single_share = w.get(AtBatResult::Single) / w.total();
        assert_eq!(w.select_with_roll(single_share - 1e-9), AtBatResult::Single);
        assert_eq!(w.select_with_roll(single_share + 1e-9), AtBatResult::Double);
        // sacrifice weights are zero, so the top of the range lands on fielder's choice
        assert_eq!(w.select_with_roll(1.0), AtBatResult::FieldersChoice);
        assert_eq!(w.select_with_roll(0.999_999_999), AtBatResult::FieldersChoice);
    }

    #[test]
    fn test_draw_is_deterministic_with_seed() {
        let model = AtBatOutcomeModel::default();
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        let seq_a: Vec<_> = (0..50).map(|_| model.draw(60.0, 45.0, 1, 2, &mut a)).collect();
        let seq_b: Vec<_> = (0..50).map(|_| model.draw(60.0, 45.0, 1, 2, &mut b)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_empirical_frequencies_follow_weights() {
        let model = AtBatOutcomeModel::default();
        let weights = model.weights(50.0, 50.0, 0, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let trials = 20_000;
        let strikeouts = (0..trials)
            .filter(|_| weights.sample(&mut rng) == AtBatResult::Strikeout)
            .count();
        let observed = strikeouts as f64 / trials as f64;
        let expected = weights.probability(AtBatResult::Strikeout);
        assert!((observed - expected).abs() < 0.02, "observed {} expected {}", observed, expected);
    }

    proptest! {
        /// Property: weights are non-negative and sum strictly positive
        #[test]
        fn prop_weights_valid(
            batter in 0.01f64..500.0,
            pitcher in 0.01f64..500.0,
            outs in 0u8..3,
            runners in 0u8..4
        ) {
            let w = AtBatOutcomeModel::default().weights(batter, pitcher, outs, runners);
            for (_, weight) in w.iter() {
                prop_assert!(weight >= 0.0);
            }
            prop_assert!(w.total() > 0.0);
        }

        /// Property: any roll selects an outcome with positive weight
        #[test]
        fn prop_roll_selects_positive_weight(roll in 0.0f64..=1.0, outs in 0u8..3, runners in 0u8..4) {
            let w = AtBatOutcomeModel::default().weights(50.0, 50.0, outs, runners);
            let picked = w.select_with_roll(roll);
            prop_assert!(w.get(picked) > 0.0);
        }
    }
}
