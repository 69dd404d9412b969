//! Half-inning simulator
//!
//! Runs one side's turn at bat until three outs, tracking a runner *count*
//! (0-3) instead of individual bases. Batting order wraps over the lineup and
//! the next index is handed back so the caller can continue the order in the
//! following inning.

use super::config::GameConfig;
use super::outcome::AtBatOutcomeModel;
use crate::error::Result;
use crate::models::{AtBatRecord, AtBatResult, HalfInning, TeamLineup};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const OUTS_PER_HALF: u8 = 3;
pub const MAX_RUNNERS: u8 = 3;

/// Output of one half-inning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalfInningResult {
    pub inning: u8,
    pub half: HalfInning,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
    pub outs: u8,
    /// Plate appearances in the order they happened.
    pub at_bats: Vec<AtBatRecord>,
    pub next_batting_index: usize,
    /// The plate-appearance cap ended the half before the third out.
    pub hit_safety_cap: bool,
}

impl HalfInningResult {
    /// Records grouped per batting slot (index = lineup slot).
    pub fn by_slot(&self, lineup_len: usize) -> Vec<Vec<AtBatRecord>> {
        let mut slots = vec![Vec::new(); lineup_len];
        for record in &self.at_bats {
            if let Some(slot) = slots.get_mut(record.batting_slot as usize) {
                slot.push(record.clone());
            }
        }
        slots
    }
}

/// Base/score change produced by one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Advance {
    pub runs: u8,
    pub rbi: u8,
    pub batter_scored: bool,
    pub runners_after: u8,
}

/// Occupancy and scoring rules of the count model.
///
/// `runners` is the count before the play; out bookkeeping is done by the caller.
pub(crate) fn apply_outcome(
    result: AtBatResult,
    runners: u8,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Advance {
    let unchanged = Advance { runners_after: runners, ..Default::default() };
    match result {
        AtBatResult::Homerun => {
            let runs = 1 + runners;
            Advance { runs, rbi: runs, batter_scored: true, runners_after: 0 }
        }
        AtBatResult::Triple => {
            Advance { runs: runners, rbi: runners, batter_scored: false, runners_after: 1 }
        }
        AtBatResult::Double => {
            if runners > 0 && rng.gen_bool(config.double_score_chance) {
                let scored = runners.min(2);
                Advance {
                    runs: scored,
                    rbi: scored,
                    batter_scored: false,
                    runners_after: runners.saturating_sub(scored) + 1,
                }
            } else {
                Advance { runners_after: (runners + 1).min(MAX_RUNNERS), ..Default::default() }
            }
        }
        AtBatResult::Single => {
            if runners > 0 && rng.gen_bool(config.single_score_chance) {
                // one runner in, batter takes his place
                Advance { runs: 1, rbi: 1, batter_scored: false, runners_after: runners }
            } else {
                Advance { runners_after: (runners + 1).min(MAX_RUNNERS), ..Default::default() }
            }
        }
        AtBatResult::Walk | AtBatResult::HitByPitch => {
            let forced = u8::from(runners >= MAX_RUNNERS);
            Advance {
                runs: forced,
                rbi: forced,
                batter_scored: false,
                runners_after: (runners + 1).min(MAX_RUNNERS),
            }
        }
        AtBatResult::SacrificeFly => {
            if runners > 0 {
                Advance { runs: 1, rbi: 1, batter_scored: false, runners_after: runners - 1 }
            } else {
                unchanged
            }
        }
        AtBatResult::Sacrifice => {
            if runners >= 2 && rng.gen_bool(config.sacrifice_score_chance) {
                Advance { runs: 1, rbi: 1, batter_scored: false, runners_after: runners - 1 }
            } else {
                unchanged
            }
        }
        AtBatResult::Error => {
            // unearned: no RBI
            let runs = u8::from(runners > 0 && rng.gen_bool(config.error_score_chance));
            Advance {
                runs,
                rbi: 0,
                batter_scored: false,
                runners_after: (runners + 1).min(MAX_RUNNERS),
            }
        }
        AtBatResult::FieldersChoice
        | AtBatResult::Strikeout
        | AtBatResult::Groundout
        | AtBatResult::Flyout => unchanged,
    }
}

/// Simulates half-innings with one outcome model and configuration.
#[derive(Debug, Clone, Default)]
pub struct InningSimulator {
    config: GameConfig,
    model: AtBatOutcomeModel,
}

impl InningSimulator {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let model = AtBatOutcomeModel::new(config.outcome_table.clone());
        Ok(Self { config, model })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Run one half-inning for `batting` against `pitcher_power`.
    ///
    /// `start_index` is the lineup slot leading off (taken modulo the lineup
    /// length). Fails when `batting` is not a valid nine-man lineup.
    pub fn simulate_half(
        &self,
        inning: u8,
        half: HalfInning,
        batting: &TeamLineup,
        pitcher_power: f64,
        start_index: usize,
        rng: &mut impl Rng,
    ) -> Result<HalfInningResult> {
        batting.validate()?;
        let lineup_len = batting.entries.len();

        let mut outs: u8 = 0;
        let mut runners: u8 = 0;
        let mut runs: u32 = 0;
        let mut hits: u32 = 0;
        let mut errors: u32 = 0;
        let mut at_bats = Vec::new();
        let mut batting_index = start_index % lineup_len;
        let mut plate_appearances: u16 = 0;
        let mut hit_safety_cap = false;

        while outs < OUTS_PER_HALF {
            if plate_appearances >= self.config.safety_cap {
                log::warn!(
                    "safety cap reached: inning {} {:?} ({}) stopped at {} outs after {} PA",
                    inning,
                    half,
                    batting.name,
                    outs,
                    plate_appearances
                );
                hit_safety_cap = true;
                break;
            }

            let (stolen_base, caught_stealing) = self.attempt_steal(outs, runners, rng);
            if caught_stealing {
                outs += 1;
                runners -= 1;
            }

            let outs_before = outs;
            let bases_before = runners;
            let batter_power = batting.entries[batting_index].batter_power;
            let result = self.model.draw(batter_power, pitcher_power, outs, runners, rng);

            if result.is_out() {
                outs += 1;
            }
            let advance = apply_outcome(result, runners, &self.config, rng);
            runners = advance.runners_after;
            runs += advance.runs as u32;
            if result.is_hit() {
                hits += 1;
            }
            if result == AtBatResult::Error {
                errors += 1;
            }

            log::trace!(
                "inning {} {:?} PA {}: slot {} {} (outs {} → {}, runners {} → {}, +{} R)",
                inning,
                half,
                plate_appearances,
                batting_index,
                result.notation(),
                outs_before,
                outs,
                bases_before,
                runners,
                advance.runs
            );

            at_bats.push(AtBatRecord {
                inning,
                half,
                sequence: plate_appearances,
                batting_slot: batting_index as u8,
                result,
                rbi: advance.rbi,
                run: advance.batter_scored,
                stolen_base,
                caught_stealing,
                bases_before_at_bat: bases_before,
                outs_before_at_bat: outs_before,
            });

            batting_index = (batting_index + 1) % lineup_len;
            plate_appearances += 1;
        }

        log::debug!(
            "inning {} {:?} ({}): {} R, {} H, {} E in {} PA",
            inning,
            half,
            batting.name,
            runs,
            hits,
            errors,
            plate_appearances
        );

        Ok(HalfInningResult {
            inning,
            half,
            runs,
            hits,
            errors,
            outs,
            at_bats,
            next_batting_index: batting_index,
            hit_safety_cap,
        })
    }

    /// Returns (stolen_base, caught_stealing).
    fn attempt_steal(&self, outs: u8, runners: u8, rng: &mut impl Rng) -> (bool, bool) {
        if runners == 0 || outs >= 2 || self.config.steal_attempt_rate <= 0.0 {
            return (false, false);
        }
        if !rng.gen_bool(self.config.steal_attempt_rate) {
            return (false, false);
        }
        if rng.gen_bool(self.config.steal_success_rate) {
            (true, false)
        } else {
            (false, true)
        }
    }
}
