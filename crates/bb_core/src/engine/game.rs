//! Full-game simulator
//!
//! Alternates visiting (top) and home (bottom) halves for the scheduled number
//! of innings. The final bottom half is skipped when the home side already
//! leads after the visiting half (regulation games of 9+ innings only).
//! Batting order carries over between innings for each side. Ties are
//! reported as-is; extra innings are not played.

use super::config::GameConfig;
use super::inning::InningSimulator;
use crate::error::Result;
use crate::models::{
    team_a_totals, team_b_totals, AtBatRecord, HalfInning, InningScore, LineTotals, TeamLineup,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Games shorter than this never skip the final home half.
pub const REGULATION_INNINGS: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameWinner {
    Home,
    Away,
    Tie,
}

/// Scoreboard plus the full ordered plate-appearance stream of each side.
///
/// Team A = home, team B = visitors (matches [`InningScore`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub home_name: String,
    pub away_name: String,
    pub innings: Vec<InningScore>,
    /// Home plate appearances ordered by (inning, half, sequence).
    pub home_at_bats: Vec<AtBatRecord>,
    /// Visiting plate appearances ordered by (inning, half, sequence).
    pub away_at_bats: Vec<AtBatRecord>,
    pub home_total: LineTotals,
    pub away_total: LineTotals,
}

impl GameResult {
    pub fn winner(&self) -> GameWinner {
        use std::cmp::Ordering;
        match self.home_total.runs.cmp(&self.away_total.runs) {
            Ordering::Greater => GameWinner::Home,
            Ordering::Less => GameWinner::Away,
            Ordering::Equal => GameWinner::Tie,
        }
    }

    /// "home-away", e.g. "5-3".
    pub fn score_string(&self) -> String {
        format!("{}-{}", self.home_total.runs, self.away_total.runs)
    }

    /// Whether the final bottom half was skipped.
    pub fn home_half_skipped(&self) -> bool {
        self.innings.last().map(|i| i.team_a_skipped).unwrap_or(false)
    }
}

/// Runs complete games.
#[derive(Debug, Clone, Default)]
pub struct GameSimulator {
    innings: InningSimulator,
}

impl GameSimulator {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self { innings: InningSimulator::new(config)? })
    }

    pub fn config(&self) -> &GameConfig {
        self.innings.config()
    }

    pub fn inning_simulator(&self) -> &InningSimulator {
        &self.innings
    }

    /// Simulate `away` at `home` for the configured number of innings.
    pub fn simulate(
        &self,
        home: &TeamLineup,
        away: &TeamLineup,
        rng: &mut impl Rng,
    ) -> Result<GameResult> {
        home.validate()?;
        away.validate()?;

        let scheduled = self.config().innings;
        let mut innings = Vec::with_capacity(scheduled as usize);
        let mut home_at_bats = Vec::new();
        let mut away_at_bats = Vec::new();
        let mut home_index = 0usize;
        let mut away_index = 0usize;
        let mut home_runs: u32 = 0;
        let mut away_runs: u32 = 0;

        for inning in 1..=scheduled {
            let top = self.innings.simulate_half(
                inning,
                HalfInning::Top,
                away,
                home.pitcher_power,
                away_index,
                rng,
            )?;
            away_index = top.next_batting_index;
            away_runs += top.runs;

            let is_final_inning = inning == scheduled && scheduled >= REGULATION_INNINGS;
            let mut score = InningScore {
                inning,
                team_b_score: top.runs,
                team_b_hits: top.hits,
                team_b_errors: top.errors,
                ..Default::default()
            };
            away_at_bats.extend(top.at_bats);

            if is_final_inning && home_runs > away_runs {
                log::debug!(
                    "inning {}: bottom half skipped, {} leads {}-{}",
                    inning,
                    home.name,
                    home_runs,
                    away_runs
                );
                score.team_a_skipped = true;
            } else {
                let bottom = self.innings.simulate_half(
                    inning,
                    HalfInning::Bottom,
                    home,
                    away.pitcher_power,
                    home_index,
                    rng,
                )?;
                home_index = bottom.next_batting_index;
                home_runs += bottom.runs;
                score.team_a_score = bottom.runs;
                score.team_a_hits = bottom.hits;
                score.team_a_errors = bottom.errors;
                home_at_bats.extend(bottom.at_bats);
            }

            innings.push(score);
        }

        let home_total = team_a_totals(&innings);
        let away_total = team_b_totals(&innings);

        log::info!(
            "{} {} - {} {} ({} innings)",
            away.name,
            away_total.runs,
            home_total.runs,
            home.name,
            innings.len()
        );

        Ok(GameResult {
            home_name: home.name.clone(),
            away_name: away.name.clone(),
            innings,
            home_at_bats,
            away_at_bats,
            home_total,
            away_total,
        })
    }
}
