//! Box-score aggregation
//!
//! Pure reductions over a finished game's at-bat streams. The only randomness
//! is the earned-run and pitch-count approximation for pitchers, which draws
//! from the caller's rng.

use crate::engine::GameResult;
use crate::models::{AtBatRecord, AtBatResult, TeamLineup};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Share of runs counted as earned: uniform in this range.
pub const EARNED_RUN_RATIO: (f64, f64) = (0.7, 1.0);
/// Pitches per batter faced: uniform in this range.
pub const PITCHES_PER_BATTER: (f64, f64) = (3.5, 4.5);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BatterStats {
    pub batting_slot: u8,
    pub id: String,
    pub name: String,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub homeruns: u32,
    pub rbi: u32,
    pub runs: u32,
    pub strikeouts: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub sacrifice_hits: u32,
    pub sacrifice_flies: u32,
    pub errors: u32,
}

impl BatterStats {
    /// Reduce one batter's plate appearances.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AtBatRecord>) -> Self {
        let mut stats = Self::default();
        for r in records {
            stats.plate_appearances += 1;
            if r.result.counts_as_at_bat() {
                stats.at_bats += 1;
            }
            if r.result.is_hit() {
                stats.hits += 1;
            }
            match r.result {
                AtBatResult::Double => stats.doubles += 1,
                AtBatResult::Triple => stats.triples += 1,
                AtBatResult::Homerun => stats.homeruns += 1,
                AtBatResult::Strikeout => stats.strikeouts += 1,
                AtBatResult::Walk => stats.walks += 1,
                AtBatResult::HitByPitch => stats.hit_by_pitch += 1,
                AtBatResult::Sacrifice => stats.sacrifice_hits += 1,
                AtBatResult::SacrificeFly => stats.sacrifice_flies += 1,
                AtBatResult::Error => stats.errors += 1,
                _ => {}
            }
            stats.rbi += r.rbi as u32;
            if r.run {
                stats.runs += 1;
            }
        }
        stats
    }

    /// Hits per official at-bat (0.0 with no at-bats).
    pub fn batting_average(&self) -> f64 {
        if self.at_bats == 0 {
            0.0
        } else {
            self.hits as f64 / self.at_bats as f64
        }
    }
}

/// One batting line per lineup slot, in batting order.
pub fn batting_lines(lineup: &TeamLineup, stream: &[AtBatRecord]) -> Vec<BatterStats> {
    lineup
        .entries
        .iter()
        .enumerate()
        .map(|(slot, entry)| {
            let mut stats =
                BatterStats::from_records(stream.iter().filter(|r| r.batting_slot as usize == slot));
            stats.batting_slot = slot as u8;
            stats.id = entry.id.clone();
            stats.name = entry.name.clone();
            stats
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PitcherStats {
    pub name: String,
    pub batters_faced: u32,
    pub hits: u32,
    pub homeruns: u32,
    pub strikeouts: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub runs: u32,
    /// Approximate: floor(runs × U[0.7, 1.0])
    pub earned_runs: u32,
    /// Approximate: batters faced × U[3.5, 4.5]
    pub pitch_count: u32,
    pub outs_recorded: u32,
}

impl PitcherStats {
    /// Derive a pitching line from the opposing side's batting lines.
    ///
    /// `runs` comes from the scoreboard; `opposing_stream` is only read for
    /// outs (plate-appearance outs plus runners caught stealing).
    pub fn from_opposing(
        name: impl Into<String>,
        opposing_lines: &[BatterStats],
        opposing_stream: &[AtBatRecord],
        runs: u32,
        rng: &mut impl Rng,
    ) -> Self {
        let sum = |f: fn(&BatterStats) -> u32| opposing_lines.iter().map(f).sum::<u32>();
        let batters_faced = sum(|b| b.plate_appearances);

        let earned_ratio = rng.gen_range(EARNED_RUN_RATIO.0..=EARNED_RUN_RATIO.1);
        let pitches_per_batter = rng.gen_range(PITCHES_PER_BATTER.0..=PITCHES_PER_BATTER.1);

        let outs_recorded = opposing_stream
            .iter()
            .map(|r| u32::from(r.result.is_out()) + u32::from(r.caught_stealing))
            .sum();

        Self {
            name: name.into(),
            batters_faced,
            hits: sum(|b| b.hits),
            homeruns: sum(|b| b.homeruns),
            strikeouts: sum(|b| b.strikeouts),
            walks: sum(|b| b.walks),
            hit_by_pitch: sum(|b| b.hit_by_pitch),
            runs,
            earned_runs: (runs as f64 * earned_ratio).floor() as u32,
            pitch_count: (batters_faced as f64 * pitches_per_batter).round() as u32,
            outs_recorded,
        }
    }

    /// Innings pitched in scoreboard notation ("8.2" = 8⅔).
    pub fn innings_pitched(&self) -> String {
        format!("{}.{}", self.outs_recorded / 3, self.outs_recorded % 3)
    }
}

/// Batting and pitching lines for both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxScore {
    pub home_batting: Vec<BatterStats>,
    pub away_batting: Vec<BatterStats>,
    /// Home pitcher (faced the visitors)
    pub home_pitching: PitcherStats,
    /// Visiting pitcher (faced the home side)
    pub away_pitching: PitcherStats,
}

impl BoxScore {
    pub fn from_game(
        game: &GameResult,
        home: &TeamLineup,
        away: &TeamLineup,
        rng: &mut impl Rng,
    ) -> Self {
        let home_batting = batting_lines(home, &game.home_at_bats);
        let away_batting = batting_lines(away, &game.away_at_bats);

        let home_pitching = PitcherStats::from_opposing(
            pitcher_name(home),
            &away_batting,
            &game.away_at_bats,
            game.away_total.runs,
            rng,
        );
        let away_pitching = PitcherStats::from_opposing(
            pitcher_name(away),
            &home_batting,
            &game.home_at_bats,
            game.home_total.runs,
            rng,
        );

        Self { home_batting, away_batting, home_pitching, away_pitching }
    }
}

fn pitcher_name(lineup: &TeamLineup) -> String {
    lineup
        .entries
        .iter()
        .find(|e| e.position.is_pitcher())
        .map(|e| e.name.clone())
        .unwrap_or_else(|| format!("{} pitcher", lineup.name))
}
