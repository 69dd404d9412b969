use serde::{Deserialize, Serialize};

/// One scoreboard column.
///
/// Team A is the home side (bats in the bottom half), team B the visitors.
/// Runs, hits and errors are tallied against the batting half they occurred in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InningScore {
    pub inning: u8,
    pub team_a_score: u32,
    pub team_b_score: u32,
    pub team_a_hits: u32,
    pub team_b_hits: u32,
    pub team_a_errors: u32,
    pub team_b_errors: u32,
    /// Final-inning bottom half not played because the home side already led.
    #[serde(default)]
    pub team_a_skipped: bool,
}

/// Line-score totals (R / H / E) for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LineTotals {
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
}

pub fn team_a_totals(innings: &[InningScore]) -> LineTotals {
    innings.iter().fold(LineTotals::default(), |acc, i| LineTotals {
        runs: acc.runs + i.team_a_score,
        hits: acc.hits + i.team_a_hits,
        errors: acc.errors + i.team_a_errors,
    })
}

pub fn team_b_totals(innings: &[InningScore]) -> LineTotals {
    innings.iter().fold(LineTotals::default(), |acc, i| LineTotals {
        runs: acc.runs + i.team_b_score,
        hits: acc.hits + i.team_b_hits,
        errors: acc.errors + i.team_b_errors,
    })
}
