//! Plate-appearance outcomes and the immutable record of each one.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The 13 mutually exclusive outcomes of a plate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtBatResult {
    Single,
    Double,
    Triple,
    Homerun,
    Strikeout,
    Groundout,
    Flyout,
    Walk,
    HitByPitch,
    Sacrifice,
    SacrificeFly,
    Error,
    FieldersChoice,
}

impl AtBatResult {
    /// Fixed order of the outcome table (weights are indexed by this order).
    pub const ALL: [AtBatResult; 13] = [
        AtBatResult::Single,
        AtBatResult::Double,
        AtBatResult::Triple,
        AtBatResult::Homerun,
        AtBatResult::Strikeout,
        AtBatResult::Groundout,
        AtBatResult::Flyout,
        AtBatResult::Walk,
        AtBatResult::HitByPitch,
        AtBatResult::Sacrifice,
        AtBatResult::SacrificeFly,
        AtBatResult::Error,
        AtBatResult::FieldersChoice,
    ];

    pub fn index(&self) -> usize {
        match self {
            AtBatResult::Single => 0,
            AtBatResult::Double => 1,
            AtBatResult::Triple => 2,
            AtBatResult::Homerun => 3,
            AtBatResult::Strikeout => 4,
            AtBatResult::Groundout => 5,
            AtBatResult::Flyout => 6,
            AtBatResult::Walk => 7,
            AtBatResult::HitByPitch => 8,
            AtBatResult::Sacrifice => 9,
            AtBatResult::SacrificeFly => 10,
            AtBatResult::Error => 11,
            AtBatResult::FieldersChoice => 12,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            AtBatResult::Single | AtBatResult::Double | AtBatResult::Triple | AtBatResult::Homerun
        )
    }

    /// Outcomes that record exactly one out.
    pub fn is_out(&self) -> bool {
        matches!(
            self,
            AtBatResult::Strikeout
                | AtBatResult::Groundout
                | AtBatResult::Flyout
                | AtBatResult::FieldersChoice
                | AtBatResult::Sacrifice
                | AtBatResult::SacrificeFly
        )
    }

    /// Whether the plate appearance is charged as an official at-bat.
    pub fn counts_as_at_bat(&self) -> bool {
        !matches!(
            self,
            AtBatResult::Walk
                | AtBatResult::HitByPitch
                | AtBatResult::Sacrifice
                | AtBatResult::SacrificeFly
        )
    }

    /// Scoreboard notation (K, 1B, HR, ...).
    pub fn notation(&self) -> &'static str {
        match self {
            AtBatResult::Single => "1B",
            AtBatResult::Double => "2B",
            AtBatResult::Triple => "3B",
            AtBatResult::Homerun => "HR",
            AtBatResult::Strikeout => "K",
            AtBatResult::Groundout => "GO",
            AtBatResult::Flyout => "FO",
            AtBatResult::Walk => "BB",
            AtBatResult::HitByPitch => "HBP",
            AtBatResult::Sacrifice => "SAC",
            AtBatResult::SacrificeFly => "SF",
            AtBatResult::Error => "E",
            AtBatResult::FieldersChoice => "FC",
        }
    }
}

/// Top half = visiting side bats, bottom half = home side bats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfInning {
    Top,
    Bottom,
}

/// One plate appearance. Created once by the inning simulator, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtBatRecord {
    pub inning: u8,
    pub half: HalfInning,
    /// 0-based position within the half-inning
    pub sequence: u16,
    /// 0-based index into the batting side's lineup
    pub batting_slot: u8,
    pub result: AtBatResult,
    pub rbi: u8,
    /// The batter himself crossed the plate.
    pub run: bool,
    pub stolen_base: bool,
    pub caught_stealing: bool,
    pub bases_before_at_bat: u8,
    pub outs_before_at_bat: u8,
}

impl AtBatRecord {
    pub fn sort_key(&self) -> (u8, HalfInning, u16) {
        (self.inning, self.half, self.sequence)
    }
}

impl PartialOrd for AtBatRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AtBatRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.batting_slot.cmp(&other.batting_slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, result) in AtBatResult::ALL.iter().enumerate() {
            assert_eq!(result.index(), i);
        }
    }

    #[test]
    fn test_out_and_at_bat_classification() {
        let outs: Vec<_> = AtBatResult::ALL.iter().filter(|r| r.is_out()).collect();
        assert_eq!(outs.len(), 6);
        assert!(!AtBatResult::Error.is_out());
        assert!(!AtBatResult::Walk.counts_as_at_bat());
        assert!(!AtBatResult::SacrificeFly.counts_as_at_bat());
        assert!(AtBatResult::Error.counts_as_at_bat());
        assert!(AtBatResult::FieldersChoice.counts_as_at_bat());
    }

    #[test]
    fn test_record_ordering() {
        let base = AtBatRecord {
            inning: 2,
            half: HalfInning::Top,
            sequence: 0,
            batting_slot: 4,
            result: AtBatResult::Single,
            rbi: 0,
            run: false,
            stolen_base: false,
            caught_stealing: false,
            bases_before_at_bat: 0,
            outs_before_at_bat: 0,
        };
        let later_seq = AtBatRecord { sequence: 3, batting_slot: 7, ..base.clone() };
        let bottom = AtBatRecord { half: HalfInning::Bottom, sequence: 0, ..base.clone() };
        let next_inning = AtBatRecord { inning: 3, ..base.clone() };

        let mut records = vec![next_inning.clone(), bottom.clone(), later_seq.clone(), base.clone()];
        records.sort();
        assert_eq!(records, vec![base, later_seq, bottom, next_inning]);
    }
}
