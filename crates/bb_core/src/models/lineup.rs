use super::{FieldPosition, RosterMember};
use crate::ability::{batting_power, pitching_power, AbilityProfile};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Number of batters in a lineup.
pub const LINEUP_SIZE: usize = 9;

/// One batter as seen by the game simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub id: String,
    pub name: String,
    pub position: FieldPosition,
    pub batter_power: f64,
}

/// Batting order plus the pitcher rating the opposing side faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLineup {
    pub name: String,
    pub entries: Vec<LineupEntry>,
    pub pitcher_power: f64,
}

impl TeamLineup {
    /// Build a lineup from positioned roster members.
    ///
    /// Members are ordered by `batting_order`; the member at
    /// [`FieldPosition::Pitcher`] supplies the pitcher rating (falls back to
    /// the best pitching power on the roster). `power_multiplier` scales both
    /// batter and pitcher ratings (tournament tier difficulty).
    pub fn from_members(
        name: impl Into<String>,
        members: &[RosterMember],
        power_multiplier: f64,
    ) -> Self {
        let mut ordered: Vec<&RosterMember> = members.iter().collect();
        ordered.sort_by_key(|m| m.batting_order);

        let entries = ordered
            .iter()
            .map(|m| {
                let ability = AbilityProfile::from_stats(&m.candidate.stats);
                LineupEntry {
                    id: m.candidate.id.to_string(),
                    name: m.candidate.name.clone(),
                    position: m.position,
                    batter_power: batting_power(&ability.fielder) * power_multiplier,
                }
            })
            .collect();

        let pitcher = members
            .iter()
            .find(|m| m.position.is_pitcher())
            .map(|m| pitching_power(&AbilityProfile::from_stats(&m.candidate.stats).pitcher))
            .or_else(|| {
                members
                    .iter()
                    .map(|m| pitching_power(&AbilityProfile::from_stats(&m.candidate.stats).pitcher))
                    .max_by(|a, b| a.total_cmp(b))
            })
            .unwrap_or(1.0);

        Self { name: name.into(), entries, pitcher_power: pitcher * power_multiplier }
    }

    /// Fail fast on lineups the simulator cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(EngineError::EmptyLineup { team: self.name.clone() });
        }
        if self.entries.len() != LINEUP_SIZE {
            return Err(EngineError::InvalidLineupSize {
                team: self.name.clone(),
                expected: LINEUP_SIZE,
                found: self.entries.len(),
            });
        }
        validate_power(&format!("{} pitcher", self.name), self.pitcher_power)?;
        for entry in &self.entries {
            validate_power(&format!("{} / {}", self.name, entry.name), entry.batter_power)?;
        }
        Ok(())
    }

    pub fn batter_powers(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.batter_power).collect()
    }
}

pub(crate) fn validate_power(subject: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidPower { subject: subject.to_string(), value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementType, RosterCandidate, StatProfile};

    fn entry(i: usize, power: f64) -> LineupEntry {
        LineupEntry {
            id: format!("b{}", i),
            name: format!("Batter {}", i),
            position: FieldPosition::PRIORITY[i % 9],
            batter_power: power,
        }
    }

    #[test]
    fn test_validate_rejects_short_lineup() {
        let lineup = TeamLineup {
            name: "Short".into(),
            entries: (0..5).map(|i| entry(i, 50.0)).collect(),
            pitcher_power: 50.0,
        };
        assert_eq!(
            lineup.validate(),
            Err(EngineError::InvalidLineupSize { team: "Short".into(), expected: 9, found: 5 })
        );
    }

    #[test]
    fn test_validate_rejects_empty_and_bad_power() {
        let empty = TeamLineup { name: "Empty".into(), entries: vec![], pitcher_power: 50.0 };
        assert!(matches!(empty.validate(), Err(EngineError::EmptyLineup { .. })));

        let bad = TeamLineup {
            name: "Bad".into(),
            entries: (0..9).map(|i| entry(i, if i == 3 { 0.0 } else { 50.0 })).collect(),
            pitcher_power: 50.0,
        };
        assert!(matches!(bad.validate(), Err(EngineError::InvalidPower { .. })));

        let nan = TeamLineup {
            name: "Nan".into(),
            entries: (0..9).map(|i| entry(i, 50.0)).collect(),
            pitcher_power: f64::NAN,
        };
        assert!(matches!(nan.validate(), Err(EngineError::InvalidPower { .. })));
    }

    #[test]
    fn test_from_members_orders_by_batting_order() {
        let members: Vec<RosterMember> = FieldPosition::PRIORITY
            .iter()
            .enumerate()
            .rev()
            .map(|(i, pos)| RosterMember {
                candidate: RosterCandidate::new(
                    i as u32,
                    format!("M{}", i),
                    ElementType::Normal,
                    StatProfile::uniform(60 + i as u8 * 5),
                ),
                position: *pos,
                batting_order: i as u8 + 1,
            })
            .collect();

        let lineup = TeamLineup::from_members("Roster", &members, 1.0);
        assert_eq!(lineup.entries.len(), 9);
        assert_eq!(lineup.entries[0].position, FieldPosition::Pitcher);
        assert_eq!(lineup.entries[8].position, FieldPosition::RightField);
        assert!(lineup.validate().is_ok());

        let boosted = TeamLineup::from_members("Roster", &members, 1.5);
        assert!(boosted.pitcher_power > lineup.pitcher_power);
    }
}
