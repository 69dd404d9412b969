//! Engine configuration
//!
//! All tuning constants of the at-bat and half-inning models live here so that
//! balance changes never touch simulation code.
//!
//! ```rust
//! use bb_core::engine::config::GameConfig;
//!
//! let config = GameConfig::default();
//! assert_eq!(config.innings, 9);
//! let no_steals = GameConfig::without_steals();
//! assert_eq!(no_steals.steal_attempt_rate, 0.0);
//! ```

use crate::error::{EngineError, Result};
use crate::models::AtBatResult;
use serde::{Deserialize, Serialize};

/// Base outcome weights at advantage 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeTable {
    pub single: f64,
    pub double: f64,
    pub triple: f64,
    pub homerun: f64,
    pub strikeout: f64,
    pub groundout: f64,
    pub flyout: f64,
    pub walk: f64,
    pub hit_by_pitch: f64,
    pub sacrifice: f64,
    pub sacrifice_fly: f64,
    pub error: f64,
    pub fielders_choice: f64,
}

impl Default for OutcomeTable {
    fn default() -> Self {
        Self {
            single: 15.0,
            double: 4.5,
            triple: 0.8,
            homerun: 2.5,
            strikeout: 20.0,
            groundout: 20.0,
            flyout: 18.0,
            walk: 8.0,
            hit_by_pitch: 1.0,
            sacrifice: 3.0,
            sacrifice_fly: 2.0,
            error: 1.5,
            fielders_choice: 2.0,
        }
    }
}

impl OutcomeTable {
    pub fn base_weight(&self, result: AtBatResult) -> f64 {
        match result {
            AtBatResult::Single => self.single,
            AtBatResult::Double => self.double,
            AtBatResult::Triple => self.triple,
            AtBatResult::Homerun => self.homerun,
            AtBatResult::Strikeout => self.strikeout,
            AtBatResult::Groundout => self.groundout,
            AtBatResult::Flyout => self.flyout,
            AtBatResult::Walk => self.walk,
            AtBatResult::HitByPitch => self.hit_by_pitch,
            AtBatResult::Sacrifice => self.sacrifice,
            AtBatResult::SacrificeFly => self.sacrifice_fly,
            AtBatResult::Error => self.error,
            AtBatResult::FieldersChoice => self.fielders_choice,
        }
    }
}

/// Game-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scheduled innings (기본: 9)
    pub innings: u8,
    /// Plate appearances per half-inning before the loop is cut (기본: 20)
    pub safety_cap: u16,
    /// Chance a double with runners on scores up to two (기본: 0.7)
    pub double_score_chance: f64,
    /// Chance a single with runners on scores one (기본: 0.35)
    pub single_score_chance: f64,
    /// Chance a sacrifice with 2+ runners scores one (기본: 0.3)
    pub sacrifice_score_chance: f64,
    /// Chance an error with runners on scores one (기본: 0.3)
    pub error_score_chance: f64,
    /// Steal attempt chance per plate appearance with runners on and < 2 outs (기본: 0.05)
    pub steal_attempt_rate: f64,
    /// Steal success chance (기본: 0.7)
    pub steal_success_rate: f64,
    pub outcome_table: OutcomeTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            innings: 9,
            safety_cap: 20,
            double_score_chance: 0.7,
            single_score_chance: 0.35,
            sacrifice_score_chance: 0.3,
            error_score_chance: 0.3,
            steal_attempt_rate: 0.05,
            steal_success_rate: 0.7,
            outcome_table: OutcomeTable::default(),
        }
    }
}

impl GameConfig {
    /// Default settings with the steal model switched off.
    pub fn without_steals() -> Self {
        Self { steal_attempt_rate: 0.0, ..Default::default() }
    }

    pub fn with_innings(mut self, innings: u8) -> Self {
        self.innings = innings;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.innings == 0 {
            return Err(EngineError::InvalidInnings(self.innings));
        }
        if self.safety_cap == 0 {
            return Err(EngineError::InvalidConfig("safety_cap must be > 0".into()));
        }
        let chances = [
            ("double_score_chance", self.double_score_chance),
            ("single_score_chance", self.single_score_chance),
            ("sacrifice_score_chance", self.sacrifice_score_chance),
            ("error_score_chance", self.error_score_chance),
            ("steal_attempt_rate", self.steal_attempt_rate),
            ("steal_success_rate", self.steal_success_rate),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        for result in AtBatResult::ALL {
            let w = self.outcome_table.base_weight(result);
            if !w.is_finite() || w < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "outcome weight for {:?} must be finite and >= 0, got {}",
                    result, w
                )));
            }
        }
        // Outs must stay reachable or the half-inning only ends at the safety cap.
        let out_weight: f64 = AtBatResult::ALL
            .iter()
            .filter(|r| r.is_out())
            .map(|r| self.outcome_table.base_weight(*r))
            .sum();
        if out_weight <= 0.0 {
            return Err(EngineError::InvalidConfig("at least one out weight must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::without_steals().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            GameConfig::default().with_innings(0).validate(),
            Err(EngineError::InvalidInnings(0))
        );

        let bad_chance = GameConfig { single_score_chance: 1.5, ..Default::default() };
        assert!(matches!(bad_chance.validate(), Err(EngineError::InvalidConfig(_))));

        let mut negative = GameConfig::default();
        negative.outcome_table.walk = -1.0;
        assert!(matches!(negative.validate(), Err(EngineError::InvalidConfig(_))));

        let mut no_outs = GameConfig::default();
        no_outs.outcome_table.strikeout = 0.0;
        no_outs.outcome_table.groundout = 0.0;
        no_outs.outcome_table.flyout = 0.0;
        no_outs.outcome_table.sacrifice = 0.0;
        no_outs.outcome_table.sacrifice_fly = 0.0;
        no_outs.outcome_table.fielders_choice = 0.0;
        assert!(matches!(no_outs.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"innings": 7}"#).unwrap();
        assert_eq!(config.innings, 7);
        assert_eq!(config.safety_cap, 20);
        assert_eq!(config.outcome_table, OutcomeTable::default());
    }
}
