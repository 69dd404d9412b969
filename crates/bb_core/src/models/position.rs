use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine defensive slots every lineup must fill exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldPosition {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
}

impl FieldPosition {
    /// Assignment priority order; also the batting order of generated rosters.
    pub const PRIORITY: [FieldPosition; 9] = [
        FieldPosition::Pitcher,
        FieldPosition::Catcher,
        FieldPosition::FirstBase,
        FieldPosition::SecondBase,
        FieldPosition::ThirdBase,
        FieldPosition::Shortstop,
        FieldPosition::LeftField,
        FieldPosition::CenterField,
        FieldPosition::RightField,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            FieldPosition::Pitcher => "P",
            FieldPosition::Catcher => "C",
            FieldPosition::FirstBase => "1B",
            FieldPosition::SecondBase => "2B",
            FieldPosition::ThirdBase => "3B",
            FieldPosition::Shortstop => "SS",
            FieldPosition::LeftField => "LF",
            FieldPosition::CenterField => "CF",
            FieldPosition::RightField => "RF",
        }
    }

    pub fn is_pitcher(&self) -> bool {
        matches!(self, FieldPosition::Pitcher)
    }

    pub fn is_outfield(&self) -> bool {
        matches!(
            self,
            FieldPosition::LeftField | FieldPosition::CenterField | FieldPosition::RightField
        )
    }
}

impl fmt::Display for FieldPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
