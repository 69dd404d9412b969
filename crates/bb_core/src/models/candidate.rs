use super::{ElementType, FieldPosition, StatProfile};
use serde::{Deserialize, Serialize};

/// An entry of the static roster-candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterCandidate {
    pub id: u32,
    pub name: String,
    pub primary_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_type: Option<ElementType>,
    pub stats: StatProfile,
}

impl RosterCandidate {
    pub fn new(id: u32, name: impl Into<String>, primary_type: ElementType, stats: StatProfile) -> Self {
        Self { id, name: name.into(), primary_type, secondary_type: None, stats }
    }

    pub fn with_secondary(mut self, secondary: ElementType) -> Self {
        self.secondary_type = Some(secondary);
        self
    }

    pub fn has_type(&self, element: ElementType) -> bool {
        self.primary_type == element || self.secondary_type == Some(element)
    }
}

/// A candidate placed on a roster at a defensive slot and batting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterMember {
    pub candidate: RosterCandidate,
    pub position: FieldPosition,
    /// 1-based
    pub batting_order: u8,
}
