pub mod at_bat;
pub mod candidate;
pub mod lineup;
pub mod position;
pub mod score;
pub mod stats;

pub use at_bat::{AtBatRecord, AtBatResult, HalfInning};
pub use candidate::{RosterCandidate, RosterMember};
pub use lineup::{LineupEntry, TeamLineup, LINEUP_SIZE};
pub use position::FieldPosition;
pub use score::{team_a_totals, team_b_totals, InningScore, LineTotals};
pub use stats::{ElementType, StatProfile};
