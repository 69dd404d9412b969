//! # Match simulation engine
//!
//! ```text
//! TeamLineup ×2 ──► GameSimulator ──► InningSimulator (per half) ──► AtBatOutcomeModel
//!                        │                    │
//!                        ▼                    ▼
//!                 Vec<InningScore>     Vec<AtBatRecord> (per side, ordered)
//! ```
//!
//! Randomness is always passed in as `&mut impl Rng`; seed a
//! `rand_chacha::ChaCha8Rng` for reproducible games.

pub mod config;
pub mod game;
pub mod inning;
pub mod outcome;

pub use config::{GameConfig, OutcomeTable};
pub use game::{GameResult, GameSimulator, GameWinner, REGULATION_INNINGS};
pub use inning::{HalfInningResult, InningSimulator, MAX_RUNNERS, OUTS_PER_HALF};
pub use outcome::{advantage, sacrifice_allowed, AtBatOutcomeModel, OutcomeWeights};
