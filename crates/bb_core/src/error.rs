use thiserror::Error;

/// Precondition failures raised by the simulation engine and roster generator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Empty lineup for {team}")]
    EmptyLineup { team: String },

    #[error("Invalid lineup size for {team}: expected {expected}, found {found}")]
    InvalidLineupSize { team: String, expected: usize, found: usize },

    #[error("Invalid power rating for {subject}: {value} (must be finite and > 0)")]
    InvalidPower { subject: String, value: f64 },

    #[error("Invalid innings count: {0}")]
    InvalidInnings(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Insufficient candidates: need {needed}, pool has {available}")]
    InsufficientCandidates { needed: usize, available: usize },

    #[error("Invalid team count {0}: must be a power of two between 2 and 65536")]
    InvalidTeamCount(usize),
}

/// Caller-contract violations when advancing a tournament bracket.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BracketError {
    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: String },

    #[error("Match already decided: {match_id}")]
    AlreadyDecided { match_id: String },

    #[error("Match not ready (open slot): {match_id}")]
    MatchNotReady { match_id: String },

    #[error("Player is not part of match {match_id}")]
    PlayerNotInMatch { match_id: String },

    #[error("Invalid score '{score}' for match {match_id}")]
    InvalidScore { match_id: String, score: String },

    #[error("Bracket has no slot for the winner of {match_id}")]
    MalformedBracket { match_id: String },
}

impl BracketError {
    /// Stable error code used by the JSON layer.
    pub fn code(&self) -> &'static str {
        match self {
            BracketError::MatchNotFound { .. } => "E_MATCH_NOT_FOUND",
            BracketError::AlreadyDecided { .. } => "E_MATCH_DECIDED",
            BracketError::MatchNotReady { .. } => "E_MATCH_NOT_READY",
            BracketError::PlayerNotInMatch { .. } => "E_PLAYER_NOT_IN_MATCH",
            BracketError::InvalidScore { .. } => "E_INVALID_SCORE",
            BracketError::MalformedBracket { .. } => "E_MALFORMED_BRACKET",
        }
    }
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::EmptyLineup { .. } | EngineError::InvalidLineupSize { .. } => {
                "E_LINEUP_SIZE"
            }
            EngineError::InvalidPower { .. } => "E_INVALID_POWER",
            EngineError::InvalidInnings(_) => "E_INVALID_INNINGS",
            EngineError::InvalidConfig(_) => "E_INVALID_CONFIG",
            EngineError::InsufficientCandidates { .. } => "E_INSUFFICIENT_CANDIDATES",
            EngineError::InvalidTeamCount(_) => "E_INVALID_TEAM_COUNT",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
