//! Single-elimination bracket generation and result propagation
//!
//! Brackets are values: every update returns a new bracket and leaves the
//! input untouched.

use super::tier::TournamentTier;
use crate::error::{BracketError, EngineError};
use crate::models::RosterCandidate;
use crate::opponent::{generate_opponent_team, OpponentRequest, OpponentTeam};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One side of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "team", rename_all = "snake_case")]
pub enum BracketSlot {
    /// Not decided yet (later rounds before propagation)
    #[default]
    Empty,
    Player,
    Team(OpponentTeam),
}

impl BracketSlot {
    pub fn is_player(&self) -> bool {
        matches!(self, BracketSlot::Player)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BracketSlot::Empty)
    }

    pub fn team(&self) -> Option<&OpponentTeam> {
        match self {
            BracketSlot::Team(team) => Some(team),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BracketSlot::Empty => "TBD",
            BracketSlot::Player => "Player",
            BracketSlot::Team(team) => &team.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "team", rename_all = "snake_case")]
pub enum MatchWinner {
    Player,
    Team(OpponentTeam),
}

impl MatchWinner {
    pub fn is_player(&self) -> bool {
        matches!(self, MatchWinner::Player)
    }

    fn into_slot(self) -> BracketSlot {
        match self {
            MatchWinner::Player => BracketSlot::Player,
            MatchWinner::Team(team) => BracketSlot::Team(team),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentMatch {
    /// "r{round}-m{match_number}"
    pub id: String,
    /// 1-based
    pub round: u32,
    /// 1-based within the round
    pub match_number: u32,
    pub team1: BracketSlot,
    pub team2: BracketSlot,
    pub has_player_team: bool,
    pub winner: Option<MatchWinner>,
    pub score: Option<String>,
}

impl TournamentMatch {
    fn new(round: u32, match_number: u32, team1: BracketSlot, team2: BracketSlot) -> Self {
        let has_player_team = team1.is_player() || team2.is_player();
        Self {
            id: match_id(round, match_number),
            round,
            match_number,
            team1,
            team2,
            has_player_team,
            winner: None,
            score: None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Both slots filled and no winner yet.
    pub fn is_ready(&self) -> bool {
        !self.is_decided() && !self.team1.is_empty() && !self.team2.is_empty()
    }

    /// The non-player side of a player match.
    pub fn opponent(&self) -> Option<&OpponentTeam> {
        if self.team1.is_player() {
            self.team2.team()
        } else if self.team2.is_player() {
            self.team1.team()
        } else {
            None
        }
    }
}

pub fn match_id(round: u32, match_number: u32) -> String {
    format!("r{}-m{}", round, match_number)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentBracket {
    pub tier: TournamentTier,
    /// rounds[0] is round 1
    pub rounds: Vec<Vec<TournamentMatch>>,
    /// Generated opponents in seed order (team_count - 1)
    pub teams: Vec<OpponentTeam>,
    /// 1-based; advances only on player wins
    pub current_round: u32,
    /// 1-based seed slot reserved for the player
    pub player_seed: u32,
}

/// Generate a bracket of the tier's default size.
pub fn generate_bracket(
    pool: &[RosterCandidate],
    tier: TournamentTier,
    rng: &mut impl Rng,
) -> Result<TournamentBracket, EngineError> {
    generate_bracket_sized(pool, tier, tier.team_count(), rng)
}

/// Largest bracket [`generate_bracket_sized`] will build.
pub const MAX_TEAM_COUNT: usize = 1 << 16;

/// Generate a bracket of `team_count` sides (power of two, 2..=[`MAX_TEAM_COUNT`]).
pub fn generate_bracket_sized(
    pool: &[RosterCandidate],
    tier: TournamentTier,
    team_count: usize,
    rng: &mut impl Rng,
) -> Result<TournamentBracket, EngineError> {
    if !(2..=MAX_TEAM_COUNT).contains(&team_count) || !team_count.is_power_of_two() {
        return Err(EngineError::InvalidTeamCount(team_count));
    }
    let seed_count =
        u32::try_from(team_count).map_err(|_| EngineError::InvalidTeamCount(team_count))?;

    let player_seed = rng.gen_range(1..=seed_count);
    let (min_average, max_average) = tier.stat_band();

    let mut teams = Vec::with_capacity(team_count - 1);
    for seed in (1..=seed_count).filter(|s| *s != player_seed) {
        let required_type = if tier.type_themed() {
            crate::models::ElementType::ALL.choose(rng).copied()
        } else {
            None
        };
        let request = OpponentRequest::new(required_type, min_average, max_average)
            .with_selection(tier.selection())
            .with_seed(seed);
        teams.push(generate_opponent_team(pool, &request, rng)?);
    }

    let slot_for = |seed: u32| -> BracketSlot {
        if seed == player_seed {
            BracketSlot::Player
        } else {
            teams
                .iter()
                .find(|t| t.seed == seed)
                .cloned()
                .map(BracketSlot::Team)
                .unwrap_or_default()
        }
    };

    let round_count = team_count.trailing_zeros() as usize;
    let mut rounds = Vec::with_capacity(round_count);
    rounds.push(
        (0..seed_count / 2)
            .map(|i| TournamentMatch::new(1, i + 1, slot_for(2 * i + 1), slot_for(2 * i + 2)))
            .collect::<Vec<_>>(),
    );
    let mut matches_in_round = seed_count / 4;
    for round in 2..=round_count as u32 {
        rounds.push(
            (1..=matches_in_round)
                .map(|n| TournamentMatch::new(round, n, BracketSlot::Empty, BracketSlot::Empty))
                .collect(),
        );
        matches_in_round /= 2;
    }

    log::info!(
        "{} bracket: {} teams, {} rounds, player seed {}",
        tier.display_name(),
        team_count,
        round_count,
        player_seed
    );

    Ok(TournamentBracket { tier, rounds, teams, current_round: 1, player_seed })
}

/// "t1-t2" → (t1, t2)
fn parse_score(score: &str) -> Option<(u32, u32)> {
    let (a, b) = score.split_once('-')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

impl TournamentBracket {
    pub fn team_count(&self) -> usize {
        self.teams.len() + 1
    }

    fn locate(&self, match_id: &str) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(r, round)| {
            round.iter().position(|m| m.id == match_id).map(|i| (r, i))
        })
    }

    pub fn find_match(&self, match_id: &str) -> Option<&TournamentMatch> {
        self.locate(match_id).map(|(r, i)| &self.rounds[r][i])
    }

    /// The player's next undecided match, if the player is still alive.
    pub fn player_match(&self) -> Option<&TournamentMatch> {
        self.rounds.iter().flatten().find(|m| m.has_player_team && !m.is_decided())
    }

    pub fn final_match(&self) -> Option<&TournamentMatch> {
        self.rounds.last().and_then(|round| round.first())
    }

    pub fn is_complete(&self) -> bool {
        self.final_match().map_or(false, TournamentMatch::is_decided)
    }

    pub fn champion(&self) -> Option<&MatchWinner> {
        self.final_match().and_then(|m| m.winner.as_ref())
    }

    pub fn player_is_champion(&self) -> bool {
        self.champion().map_or(false, MatchWinner::is_player)
    }

    /// The player lost a match.
    pub fn player_eliminated(&self) -> bool {
        self.rounds
            .iter()
            .flatten()
            .any(|m| m.has_player_team && matches!(m.winner, Some(MatchWinner::Team(_))))
    }

    /// Record a result and propagate the winner into the next round.
    ///
    /// Player matches use `player_won`; `score` is stored as given. CPU matches
    /// require `player_won == false` and read the winner from the "t1-t2"
    /// score. Returns a new bracket; `self` is unchanged.
    pub fn record_match_result(
        &self,
        match_id: &str,
        player_won: bool,
        score: &str,
    ) -> Result<TournamentBracket, BracketError> {
        let (round_idx, match_idx) = self
            .locate(match_id)
            .ok_or_else(|| BracketError::MatchNotFound { match_id: match_id.to_string() })?;
        let current = &self.rounds[round_idx][match_idx];

        if current.is_decided() {
            return Err(BracketError::AlreadyDecided { match_id: match_id.to_string() });
        }
        if !current.is_ready() {
            return Err(BracketError::MatchNotReady { match_id: match_id.to_string() });
        }

        let winner = if current.has_player_team {
            if player_won {
                MatchWinner::Player
            } else {
                let opponent = current
                    .opponent()
                    .cloned()
                    .ok_or_else(|| BracketError::MatchNotReady { match_id: match_id.to_string() })?;
                MatchWinner::Team(opponent)
            }
        } else {
            if player_won {
                return Err(BracketError::PlayerNotInMatch { match_id: match_id.to_string() });
            }
            let invalid = || BracketError::InvalidScore {
                match_id: match_id.to_string(),
                score: score.to_string(),
            };
            let (s1, s2) = parse_score(score).ok_or_else(invalid)?;
            let side = match s1.cmp(&s2) {
                std::cmp::Ordering::Greater => &current.team1,
                std::cmp::Ordering::Less => &current.team2,
                std::cmp::Ordering::Equal => return Err(invalid()),
            };
            match side.team() {
                Some(team) => MatchWinner::Team(team.clone()),
                None => return Err(invalid()),
            }
        };

        let mut next = self.clone();
        let round_number = current.round;
        let decided = &mut next.rounds[round_idx][match_idx];
        decided.winner = Some(winner.clone());
        decided.score = Some(score.to_string());

        log::info!(
            "{} decided {} ({}): {} advances",
            match_id,
            score,
            round_number,
            match &winner {
                MatchWinner::Player => "player",
                MatchWinner::Team(team) => team.name.as_str(),
            }
        );

        if let Some(next_round) = next.rounds.get_mut(round_idx + 1) {
            let target = next_round
                .get_mut(match_idx / 2)
                .ok_or_else(|| BracketError::MalformedBracket { match_id: match_id.to_string() })?;
            if match_idx % 2 == 0 {
                target.team1 = winner.clone().into_slot();
            } else {
                target.team2 = winner.clone().into_slot();
            }
            target.has_player_team = target.team1.is_player() || target.team2.is_player();

            if winner.is_player() {
                next.current_round = round_number + 1;
            }
        }

        Ok(next)
    }

    /// Decide every ready CPU-vs-CPU match, round by round.
    ///
    /// Team 1 wins with `s1² / (s1² + s2²)` over overall average stats.
    pub fn resolve_cpu_matches(&self, rng: &mut impl Rng) -> Result<TournamentBracket, BracketError> {
        let mut bracket = self.clone();
        for round_idx in 0..bracket.rounds.len() {
            let ready: Vec<(String, f32, f32)> = bracket.rounds[round_idx]
                .iter()
                .filter(|m| !m.has_player_team && m.is_ready())
                .filter_map(|m| Some((m.id.clone(), m.team1.team()?.strength(), m.team2.team()?.strength())))
                .collect();

            for (id, s1, s2) in ready {
                let score = simulated_score(s1, s2, rng);
                bracket = bracket.record_match_result(&id, false, &score)?;
            }
        }
        Ok(bracket)
    }
}

fn win_probability(s1: f32, s2: f32) -> f64 {
    let (a, b) = ((s1 as f64).powi(2), (s2 as f64).powi(2));
    if a + b <= 0.0 {
        0.5
    } else {
        a / (a + b)
    }
}

/// "t1-t2" with a strict winner.
fn simulated_score(s1: f32, s2: f32, rng: &mut impl Rng) -> String {
    let team1_wins = rng.gen_bool(win_probability(s1, s2));
    let winning = rng.gen_range(1..=9u32);
    let losing = rng.gen_range(0..winning);
    if team1_wins {
        format!("{}-{}", winning, losing)
    } else {
        format!("{}-{}", losing, winning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementType, StatProfile};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pool() -> Vec<RosterCandidate> {
        (0..72u32)
            .map(|id| {
                let element = ElementType::ALL[id as usize % 18];
                let base = 45 + ((id * 11) % 70) as u8;
                RosterCandidate::new(
                    id,
                    format!("Cand{}", id),
                    element,
                    StatProfile::new(base, base + 5, base, base + 10, base, base + 3),
                )
            })
            .collect()
    }

    fn bracket(team_count: usize, seed: u64) -> TournamentBracket {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_bracket_sized(&pool(), TournamentTier::Regional, team_count, &mut rng).unwrap()
    }

    /// Score every round-1 CPU match as a team-1 win.
    fn record_cpu_round(mut b: TournamentBracket, round: usize) -> TournamentBracket {
        let ids: Vec<String> = b.rounds[round]
            .iter()
            .filter(|m| !m.has_player_team)
            .map(|m| m.id.clone())
            .collect();
        for id in ids {
            b = b.record_match_result(&id, false, "4-2").unwrap();
        }
        b
    }

    #[test]
    fn test_four_team_structure() {
        let b = bracket(4, 1);
        assert_eq!(b.teams.len(), 3);
        assert_eq!(b.rounds.len(), 2);
        assert_eq!(b.rounds[0].len(), 2);
        assert_eq!(b.rounds[1].len(), 1);
        assert!(b.rounds[1][0].team1.is_empty());
        assert!(b.rounds[1][0].team2.is_empty());
        assert!(!b.rounds[1][0].has_player_team);
        assert_eq!(b.current_round, 1);
        assert!((1..=4).contains(&b.player_seed));

        let player_slots = b.rounds[0]
            .iter()
            .flat_map(|m| [&m.team1, &m.team2])
            .filter(|s| s.is_player())
            .count();
        assert_eq!(player_slots, 1);
        assert_eq!(b.rounds[0].iter().filter(|m| m.has_player_team).count(), 1);
        assert_eq!(b.rounds[0][1].id, "r1-m2");
    }

    #[test]
    fn test_invalid_team_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for count in [0usize, 1, 3, 6, 12, MAX_TEAM_COUNT * 2, usize::MAX / 2 + 1] {
            let err = generate_bracket_sized(&pool(), TournamentTier::Regional, count, &mut rng).unwrap_err();
            assert_eq!(err, EngineError::InvalidTeamCount(count));
        }
    }

    #[test]
    fn test_seeds_cover_every_slot() {
        let b = bracket(8, 3);
        let mut seeds: Vec<u32> = b.teams.iter().map(|t| t.seed).collect();
        seeds.push(b.player_seed);
        seeds.sort_unstable();
        assert_eq!(seeds, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_double_record_rejected_and_next_slot_untouched() {
        let b = bracket(4, 2);
        let cpu = b.rounds[0].iter().find(|m| !m.has_player_team).unwrap().clone();
        let once = b.record_match_result(&cpu.id, false, "3-1").unwrap();
        let slot_before = once.rounds[1][0].clone();

        let err = once.record_match_result(&cpu.id, false, "1-3").unwrap_err();
        assert_eq!(err, BracketError::AlreadyDecided { match_id: cpu.id.clone() });
        assert_eq!(once.rounds[1][0], slot_before);
        // team 1 won 3-1
        let winner = once.find_match(&cpu.id).unwrap().winner.clone().unwrap();
        assert_eq!(winner, MatchWinner::Team(cpu.team1.team().unwrap().clone()));
        // the original bracket is untouched
        assert!(b.find_match(&cpu.id).unwrap().winner.is_none());
    }

    #[test]
    fn test_unknown_and_unready_matches() {
        let b = bracket(4, 4);
        assert_eq!(
            b.record_match_result("r9-m1", true, "1-0"),
            Err(BracketError::MatchNotFound { match_id: "r9-m1".into() })
        );
        assert_eq!(
            b.record_match_result("r2-m1", true, "1-0"),
            Err(BracketError::MatchNotReady { match_id: "r2-m1".into() })
        );
    }

    #[test]
    fn test_cpu_match_rules() {
        let b = bracket(4, 5);
        let cpu = b.rounds[0].iter().find(|m| !m.has_player_team).unwrap().id.clone();
        assert_eq!(
            b.record_match_result(&cpu, true, "3-1"),
            Err(BracketError::PlayerNotInMatch { match_id: cpu.clone() })
        );
        for bad in ["2-2", "x-1", "5"] {
            assert!(matches!(
                b.record_match_result(&cpu, false, bad),
                Err(BracketError::InvalidScore { .. })
            ));
        }
        let decided = b.record_match_result(&cpu, false, "0-7").unwrap();
        let m = decided.find_match(&cpu).unwrap();
        assert_eq!(m.winner, Some(MatchWinner::Team(m.team2.team().unwrap().clone())));
        assert_eq!(m.score.as_deref(), Some("0-7"));
    }

    #[test]
    fn test_eight_team_player_win_advances_round() {
        let b = bracket(8, 11);
        let player_match = b.player_match().unwrap().clone();
        let idx = (player_match.match_number - 1) as usize;

        let after = record_cpu_round(b, 0).record_match_result(&player_match.id, true, "5-3").unwrap();
        assert_eq!(after.current_round, 2);

        let next = &after.rounds[1][idx / 2];
        let slot = if idx % 2 == 0 { &next.team1 } else { &next.team2 };
        assert!(slot.is_player());
        assert!(next.has_player_team);
        assert!(after.rounds[1].iter().all(|m| !m.team1.is_empty() && !m.team2.is_empty()));
        assert_eq!(after.player_match().unwrap().id, next.id);
    }

    #[test]
    fn test_player_loss_leaves_current_round() {
        let b = bracket(8, 12);
        let player_match = b.player_match().unwrap().clone();
        let opponent = player_match.opponent().unwrap().clone();
        let idx = (player_match.match_number - 1) as usize;

        let after = record_cpu_round(b, 0).record_match_result(&player_match.id, false, "2-6").unwrap();
        assert_eq!(after.current_round, 1);
        assert!(after.player_eliminated());
        assert!(after.player_match().is_none());

        let next = &after.rounds[1][idx / 2];
        let slot = if idx % 2 == 0 { &next.team1 } else { &next.team2 };
        assert_eq!(slot, &BracketSlot::Team(opponent));
        assert!(!next.has_player_team);
    }

    #[test]
    fn test_player_runs_the_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut b = bracket(8, 13);
        while let Some(m) = b.player_match().cloned() {
            b = b.resolve_cpu_matches(&mut rng).unwrap();
            b = b.record_match_result(&m.id, true, "6-2").unwrap();
        }
        assert!(b.is_complete());
        assert!(b.player_is_champion());
        assert!(!b.player_eliminated());
        assert_eq!(b.current_round, 3);
    }

    #[test]
    fn test_resolve_cpu_matches_completes_after_player_loss() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let b = bracket(8, 14);
        let player_match = b.player_match().unwrap().id.clone();
        let b = b.record_match_result(&player_match, false, "1-4").unwrap();
        let done = b.resolve_cpu_matches(&mut rng).unwrap();
        assert!(done.is_complete());
        assert!(!done.player_is_champion());
        assert!(matches!(done.champion(), Some(MatchWinner::Team(_))));
        for m in done.rounds.iter().flatten() {
            assert!(m.is_decided());
        }
    }

    #[test]
    fn test_win_probability() {
        assert_eq!(win_probability(50.0, 50.0), 0.5);
        assert_eq!(win_probability(0.0, 0.0), 0.5);
        assert!((win_probability(100.0, 50.0) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_bracket_json_round_trip() {
        let b = bracket(4, 6);
        let json = serde_json::to_string(&b).unwrap();
        let back: TournamentBracket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
