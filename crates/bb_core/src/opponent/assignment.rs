//! Position assignment for a selected nine
//!
//! Greedy (default): walk the positions in priority order and give each one
//! the best unassigned candidate. Not a global optimum.
//! Optimal (opt-in): Hungarian assignment maximising total fitness.

use crate::ability::{fitness_score, AbilityProfile};
use crate::models::{FieldPosition, RosterCandidate, RosterMember};
use pathfinding::kuhn_munkres::kuhn_munkres;
use pathfinding::matrix::Matrix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    #[default]
    Greedy,
    Optimal,
}

/// fitness[candidate][position index in `FieldPosition::PRIORITY`]
fn fitness_matrix(candidates: &[RosterCandidate]) -> Vec<[u8; 9]> {
    candidates
        .iter()
        .map(|c| {
            let ability = AbilityProfile::from_stats(&c.stats);
            let mut row = [0u8; 9];
            for (i, pos) in FieldPosition::PRIORITY.iter().enumerate() {
                row[i] = fitness_score(&ability, *pos);
            }
            row
        })
        .collect()
}

/// Assign nine candidates to the nine positions.
///
/// Batting order follows position priority (P bats first, RF ninth).
/// Expects exactly nine candidates; extra candidates are left out.
pub fn assign_positions(
    candidates: &[RosterCandidate],
    strategy: AssignmentStrategy,
) -> Vec<RosterMember> {
    let fitness = fitness_matrix(candidates);
    let slot_to_candidate = match strategy {
        AssignmentStrategy::Greedy => assign_greedy(&fitness),
        AssignmentStrategy::Optimal => assign_optimal(&fitness),
    };

    slot_to_candidate
        .into_iter()
        .enumerate()
        .filter_map(|(slot, candidate_idx)| {
            candidate_idx.map(|idx| RosterMember {
                candidate: candidates[idx].clone(),
                position: FieldPosition::PRIORITY[slot],
                batting_order: slot as u8 + 1,
            })
        })
        .collect()
}

/// Sum of fitness over an assignment.
pub fn total_fitness(members: &[RosterMember]) -> u32 {
    members
        .iter()
        .map(|m| fitness_score(&AbilityProfile::from_stats(&m.candidate.stats), m.position) as u32)
        .sum()
}

fn assign_greedy(fitness: &[[u8; 9]]) -> Vec<Option<usize>> {
    let mut taken = vec![false; fitness.len()];
    let mut slots = Vec::with_capacity(9);
    for slot in 0..9 {
        let mut best: Option<(usize, u8)> = None;
        for (idx, row) in fitness.iter().enumerate() {
            if taken[idx] {
                continue;
            }
            // strict >: the earliest candidate wins ties
            if best.map_or(true, |(_, score)| row[slot] > score) {
                best = Some((idx, row[slot]));
            }
        }
        if let Some((idx, _)) = best {
            taken[idx] = true;
        }
        slots.push(best.map(|(idx, _)| idx));
    }
    slots
}

fn assign_optimal(fitness: &[[u8; 9]]) -> Vec<Option<usize>> {
    if fitness.len() < 9 {
        // kuhn_munkres needs rows <= columns with rows = positions
        return assign_greedy(fitness);
    }
    // rows = positions, columns = candidates
    let weights = Matrix::from_fn(9, fitness.len(), |(slot, idx)| fitness[idx][slot] as i64);
    let (_, assignment) = kuhn_munkres(&weights);
    assignment.into_iter().map(Some).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementType, StatProfile};
    use std::collections::HashSet;

    fn nine() -> Vec<RosterCandidate> {
        vec![
            StatProfile::new(90, 60, 60, 120, 110, 100),
            StatProfile::new(110, 70, 120, 50, 90, 40),
            StatProfile::new(100, 140, 70, 80, 60, 50),
            StatProfile::new(60, 70, 90, 60, 80, 120),
            StatProfile::new(80, 120, 100, 70, 60, 60),
            StatProfile::new(70, 90, 110, 60, 80, 110),
            StatProfile::new(80, 110, 60, 90, 60, 80),
            StatProfile::new(60, 60, 80, 50, 70, 140),
            StatProfile::new(70, 130, 80, 90, 50, 70),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, s)| RosterCandidate::new(i as u32, format!("C{}", i), ElementType::Normal, s))
        .collect()
    }

    fn assert_valid(members: &[RosterMember]) {
        assert_eq!(members.len(), 9);
        let ids: HashSet<_> = members.iter().map(|m| m.candidate.id).collect();
        assert_eq!(ids.len(), 9);
        let positions: HashSet<_> = members.iter().map(|m| m.position).collect();
        assert_eq!(positions.len(), 9);
        for (i, m) in members.iter().enumerate() {
            assert_eq!(m.batting_order as usize, i + 1);
            assert_eq!(m.position, FieldPosition::PRIORITY[i]);
        }
    }

    #[test]
    fn test_greedy_assignment_valid() {
        let members = assign_positions(&nine(), AssignmentStrategy::Greedy);
        assert_valid(&members);
    }

    #[test]
    fn test_greedy_takes_best_pitcher_first() {
        let candidates = nine();
        let members = assign_positions(&candidates, AssignmentStrategy::Greedy);
        let best_pitcher = candidates
            .iter()
            .map(|c| fitness_score(&AbilityProfile::from_stats(&c.stats), FieldPosition::Pitcher))
            .max()
            .unwrap();
        let assigned = fitness_score(
            &AbilityProfile::from_stats(&members[0].candidate.stats),
            FieldPosition::Pitcher,
        );
        assert_eq!(assigned, best_pitcher);
    }

    #[test]
    fn test_greedy_ties_prefer_earlier_candidate() {
        let clones: Vec<RosterCandidate> = (0..9)
            .map(|i| RosterCandidate::new(i, format!("Same{}", i), ElementType::Normal, StatProfile::uniform(90)))
            .collect();
        let members = assign_positions(&clones, AssignmentStrategy::Greedy);
        let ids: Vec<u32> = members.iter().map(|m| m.candidate.id).collect();
        assert_eq!(ids, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_optimal_never_worse_than_greedy() {
        let candidates = nine();
        let greedy = assign_positions(&candidates, AssignmentStrategy::Greedy);
        let optimal = assign_positions(&candidates, AssignmentStrategy::Optimal);
        assert_valid(&optimal);
        assert!(total_fitness(&optimal) >= total_fitness(&greedy));
    }
}
