//! Candidate filtering and roster selection

use crate::error::{EngineError, Result};
use crate::models::{ElementType, RosterCandidate, LINEUP_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Amount added to each side of the stat band when too few candidates survive.
pub const BAND_WIDEN_STEP: f32 = 15.0;

/// How the nine selectees are drawn from the filtered pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Uniform random sample (lower tiers).
    #[default]
    Uniform,
    /// One representative per distinct primary type first, then random fill (top tier).
    Balanced,
}

/// Which filtering step produced the final candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStage {
    StatBand,
    WidenedBand,
    TypeOnly,
    FullPool,
}

#[derive(Debug, Clone)]
pub struct CandidateFilter<'a> {
    pub candidates: Vec<&'a RosterCandidate>,
    pub stage: FilterStage,
}

fn in_band(candidate: &RosterCandidate, min: f32, max: f32) -> bool {
    let avg = candidate.stats.average();
    avg >= min && avg <= max
}

/// Type filter, then stat band, then one widening step, then pool fallback.
///
/// Fails only when the whole pool is smaller than a lineup.
pub fn filter_candidates<'a>(
    pool: &'a [RosterCandidate],
    required_type: Option<ElementType>,
    min_average: f32,
    max_average: f32,
) -> Result<CandidateFilter<'a>> {
    if pool.len() < LINEUP_SIZE {
        return Err(EngineError::InsufficientCandidates {
            needed: LINEUP_SIZE,
            available: pool.len(),
        });
    }

    let typed: Vec<&RosterCandidate> = match required_type {
        Some(t) => pool.iter().filter(|c| c.has_type(t)).collect(),
        None => pool.iter().collect(),
    };

    let banded: Vec<&RosterCandidate> =
        typed.iter().copied().filter(|c| in_band(c, min_average, max_average)).collect();
    if banded.len() >= LINEUP_SIZE {
        return Ok(CandidateFilter { candidates: banded, stage: FilterStage::StatBand });
    }

    let (wide_min, wide_max) = (min_average - BAND_WIDEN_STEP, max_average + BAND_WIDEN_STEP);
    let widened: Vec<&RosterCandidate> =
        typed.iter().copied().filter(|c| in_band(c, wide_min, wide_max)).collect();
    log::debug!(
        "stat band {:.0}-{:.0} left {} candidates, widened to {:.0}-{:.0}: {}",
        min_average,
        max_average,
        banded.len(),
        wide_min,
        wide_max,
        widened.len()
    );
    if widened.len() >= LINEUP_SIZE {
        return Ok(CandidateFilter { candidates: widened, stage: FilterStage::WidenedBand });
    }

    if typed.len() >= LINEUP_SIZE && required_type.is_some() {
        log::warn!(
            "type {:?}: stat band exhausted, using all {} typed candidates",
            required_type,
            typed.len()
        );
        return Ok(CandidateFilter { candidates: typed, stage: FilterStage::TypeOnly });
    }

    log::warn!(
        "falling back to the full pool ({} candidates, required type {:?})",
        pool.len(),
        required_type
    );
    Ok(CandidateFilter { candidates: pool.iter().collect(), stage: FilterStage::FullPool })
}

/// Draw `count` candidates (`count <= candidates.len()` is the caller's job).
pub fn select_candidates(
    candidates: &[&RosterCandidate],
    strategy: SelectionStrategy,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<RosterCandidate> {
    match strategy {
        SelectionStrategy::Uniform => {
            candidates.choose_multiple(rng, count).map(|c| (*c).clone()).collect()
        }
        SelectionStrategy::Balanced => select_balanced(candidates, count, rng),
    }
}

fn select_balanced(
    candidates: &[&RosterCandidate],
    count: usize,
    rng: &mut impl Rng,
) -> Vec<RosterCandidate> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.shuffle(rng);

    let mut seen_types = HashSet::new();
    let mut picked = Vec::with_capacity(count);
    let mut rest = Vec::new();
    for idx in order {
        if picked.len() < count && seen_types.insert(candidates[idx].primary_type) {
            picked.push(idx);
        } else {
            rest.push(idx);
        }
    }

    // rest is already in shuffled order
    let missing = count.saturating_sub(picked.len());
    picked.extend(rest.into_iter().take(missing));
    picked.into_iter().map(|i| candidates[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatProfile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pool() -> Vec<RosterCandidate> {
        let mut pool = Vec::new();
        // 12 fire candidates averaging 50..=105
        for i in 0..12u32 {
            pool.push(RosterCandidate::new(
                i,
                format!("Fire{}", i),
                ElementType::Fire,
                StatProfile::uniform(50 + i as u8 * 5),
            ));
        }
        // 10 water, 2 grass all averaging 80
        for i in 12..22u32 {
            pool.push(RosterCandidate::new(i, format!("Water{}", i), ElementType::Water, StatProfile::uniform(80)));
        }
        pool.push(RosterCandidate::new(22, "Grass22", ElementType::Grass, StatProfile::uniform(80)));
        pool.push(
            RosterCandidate::new(23, "Grass23", ElementType::Grass, StatProfile::uniform(80))
                .with_secondary(ElementType::Fire),
        );
        pool
    }

    #[test]
    fn test_band_filter() {
        let pool = pool();
        let f = filter_candidates(&pool, None, 75.0, 85.0).unwrap();
        assert_eq!(f.stage, FilterStage::StatBand);
        // Fire 75, Fire 80, Fire 85 + 12 at 80
        assert_eq!(f.candidates.len(), 15);
    }

    #[test]
    fn test_widened_band() {
        let pool = pool();
        // fire (incl. dual-type grass): in 70..=80 → 70, 75, 80, Grass23 = 4; widened 55..=95 → 9 fire + Grass23
        let f = filter_candidates(&pool, Some(ElementType::Fire), 70.0, 80.0).unwrap();
        assert_eq!(f.stage, FilterStage::WidenedBand);
        assert_eq!(f.candidates.len(), 10);
        assert!(f.candidates.iter().all(|c| c.has_type(ElementType::Fire)));
    }

    #[test]
    fn test_type_only_fallback() {
        let pool = pool();
        let f = filter_candidates(&pool, Some(ElementType::Fire), 200.0, 220.0).unwrap();
        assert_eq!(f.stage, FilterStage::TypeOnly);
        assert_eq!(f.candidates.len(), 13);
    }

    #[test]
    fn test_full_pool_fallback() {
        let pool = pool();
        // only 2 grass candidates exist
        let f = filter_candidates(&pool, Some(ElementType::Grass), 0.0, 255.0).unwrap();
        assert_eq!(f.stage, FilterStage::FullPool);
        assert_eq!(f.candidates.len(), pool.len());
    }

    #[test]
    fn test_pool_too_small() {
        let small: Vec<_> = pool().into_iter().take(8).collect();
        let err = filter_candidates(&small, None, 0.0, 255.0).unwrap_err();
        assert_eq!(err, EngineError::InsufficientCandidates { needed: 9, available: 8 });
    }

    #[test]
    fn test_uniform_selection_unique() {
        let pool = pool();
        let refs: Vec<&RosterCandidate> = pool.iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let picked = select_candidates(&refs, SelectionStrategy::Uniform, 9, &mut rng);
        let ids: HashSet<_> = picked.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn test_balanced_selection_covers_types() {
        let pool = pool();
        let refs: Vec<&RosterCandidate> = pool.iter().collect();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = select_candidates(&refs, SelectionStrategy::Balanced, 9, &mut rng);
            let ids: HashSet<_> = picked.iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), 9);
            let types: HashSet<_> = picked.iter().map(|c| c.primary_type).collect();
            assert_eq!(types.len(), 3, "all three primary types represented");
        }
    }
}
