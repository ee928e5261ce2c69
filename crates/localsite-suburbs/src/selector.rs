//! Score-and-quota selection of a representative suburb subset.
//!
//! Every suburb is scored on population rank and significance flags, then
//! the result is filled ring by ring so the list covers near and far areas
//! before falling back to raw score order.

use std::collections::HashSet;

use crate::geo::Coordinates;
use crate::rings::{classify_rings, Ring};
use crate::significance::{
    detect_commercial_centers, find_significant_suburbs, is_regional_center, PopulationRanking,
};
use crate::types::{EnrichedSuburb, ScoredSuburb};

/// Score given to suburbs without population data. They stay selectable
/// but sort below every suburb with data.
pub const NO_POPULATION_SCORE: f64 = -1000.0;
const REGIONAL_CENTER_BONUS: f64 = 30.0;
const COMMERCIAL_CENTER_BONUS: f64 = 25.0;
const SIGNIFICANT_BONUS: f64 = 20.0;
const DENSITY_BONUS: f64 = 15.0;
/// People per km² above which a suburb counts as urban.
const URBAN_DENSITY: f64 = 1000.0;

/// Per-ring first-pass limits for a target count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingQuotas {
    pub inner: usize,
    pub middle: usize,
    pub outer: usize,
    pub satellite: usize,
}

impl RingQuotas {
    /// 25% inner (min 2), 35% middle (min 3), 30% outer (min 3), 10% satellite.
    #[must_use]
    pub fn for_count(count: usize) -> Self {
        Self {
            inner: (count / 4).max(2),
            middle: percent_of(count, 35).max(3),
            outer: percent_of(count, 30).max(3),
            satellite: count / 10,
        }
    }

    #[must_use]
    pub fn quota(&self, ring: Ring) -> usize {
        match ring {
            Ring::Inner => self.inner,
            Ring::Middle => self.middle,
            Ring::Outer => self.outer,
            Ring::Satellite => self.satellite,
        }
    }
}

/// `floor(count * pct / 100)` without overflowing for huge counts.
fn percent_of(count: usize, pct: usize) -> usize {
    count / 100 * pct + count % 100 * pct / 100
}

fn percentile_points(percentile: f64) -> f64 {
    if percentile > 0.9 {
        100.0
    } else if percentile > 0.8 {
        80.0
    } else if percentile > 0.7 {
        60.0
    } else if percentile > 0.5 {
        40.0
    } else {
        percentile * 40.0
    }
}

/// Score every suburb against the rest of the set, in input order.
#[must_use]
pub fn score_suburbs(suburbs: &[EnrichedSuburb]) -> Vec<ScoredSuburb<'_>> {
    let ranking = PopulationRanking::new(suburbs);
    let significant = find_significant_suburbs(suburbs);
    let commercial = detect_commercial_centers(suburbs);

    tracing::debug!(
        significant = significant.len(),
        commercial_centers = commercial.len(),
        "analysed suburb significance"
    );

    suburbs
        .iter()
        .map(|suburb| {
            if !suburb.suburb.has_population() {
                return ScoredSuburb {
                    suburb,
                    score: NO_POPULATION_SCORE,
                };
            }

            let mut score = percentile_points(ranking.percentile(suburb));
            if is_regional_center(suburb, suburbs) {
                score += REGIONAL_CENTER_BONUS;
            }
            if commercial.contains(&suburb.id()) {
                score += COMMERCIAL_CENTER_BONUS;
            }
            if significant.contains(&suburb.id()) {
                score += SIGNIFICANT_BONUS;
            }
            if suburb
                .suburb
                .demographics
                .population_density
                .is_some_and(|d| d > URBAN_DENSITY)
            {
                score += DENSITY_BONUS;
            }

            ScoredSuburb { suburb, score }
        })
        .collect()
}

/// Pick up to `count` suburbs spread across distance rings.
///
/// `center` defaults to the position of the nearest suburb in the set.
/// The first pass takes the best-scored members of each ring up to its
/// quota (inner, middle, outer, satellite); remaining slots are filled from
/// the overall score order. Equal scores keep input order.
#[must_use]
pub fn select(
    suburbs: &[EnrichedSuburb],
    count: usize,
    center: Option<Coordinates>,
) -> Vec<EnrichedSuburb> {
    if suburbs.is_empty() || count == 0 {
        return Vec::new();
    }

    let center = center.or_else(|| {
        suburbs
            .iter()
            .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
            .map(|s| s.suburb.coordinates())
    });
    tracing::debug!(
        candidates = suburbs.len(),
        count,
        center = ?center,
        "smart selection starting"
    );

    let rings = classify_rings(suburbs);
    let mut scored = score_suburbs(suburbs);
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let quotas = RingQuotas::for_count(count);
    let mut chosen: HashSet<u32> = HashSet::new();
    let mut selected: Vec<&ScoredSuburb<'_>> = Vec::with_capacity(count.min(suburbs.len()));

    for ring in Ring::ORDER {
        let ring_best = scored
            .iter()
            .filter(|s| rings.ring_of(s.suburb.id()) == Some(ring))
            .take(quotas.quota(ring));
        for candidate in ring_best {
            if selected.len() >= count {
                break;
            }
            if chosen.insert(candidate.suburb.id()) {
                selected.push(candidate);
            }
        }
    }

    for candidate in &scored {
        if selected.len() >= count {
            break;
        }
        if chosen.insert(candidate.suburb.id()) {
            selected.push(candidate);
        }
    }

    for (i, s) in selected.iter().enumerate() {
        tracing::debug!(
            rank = i + 1,
            name = s.suburb.name(),
            population = ?s.suburb.suburb.population(),
            distance_km = s.suburb.distance_km,
            score = s.score,
            "selected suburb"
        );
    }

    selected.into_iter().map(|s| s.suburb.clone()).collect()
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
