//! Population statistics used to rank suburbs.
//!
//! All functions take the whole candidate set because significance is
//! relative: a suburb of 4,000 people stands out among hamlets and
//! disappears among inner-city suburbs.

use std::collections::HashSet;

use crate::geo::distance_km;
use crate::types::EnrichedSuburb;

/// Minimum population for a suburb to count as a regional center.
pub const REGIONAL_CENTER_MIN_POPULATION: u32 = 1000;
/// Neighbourhood radius for regional-center comparison.
pub const REGIONAL_CENTER_RADIUS_KM: f64 = 10.0;
/// A regional center must exceed its neighbours' mean by this factor.
pub const REGIONAL_CENTER_DOMINANCE: f64 = 1.5;
/// Minimum population for commercial-cluster membership.
pub const COMMERCIAL_MIN_POPULATION: u32 = 2000;
/// Link distance between members of one commercial cluster.
pub const COMMERCIAL_CLUSTER_KM: f64 = 5.0;
/// Outlier threshold is mean plus this many standard deviations.
pub const SIGNIFICANCE_STDDEV_FACTOR: f64 = 0.5;

/// Sorted positive populations of a candidate set, for repeated
/// percentile lookups.
#[derive(Debug, Clone)]
pub struct PopulationRanking {
    sorted: Vec<u32>,
}

impl PopulationRanking {
    #[must_use]
    pub fn new(suburbs: &[EnrichedSuburb]) -> Self {
        let mut sorted: Vec<u32> = suburbs
            .iter()
            .filter_map(|s| s.suburb.population())
            .collect();
        sorted.sort_unstable();
        Self { sorted }
    }

    /// Fraction of known populations strictly below this suburb's, in `[0, 1]`.
    /// Suburbs without population data rank at 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentile(&self, suburb: &EnrichedSuburb) -> f64 {
        let Some(population) = suburb.suburb.population() else {
            return 0.0;
        };
        if self.sorted.is_empty() {
            return 0.0;
        }
        let rank = self.sorted.partition_point(|&p| p < population);
        rank as f64 / self.sorted.len() as f64
    }
}

/// Percentile rank of `suburb`'s population within `population`.
#[must_use]
pub fn population_percentile(suburb: &EnrichedSuburb, population: &[EnrichedSuburb]) -> f64 {
    PopulationRanking::new(population).percentile(suburb)
}

/// Whether `suburb` dominates its 10 km neighbourhood.
///
/// Needs at least 1,000 people. An isolated suburb (no other suburb within
/// 10 km) is presumed to be a local hub; otherwise it must exceed 1.5 times
/// the mean population of its neighbours, counting unknowns as zero.
#[must_use]
pub fn is_regional_center(suburb: &EnrichedSuburb, population: &[EnrichedSuburb]) -> bool {
    let Some(own) = suburb.suburb.population() else {
        return false;
    };
    if own < REGIONAL_CENTER_MIN_POPULATION {
        return false;
    }

    let here = suburb.suburb.coordinates();
    let nearby: Vec<&EnrichedSuburb> = population
        .iter()
        .filter(|other| other.id() != suburb.id())
        .filter(|other| distance_km(here, other.suburb.coordinates()) < REGIONAL_CENTER_RADIUS_KM)
        .collect();

    if nearby.is_empty() {
        return true;
    }

    let total: f64 = nearby
        .iter()
        .map(|n| f64::from(n.suburb.population().unwrap_or(0)))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = total / nearby.len() as f64;

    f64::from(own) > mean * REGIONAL_CENTER_DOMINANCE
}

/// Ids of the most populous suburb in each greedy 5 km cluster.
///
/// Candidates (population >= 2,000) are visited in input order; each joins
/// the first existing cluster with any member closer than 5 km, otherwise it
/// starts a new cluster. This single-pass greedy grouping is order-dependent
/// and not an optimal clustering. Published footers were built with it, so
/// keep it as is.
#[must_use]
pub fn detect_commercial_centers(population: &[EnrichedSuburb]) -> HashSet<u32> {
    let mut clusters: Vec<Vec<&EnrichedSuburb>> = Vec::new();

    let candidates = population.iter().filter(|s| {
        s.suburb
            .population()
            .is_some_and(|p| p >= COMMERCIAL_MIN_POPULATION)
    });

    for suburb in candidates {
        let here = suburb.suburb.coordinates();
        let home = clusters.iter_mut().find(|cluster| {
            cluster
                .iter()
                .any(|member| distance_km(here, member.suburb.coordinates()) < COMMERCIAL_CLUSTER_KM)
        });
        match home {
            Some(cluster) => cluster.push(suburb),
            None => clusters.push(vec![suburb]),
        }
    }

    clusters
        .iter()
        .filter_map(|cluster| {
            // first member wins ties
            cluster
                .iter()
                .copied()
                .reduce(|best, s| {
                    if s.suburb.population() > best.suburb.population() {
                        s
                    } else {
                        best
                    }
                })
                .map(EnrichedSuburb::id)
        })
        .collect()
}

/// Ids of suburbs whose population exceeds mean + 0.5 standard deviations.
///
/// Uses the population (not sample) standard deviation over known
/// populations. No population data gives an empty set.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn find_significant_suburbs(population: &[EnrichedSuburb]) -> HashSet<u32> {
    let known: Vec<f64> = population
        .iter()
        .filter_map(|s| s.suburb.population())
        .map(f64::from)
        .collect();

    if known.is_empty() {
        return HashSet::new();
    }

    let n = known.len() as f64;
    let mean = known.iter().sum::<f64>() / n;
    let variance = known.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;
    let threshold = mean + variance.sqrt() * SIGNIFICANCE_STDDEV_FACTOR;

    population
        .iter()
        .filter(|s| s.suburb.population().is_some_and(|p| f64::from(p) > threshold))
        .map(EnrichedSuburb::id)
        .collect()
}
