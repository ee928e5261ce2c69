//! Concentric distance bands around the business center.
//!
//! Boundaries come from natural gaps in the distance sequence, so a metro
//! area with a clear inner/outer split gets bands that follow it. This is a
//! single linear scan, not a quantile computation.

use std::collections::HashMap;

use crate::types::EnrichedSuburb;

/// A jump between consecutive distances larger than this marks a boundary.
const GAP_THRESHOLD_KM: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ring {
    Inner,
    Middle,
    Outer,
    Satellite,
}

impl Ring {
    /// Fixed processing order for quota selection.
    pub const ORDER: [Ring; 4] = [Ring::Inner, Ring::Middle, Ring::Outer, Ring::Satellite];
}

impl std::fmt::Display for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ring::Inner => write!(f, "inner"),
            Ring::Middle => write!(f, "middle"),
            Ring::Outer => write!(f, "outer"),
            Ring::Satellite => write!(f, "satellite"),
        }
    }
}

/// Upper distance bounds (inclusive, km) of the first three rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBoundaries {
    pub inner: f64,
    pub middle: f64,
    pub outer: f64,
}

impl Default for RingBoundaries {
    fn default() -> Self {
        Self {
            inner: 10.0,
            middle: 20.0,
            outer: 30.0,
        }
    }
}

impl RingBoundaries {
    /// Derive boundaries from distances sorted ascending.
    ///
    /// The first three gap positions become inner/middle/outer, missing ones
    /// default to 10/20/30 km, and implausibly wide values are pulled back
    /// (inner > 15 → 10, middle > 25 → 20, outer > 40 → 35).
    #[must_use]
    pub fn from_sorted_distances(distances: &[f64]) -> Self {
        let gaps: Vec<f64> = distances
            .windows(2)
            .filter(|pair| pair[1] - pair[0] > GAP_THRESHOLD_KM)
            .map(|pair| pair[1])
            .take(3)
            .collect();

        let defaults = Self::default();
        let mut inner = gaps.first().copied().unwrap_or(defaults.inner);
        let mut middle = gaps.get(1).copied().unwrap_or(defaults.middle);
        let mut outer = gaps.get(2).copied().unwrap_or(defaults.outer);

        if inner > 15.0 {
            inner = 10.0;
        }
        if middle > 25.0 {
            middle = 20.0;
        }
        if outer > 40.0 {
            outer = 35.0;
        }

        Self {
            inner,
            middle,
            outer,
        }
    }

    #[must_use]
    pub fn ring_for(&self, distance_km: f64) -> Ring {
        if distance_km <= self.inner {
            Ring::Inner
        } else if distance_km <= self.middle {
            Ring::Middle
        } else if distance_km <= self.outer {
            Ring::Outer
        } else {
            Ring::Satellite
        }
    }
}

/// Ring assignment for one candidate set.
#[derive(Debug, Clone)]
pub struct Rings {
    pub boundaries: RingBoundaries,
    assignment: HashMap<u32, Ring>,
    members: HashMap<Ring, Vec<u32>>,
}

impl Rings {
    #[must_use]
    pub fn ring_of(&self, id: u32) -> Option<Ring> {
        self.assignment.get(&id).copied()
    }

    /// Ids in `ring`, nearest first.
    #[must_use]
    pub fn members(&self, ring: Ring) -> &[u32] {
        self.members.get(&ring).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Partition suburbs into inner/middle/outer/satellite bands.
#[must_use]
pub fn classify_rings(suburbs: &[EnrichedSuburb]) -> Rings {
    let mut sorted: Vec<&EnrichedSuburb> = suburbs.iter().collect();
    sorted.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    let distances: Vec<f64> = sorted.iter().map(|s| s.distance_km).collect();
    let boundaries = RingBoundaries::from_sorted_distances(&distances);

    let mut assignment = HashMap::with_capacity(sorted.len());
    let mut members: HashMap<Ring, Vec<u32>> = HashMap::new();
    for suburb in sorted {
        let ring = boundaries.ring_for(suburb.distance_km);
        assignment.insert(suburb.id(), ring);
        members.entry(ring).or_default().push(suburb.id());
    }

    tracing::debug!(
        inner_km = boundaries.inner,
        middle_km = boundaries.middle,
        outer_km = boundaries.outer,
        inner = members.get(&Ring::Inner).map_or(0, Vec::len),
        middle = members.get(&Ring::Middle).map_or(0, Vec::len),
        outer = members.get(&Ring::Outer).map_or(0, Vec::len),
        satellite = members.get(&Ring::Satellite).map_or(0, Vec::len),
        "classified distance rings"
    );

    Rings {
        boundaries,
        assignment,
        members,
    }
}
