//! Fixture builders shared by unit tests.

use crate::catalogue::enrich;
use crate::geo::{Coordinates, Direction};
use crate::types::{Demographics, EnrichedSuburb, Suburb};

pub(crate) const KILBURN: Coordinates = Coordinates {
    lat: -34.8517,
    lng: 138.5829,
};

/// Kilometres per degree of latitude on the haversine sphere.
pub(crate) const KM_PER_DEGREE: f64 = 111.195;

pub(crate) fn suburb(id: u32, name: &str, lat: f64, lng: f64, population: Option<u32>) -> Suburb {
    Suburb {
        id,
        name: name.to_string(),
        postcode: Some("5000".to_string()),
        state: "SA".to_string(),
        latitude: lat,
        longitude: lng,
        demographics: Demographics {
            population,
            ..Demographics::default()
        },
    }
}

/// An enriched row due north of (0, 0) at roughly `distance_km`.
pub(crate) fn at_distance(
    id: u32,
    name: &str,
    distance_km: f64,
    population: Option<u32>,
) -> EnrichedSuburb {
    EnrichedSuburb {
        suburb: suburb(id, name, distance_km / KM_PER_DEGREE, 0.0, population),
        distance_km,
        direction: Direction::N,
    }
}

pub(crate) fn enriched(suburb: &Suburb) -> EnrichedSuburb {
    enrich(suburb, KILBURN)
}
