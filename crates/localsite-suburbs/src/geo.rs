//! Great-circle distance and compass direction between two points.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Eight-point compass label, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Haversine distance in kilometres.
#[must_use]
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = to_radians(b.lat - a.lat);
    let d_lng = to_radians(b.lng - a.lng);

    let h = (d_lat / 2.0).sin().powi(2)
        + to_radians(a.lat).cos() * to_radians(b.lat).cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Compass label for the heading from `from` to `to`.
///
/// The angle is `atan2(Δlng, Δlat)` on raw degree deltas, so it ignores
/// meridian convergence. Published suburb pages already carry labels
/// computed this way, so it must stay as is.
#[must_use]
pub fn direction(from: Coordinates, to: Coordinates) -> Direction {
    let d_lng = to.lng - from.lng;
    let d_lat = to.lat - from.lat;

    let angle = d_lng.atan2(d_lat).to_degrees();
    let normalized = (angle + 360.0) % 360.0;

    // normalized is in [0, 360), so the rounded sector is in 0..=8
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sector = (normalized / 45.0).round() as usize % 8;
    Direction::ALL[sector]
}

/// Round a distance to one decimal place, the precision shown on pages.
#[must_use]
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
