//! Address-to-coordinate lookup used when no center is configured.

use crate::error::SuburbError;
use crate::geo::Coordinates;

/// Resolves a postal address to a coordinate.
pub trait Geocoder {
    /// # Errors
    ///
    /// Returns an error when the address cannot be resolved.
    fn geocode(&self, address: &str) -> Result<Coordinates, SuburbError>;
}

/// Geocoder for builds that only have the static suburb file.
///
/// It has no lookup service behind it and rejects every address; sites
/// relying on it must set `center_lat`/`center_lng` in the business config.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticGeocoder;

impl Geocoder for StaticGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinates, SuburbError> {
        tracing::warn!(
            address,
            "geocoding is unavailable with static suburb data; set service.center_lat and service.center_lng"
        );
        Err(SuburbError::GeocodingNotSupported {
            address: address.to_string(),
        })
    }
}
