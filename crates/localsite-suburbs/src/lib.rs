//! Suburb selection engine for generated local-service sites.
//!
//! Loads the suburb catalogue, ranks suburbs by demographic and geographic
//! significance, and produces the footer and service-area link lists.

pub mod catalogue;
pub mod error;
pub mod footer;
pub mod geo;
pub mod geocode;
pub mod matcher;
pub mod rings;
pub mod selector;
pub mod significance;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalogue::{Catalogue, CatalogueMeta};
pub use error::SuburbError;
pub use footer::{location_slug, FooterLocationService, FOOTER_COUNT};
pub use geo::{Coordinates, Direction};
pub use geocode::{Geocoder, StaticGeocoder};
pub use matcher::{name_matches, process_featured_suburbs, select_best_match, MatchQuality};
pub use rings::{classify_rings, Ring, RingBoundaries, Rings};
pub use selector::{score_suburbs, select, RingQuotas};
pub use types::{Demographics, EnrichedSuburb, FooterLocationEntry, ScoredSuburb, Suburb};
