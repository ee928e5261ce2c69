//! Domain types shared by the catalogue, selection, and footer layers.

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinates, Direction};

/// Optional census-style figures for a suburb.
///
/// A missing `population` (or a population of zero) means "no demographic
/// data", which selection treats differently from a small population.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub population: Option<u32>,
    pub population_density: Option<f64>,
    pub households: Option<u32>,
    pub median_age: Option<f64>,
}

/// One row of the suburb catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suburb {
    /// Unique within one catalogue load.
    pub id: u32,
    pub name: String,
    pub postcode: Option<String>,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub demographics: Demographics,
}

impl Suburb {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Population when it is known and positive.
    #[must_use]
    pub fn population(&self) -> Option<u32> {
        self.demographics.population.filter(|&p| p > 0)
    }

    #[must_use]
    pub fn has_population(&self) -> bool {
        self.population().is_some()
    }
}

/// A catalogue row with distance and direction from one specific center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedSuburb {
    #[serde(flatten)]
    pub suburb: Suburb,
    pub distance_km: f64,
    pub direction: Direction,
}

impl EnrichedSuburb {
    #[must_use]
    pub fn id(&self) -> u32 {
        self.suburb.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.suburb.name
    }
}

/// An enriched suburb with its score for one selection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSuburb<'a> {
    pub suburb: &'a EnrichedSuburb,
    pub score: f64,
}

/// A suburb link as rendered in the footer or a service-area list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterLocationEntry {
    pub suburb: EnrichedSuburb,
    pub slug: String,
    pub url: String,
}
