//! Suburb catalogue loaded from the project's pre-generated JSON file.
//!
//! Rows are stored without any center-relative data; distance and direction
//! are computed per query so one catalogue can serve several centers.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::SuburbError;
use crate::geo::{self, Coordinates};
use crate::matcher::name_matches;
use crate::types::{Demographics, EnrichedSuburb, Suburb};

/// Informational header of a catalogue file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogueMeta {
    pub generated: Option<DateTime<Utc>>,
    pub center: Option<Coordinates>,
    pub radius_km: Option<f64>,
    pub count: Option<usize>,
}

/// Header fields stay raw JSON so a malformed header never rejects the rows.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogueFile {
    generated: Option<Value>,
    center: Option<Value>,
    radius_km: Option<Value>,
    count: Option<Value>,
    suburbs: Vec<CatalogueRecord>,
}

impl CatalogueMeta {
    /// Best-effort header conversion; unusable fields become `None`.
    fn from_header(file: &CatalogueFile, path: &str) -> Self {
        let meta = Self {
            generated: file.generated.as_ref().and_then(parse_generated),
            center: file
                .center
                .as_ref()
                .and_then(|v| serde_json::from_value::<Coordinates>(v.clone()).ok()),
            radius_km: file.radius_km.as_ref().and_then(Value::as_f64),
            count: file
                .count
                .as_ref()
                .and_then(Value::as_u64)
                .and_then(|n| usize::try_from(n).ok()),
        };

        let ignored: Vec<&str> = [
            ("generated", file.generated.is_some(), meta.generated.is_some()),
            ("center", file.center.is_some(), meta.center.is_some()),
            ("radiusKm", file.radius_km.is_some(), meta.radius_km.is_some()),
            ("count", file.count.is_some(), meta.count.is_some()),
        ]
        .into_iter()
        .filter(|&(_, present, parsed)| present && !parsed)
        .map(|(field, _, _)| field)
        .collect();
        if !ignored.is_empty() {
            tracing::warn!(
                path,
                fields = ?ignored,
                "ignoring unreadable catalogue header fields"
            );
        }

        meta
    }
}

/// Accepts RFC 3339, an offset-less timestamp (read as UTC) or a bare date.
fn parse_generated(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// One `suburbs[]` entry. `distanceKm` and `direction` in the file are
/// relative to the generator's center and are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogueRecord {
    id: u32,
    name: String,
    postcode: Option<String>,
    state: String,
    latitude: f64,
    longitude: f64,
    population: Option<u32>,
    population_density: Option<f64>,
    households: Option<u32>,
    median_age: Option<f64>,
}

impl From<CatalogueRecord> for Suburb {
    fn from(record: CatalogueRecord) -> Self {
        Suburb {
            id: record.id,
            name: record.name,
            postcode: record.postcode.filter(|p| !p.trim().is_empty()),
            state: record.state,
            latitude: record.latitude,
            longitude: record.longitude,
            demographics: Demographics {
                population: record.population,
                population_density: record.population_density,
                households: record.households,
                median_age: record.median_age,
            },
        }
    }
}

/// Read-only suburb catalogue for one generation run.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    suburbs: Vec<Suburb>,
    meta: CatalogueMeta,
}

impl Catalogue {
    /// Build a catalogue from rows already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`SuburbError::DuplicateId`] if two rows share an id.
    pub fn from_suburbs(suburbs: Vec<Suburb>) -> Result<Self, SuburbError> {
        check_unique_ids(&suburbs)?;
        Ok(Self {
            suburbs,
            meta: CatalogueMeta::default(),
        })
    }

    /// Load a catalogue file, failing on any problem.
    ///
    /// # Errors
    ///
    /// Returns [`SuburbError::CatalogueMissing`] when the file does not exist,
    /// [`SuburbError::CatalogueIo`] / [`SuburbError::CatalogueParse`] when it
    /// cannot be read or decoded, and [`SuburbError::DuplicateId`] when ids
    /// are not unique.
    pub fn load(path: &Path) -> Result<Self, SuburbError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(SuburbError::CatalogueMissing { path: display });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SuburbError::CatalogueIo {
            path: display.clone(),
            source: e,
        })?;
        let file: CatalogueFile =
            serde_json::from_str(&content).map_err(|e| SuburbError::CatalogueParse {
                path: display.clone(),
                source: e,
            })?;

        let meta = CatalogueMeta::from_header(&file, &display);
        let suburbs: Vec<Suburb> = file.suburbs.into_iter().map(Suburb::from).collect();
        check_unique_ids(&suburbs)?;

        Ok(Self { suburbs, meta })
    }

    /// Load a catalogue file, degrading to an empty catalogue on failure.
    ///
    /// Missing or broken data must never stop site generation; the failure
    /// is logged and every query then returns nothing.
    #[must_use]
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalogue) => {
                tracing::info!(
                    path = %path.display(),
                    suburbs = catalogue.len(),
                    "loaded suburb catalogue"
                );
                catalogue
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "suburb catalogue unavailable; continuing with no suburbs"
                );
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn meta(&self) -> &CatalogueMeta {
        &self.meta
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.suburbs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suburbs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Suburb> {
        self.suburbs.iter()
    }

    #[must_use]
    pub fn by_id(&self, id: u32) -> Option<&Suburb> {
        self.suburbs.iter().find(|s| s.id == id)
    }

    /// Every suburb within `radius_km` of `center`, nearest first.
    #[must_use]
    pub fn within_radius(&self, center: Coordinates, radius_km: f64) -> Vec<EnrichedSuburb> {
        let mut found: Vec<EnrichedSuburb> = self
            .suburbs
            .iter()
            .map(|s| enrich(s, center))
            .filter(|s| s.distance_km <= radius_km)
            .collect();
        sort_by_distance(&mut found);
        found
    }

    /// Every catalogue entry matching `term` under the loose name rule,
    /// regardless of distance.
    #[must_use]
    pub fn matches_for(&self, term: &str) -> Vec<&Suburb> {
        self.suburbs
            .iter()
            .filter(|s| name_matches(term, &s.name))
            .collect()
    }

    /// All entries matching any of `names`, in request order, each id once.
    #[must_use]
    pub fn by_names<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Suburb> {
        let mut seen = std::collections::HashSet::new();
        let mut found = Vec::new();
        for name in names {
            for suburb in self.matches_for(name.as_ref()) {
                if seen.insert(suburb.id) {
                    found.push(suburb);
                }
            }
        }
        found
    }

    /// The `limit` suburbs closest to `point`, optionally skipping one id.
    #[must_use]
    pub fn nearest(
        &self,
        point: Coordinates,
        limit: usize,
        exclude_id: Option<u32>,
    ) -> Vec<EnrichedSuburb> {
        let mut found: Vec<EnrichedSuburb> = self
            .suburbs
            .iter()
            .filter(|s| Some(s.id) != exclude_id)
            .map(|s| enrich(s, point))
            .collect();
        sort_by_distance(&mut found);
        found.truncate(limit);
        found
    }
}

/// Attach distance (rounded to 0.1 km) and direction from `center`.
#[must_use]
pub fn enrich(suburb: &Suburb, center: Coordinates) -> EnrichedSuburb {
    let position = suburb.coordinates();
    EnrichedSuburb {
        suburb: suburb.clone(),
        distance_km: geo::round_km(geo::distance_km(center, position)),
        direction: geo::direction(center, position),
    }
}

fn sort_by_distance(suburbs: &mut [EnrichedSuburb]) {
    suburbs.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

fn check_unique_ids(suburbs: &[Suburb]) -> Result<(), SuburbError> {
    let mut seen: HashMap<u32, &str> = HashMap::with_capacity(suburbs.len());
    for suburb in suburbs {
        if let Some(first) = seen.insert(suburb.id, suburb.name.as_str()) {
            return Err(SuburbError::DuplicateId {
                id: suburb.id,
                first: first.to_string(),
                second: suburb.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "catalogue_test.rs"]
mod tests;
