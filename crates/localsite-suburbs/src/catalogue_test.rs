use std::io::Write;

use super::*;
use crate::test_support::{suburb, KILBURN};

const CATALOGUE_JSON: &str = r#"{
  "generated": "2025-03-01T10:00:00.000Z",
  "center": { "lat": -34.8517, "lng": 138.5829 },
  "radiusKm": 50,
  "count": 4,
  "suburbs": [
    { "id": 1, "name": "Kilburn", "postcode": "5084", "state": "SA",
      "latitude": -34.8597, "longitude": 138.5856, "distanceKm": 0.9,
      "direction": "S", "population": null },
    { "id": 2, "name": "Prospect", "postcode": "5082", "state": "SA",
      "latitude": -34.8833, "longitude": 138.5945, "distanceKm": 3.7,
      "direction": "S", "population": 21000, "populationDensity": 2600.5 },
    { "id": 3, "name": "Adelaide", "postcode": "", "state": "SA",
      "latitude": -34.9285, "longitude": 138.6007, "distanceKm": 8.7,
      "direction": "S" },
    { "id": 4, "name": "Gawler", "postcode": "5118", "state": "SA",
      "latitude": -34.5980, "longitude": 138.7450, "distanceKm": 32.0,
      "direction": "NE", "population": 23000 }
  ]
}"#;

fn write_catalogue(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn sample() -> Catalogue {
    let file = write_catalogue(CATALOGUE_JSON);
    Catalogue::load(file.path()).unwrap()
}

#[test]
fn load_reads_rows_and_header() {
    let catalogue = sample();
    assert_eq!(catalogue.len(), 4);
    let meta = catalogue.meta();
    assert_eq!(meta.count, Some(4));
    assert_eq!(meta.radius_km, Some(50.0));
    assert_eq!(meta.center, Some(KILBURN));
    assert!(meta.generated.is_some());
}

#[test]
fn load_keeps_demographics_when_supplied() {
    let catalogue = sample();
    let prospect = catalogue.by_id(2).unwrap();
    assert_eq!(prospect.demographics.population, Some(21000));
    assert_eq!(prospect.demographics.population_density, Some(2600.5));

    let kilburn = catalogue.by_id(1).unwrap();
    assert!(!kilburn.has_population());
}

#[test]
fn load_treats_empty_postcode_as_absent() {
    let catalogue = sample();
    assert!(catalogue.by_id(3).unwrap().postcode.is_none());
    assert_eq!(catalogue.by_id(2).unwrap().postcode.as_deref(), Some("5082"));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalogue::load(&dir.path().join("suburbs.json")).unwrap_err();
    assert!(matches!(err, SuburbError::CatalogueMissing { .. }), "got {err:?}");
}

#[test]
fn load_reports_corrupt_file() {
    let file = write_catalogue("{ \"suburbs\": [ { \"id\": ");
    let err = Catalogue::load(file.path()).unwrap_err();
    assert!(matches!(err, SuburbError::CatalogueParse { .. }), "got {err:?}");
}

#[test]
fn load_rejects_duplicate_ids() {
    let json = CATALOGUE_JSON.replace("\"id\": 4", "\"id\": 2");
    let file = write_catalogue(&json);
    let err = Catalogue::load(file.path()).unwrap_err();
    assert!(
        matches!(err, SuburbError::DuplicateId { id: 2, .. }),
        "got {err:?}"
    );
}

#[test]
fn load_or_empty_degrades_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalogue = Catalogue::load_or_empty(&dir.path().join("nope.json"));
    assert!(catalogue.is_empty());
    assert!(catalogue.within_radius(KILBURN, 100.0).is_empty());
}

#[test]
fn load_or_empty_degrades_on_corrupt_file() {
    let file = write_catalogue("not json at all");
    assert!(Catalogue::load_or_empty(file.path()).is_empty());
}

#[test]
fn within_radius_filters_and_sorts_by_distance() {
    let catalogue = sample();
    let found = catalogue.within_radius(KILBURN, 10.0);
    let names: Vec<&str> = found.iter().map(EnrichedSuburb::name).collect();
    assert_eq!(names, ["Kilburn", "Prospect", "Adelaide"]);
    assert!(found.iter().all(|s| s.distance_km <= 10.0));
    assert!(found.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
}

#[test]
fn within_radius_recomputes_from_the_given_center() {
    let catalogue = sample();
    let gawler = catalogue.by_id(4).unwrap().coordinates();
    let found = catalogue.within_radius(gawler, 1.0);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "Gawler");
    assert!(found[0].distance_km.abs() < f64::EPSILON);
}

#[test]
fn within_radius_rounds_distance_to_one_decimal() {
    let catalogue = sample();
    for s in catalogue.within_radius(KILBURN, 50.0) {
        let scaled = s.distance_km * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-9, "{}", s.distance_km);
    }
}

#[test]
fn matches_for_ignores_radius() {
    let catalogue = sample();
    let found = catalogue.matches_for("gawler");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 4);
}

#[test]
fn by_names_keeps_request_order_without_duplicates() {
    let catalogue = sample();
    let found = catalogue.by_names(&["Prospect", "Kilburn", "prospect"]);
    let ids: Vec<u32> = found.iter().map(|s| s.id).collect();
    assert_eq!(ids, [2, 1]);
}

#[test]
fn nearest_excludes_requested_id() {
    let catalogue = sample();
    let kilburn = catalogue.by_id(1).unwrap().coordinates();
    let found = catalogue.nearest(kilburn, 2, Some(1));
    let ids: Vec<u32> = found.iter().map(EnrichedSuburb::id).collect();
    assert_eq!(ids, [2, 3]);
}

#[test]
fn nearest_without_exclusion_includes_the_point_itself() {
    let catalogue = sample();
    let kilburn = catalogue.by_id(1).unwrap().coordinates();
    let found = catalogue.nearest(kilburn, 1, None);
    assert_eq!(found[0].id(), 1);
}

#[test]
fn from_suburbs_rejects_duplicate_ids() {
    let rows = vec![
        suburb(7, "Salisbury", -34.76, 138.64, None),
        suburb(7, "Salisbury North", -34.75, 138.62, None),
    ];
    let err = Catalogue::from_suburbs(rows).unwrap_err();
    assert!(matches!(err, SuburbError::DuplicateId { id: 7, .. }));
}

#[test]
fn date_only_generated_header_still_loads_every_row() {
    let json = CATALOGUE_JSON.replace("2025-03-01T10:00:00.000Z", "2025-03-01");
    let file = write_catalogue(&json);

    let catalogue = Catalogue::load(file.path()).unwrap();
    assert_eq!(catalogue.len(), 4);
    let generated = catalogue.meta().generated.unwrap();
    assert_eq!(generated.to_rfc3339(), "2025-03-01T00:00:00+00:00");
    assert_eq!(Catalogue::load_or_empty(file.path()).len(), 4);
}

#[test]
fn offset_less_generated_header_is_read_as_utc() {
    let json = CATALOGUE_JSON.replace("2025-03-01T10:00:00.000Z", "2025-03-01T10:00:00");
    let file = write_catalogue(&json);

    let catalogue = Catalogue::load_or_empty(file.path());
    assert_eq!(catalogue.len(), 4);
    let generated = catalogue.meta().generated.unwrap();
    assert_eq!(generated.to_rfc3339(), "2025-03-01T10:00:00+00:00");
}

#[test]
fn unreadable_header_fields_are_dropped_not_fatal() {
    let json = CATALOGUE_JSON
        .replace("\"2025-03-01T10:00:00.000Z\"", "\"last tuesday\"")
        .replace("{ \"lat\": -34.8517, \"lng\": 138.5829 }", "\"Kilburn\"")
        .replace("\"radiusKm\": 50", "\"radiusKm\": \"fifty\"")
        .replace("\"count\": 4", "\"count\": -1");
    let file = write_catalogue(&json);

    let catalogue = Catalogue::load(file.path()).unwrap();
    assert_eq!(catalogue.len(), 4);
    assert_eq!(catalogue.meta(), &CatalogueMeta::default());
}

#[test]
fn missing_header_fields_are_fine() {
    let file = write_catalogue(
        r#"{ "suburbs": [ { "id": 1, "name": "Kilburn", "state": "SA",
             "latitude": -34.8597, "longitude": 138.5856 } ] }"#,
    );
    let catalogue = Catalogue::load(file.path()).unwrap();
    assert_eq!(catalogue.len(), 1);
    assert!(catalogue.meta().generated.is_none());
}
