//! Command handlers for the suburb link lists.
//!
//! These are called from `main` once config is loaded. Every handler prints
//! pretty JSON on stdout; logs go to stderr so the output can be piped.

use anyhow::Context;
use localsite_core::{AppConfig, BusinessConfig};
use localsite_suburbs::catalogue::enrich;
use localsite_suburbs::{
    select_best_match, Catalogue, Coordinates, EnrichedSuburb, FooterLocationService, SuburbError,
};
use serde::Serialize;

/// Everything one generation run reads from disk.
pub(crate) struct SiteData {
    pub(crate) app: AppConfig,
    pub(crate) business: BusinessConfig,
    pub(crate) catalogue: Catalogue,
}

impl SiteData {
    /// Load the business config strictly and the catalogue softly: a bad
    /// business file stops the run, a missing catalogue only empties lists.
    pub(crate) fn load(app: AppConfig) -> anyhow::Result<Self> {
        let business = localsite_core::load_business_config(&app.business_path)
            .with_context(|| {
                format!(
                    "failed to load business config from {}",
                    app.business_path.display()
                )
            })?;
        let catalogue = Catalogue::load_or_empty(&app.suburbs_path);
        Ok(Self {
            app,
            business,
            catalogue,
        })
    }

    fn service(&self) -> FooterLocationService<'_> {
        FooterLocationService::new(&self.catalogue, &self.business)
            .with_footer_count(self.app.footer_count)
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn run_footer(site: &SiteData) -> anyhow::Result<()> {
    let service = site.service();
    print_json(service.footer_locations())
}

pub(crate) fn run_areas(site: &SiteData) -> anyhow::Result<()> {
    let areas = site.service().service_area_locations()?;
    tracing::info!(count = areas.len(), "service area suburbs");
    print_json(&areas)
}

pub(crate) fn run_related(site: &SiteData, name: &str, limit: usize) -> anyhow::Result<()> {
    let service = site.service();
    let origin = resolve_suburb(site, &service, name)?;
    tracing::info!(
        term = name,
        suburb = origin.name(),
        id = origin.id(),
        "listing related suburbs"
    );
    let related = service.related_locations(origin.id(), limit)?;
    print_json(&related)
}

/// Best catalogue match for a typed suburb name.
///
/// Distance from the business center only breaks ties, so without a
/// resolvable center every candidate sits at distance 0 and ties fall
/// through to name order.
fn resolve_suburb(
    site: &SiteData,
    service: &FooterLocationService<'_>,
    name: &str,
) -> anyhow::Result<EnrichedSuburb> {
    let center = match service.center() {
        Ok(center) => Some(center),
        Err(e) => {
            tracing::debug!(error = %e, "no business center; matching without distance");
            None
        }
    };
    let candidates: Vec<EnrichedSuburb> = site
        .catalogue
        .matches_for(name)
        .into_iter()
        .map(|s| enrich(s, center.unwrap_or_else(|| s.coordinates())))
        .collect();
    if candidates.is_empty() {
        return Err(SuburbError::NoMatch {
            term: name.to_string(),
        }
        .into());
    }
    Ok(select_best_match(name, &candidates)?.clone())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckSummary<'a> {
    environment: String,
    business: &'a str,
    business_path: String,
    suburbs_path: String,
    suburbs: usize,
    catalogue_generated: Option<String>,
    catalogue_count: Option<usize>,
    center: Option<Coordinates>,
    center_error: Option<String>,
    radius_km: f64,
    featured_suburbs: usize,
    selection_mode: String,
    footer_count: usize,
    footer_entries: usize,
}

fn check_summary(site: &SiteData) -> CheckSummary<'_> {
    let service = site.service();
    let meta = site.catalogue.meta();
    if let Some(declared) = meta.count.filter(|&n| n != site.catalogue.len()) {
        tracing::warn!(
            declared,
            loaded = site.catalogue.len(),
            "catalogue header count does not match its rows"
        );
    }

    let (center, center_error) = match service.center() {
        Ok(c) => (Some(c), None),
        Err(e) => (None, Some(e.to_string())),
    };
    let pages = &site.business.location_pages;

    CheckSummary {
        environment: site.app.env.to_string(),
        business: &site.business.business.name,
        business_path: site.app.business_path.display().to_string(),
        suburbs_path: site.app.suburbs_path.display().to_string(),
        suburbs: site.catalogue.len(),
        catalogue_generated: meta.generated.map(|g| g.to_rfc3339()),
        catalogue_count: meta.count,
        center,
        center_error,
        radius_km: site.business.service.radius_km,
        featured_suburbs: pages.featured_suburbs().map_or(0, <[String]>::len),
        selection_mode: pages.suburb_selection_mode.to_string(),
        footer_count: site.app.footer_count,
        footer_entries: service.footer_locations().len(),
    }
}

pub(crate) fn run_check(site: &SiteData) -> anyhow::Result<()> {
    print_json(&check_summary(site))
}

#[cfg(test)]
#[path = "locations_test.rs"]
mod tests;
