//! Footer and location-page link lists for one generation run.
//!
//! A [`FooterLocationService`] is built once per run from the loaded
//! catalogue and business config. The footer list is computed on first use
//! and reused for every page rendered afterwards.

use std::cell::OnceCell;
use std::collections::HashSet;

use localsite_core::BusinessConfig;

use crate::catalogue::Catalogue;
use crate::error::SuburbError;
use crate::geo::Coordinates;
use crate::geocode::{Geocoder, StaticGeocoder};
use crate::matcher::process_featured_suburbs;
use crate::selector::select;
use crate::types::{EnrichedSuburb, FooterLocationEntry};

/// Number of suburb links shown in the site footer.
pub const FOOTER_COUNT: usize = 11;

/// URL path segment for a suburb name.
///
/// ASCII letters and digits are kept in lower case, runs of whitespace and
/// hyphens become a single `-`, and everything else is dropped:
/// `"O'Halloran  Hill"` becomes `"ohalloran-hill"`.
#[must_use]
pub fn location_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut separator = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if separator && !slug.is_empty() {
                slug.push('-');
            }
            separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            separator = true;
        }
    }
    slug
}

/// Builds suburb link lists from one catalogue and business config.
pub struct FooterLocationService<'a, G = StaticGeocoder> {
    catalogue: &'a Catalogue,
    config: &'a BusinessConfig,
    geocoder: G,
    footer_count: usize,
    footer: OnceCell<Vec<FooterLocationEntry>>,
}

impl<'a> FooterLocationService<'a, StaticGeocoder> {
    #[must_use]
    pub fn new(catalogue: &'a Catalogue, config: &'a BusinessConfig) -> Self {
        Self {
            catalogue,
            config,
            geocoder: StaticGeocoder,
            footer_count: FOOTER_COUNT,
            footer: OnceCell::new(),
        }
    }
}

impl<'a, G: Geocoder> FooterLocationService<'a, G> {
    /// Use `geocoder` to resolve the business address when no center is
    /// configured.
    #[must_use]
    pub fn with_geocoder<H: Geocoder>(self, geocoder: H) -> FooterLocationService<'a, H> {
        FooterLocationService {
            catalogue: self.catalogue,
            config: self.config,
            geocoder,
            footer_count: self.footer_count,
            footer: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn with_footer_count(mut self, footer_count: usize) -> Self {
        self.footer_count = footer_count;
        self.footer = OnceCell::new();
        self
    }

    /// Business center: the configured coordinates, else the geocoded address.
    ///
    /// # Errors
    ///
    /// Returns the geocoder's error when no center is configured and the
    /// address cannot be resolved.
    pub fn center(&self) -> Result<Coordinates, SuburbError> {
        if let Some((lat, lng)) = self.config.service.center() {
            return Ok(Coordinates::new(lat, lng));
        }
        self.geocoder.geocode(&self.config.address.one_line())
    }

    /// The footer list, computed once and cached for the life of the service.
    ///
    /// Never fails: any error is logged and yields an empty list, which is
    /// then cached like any other result.
    #[must_use]
    pub fn footer_locations(&self) -> &[FooterLocationEntry] {
        self.footer.get_or_init(|| match self.try_footer_locations() {
            Ok(entries) => {
                tracing::info!(count = entries.len(), "footer locations ready");
                entries
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to build footer locations; rendering none");
                Vec::new()
            }
        })
    }

    /// Compute the footer list without caching or error recovery.
    ///
    /// With featured suburbs configured, those are resolved first (in
    /// config order, kept even when outside the service radius) and padded
    /// by smart selection when `auto_supplement` is on. Otherwise smart
    /// selection picks the whole list from suburbs inside the radius.
    ///
    /// # Errors
    ///
    /// Returns an error when the center cannot be resolved.
    pub fn try_footer_locations(&self) -> Result<Vec<FooterLocationEntry>, SuburbError> {
        if self.catalogue.is_empty() {
            tracing::warn!("suburb catalogue is empty; no footer locations");
            return Ok(Vec::new());
        }

        let center = self.center()?;
        let pages = &self.config.location_pages;

        let suburbs = match pages.featured_suburbs() {
            Some(names) => {
                let mut chosen = self.featured_selection(names, center)?;
                if let Some(limit) = pages.effective_limit() {
                    chosen.truncate(limit);
                }
                chosen
            }
            None => self.smart_selection(center),
        };

        Ok(suburbs.into_iter().map(|s| self.entry(s)).collect())
    }

    fn featured_selection(
        &self,
        names: &[String],
        center: Coordinates,
    ) -> Result<Vec<EnrichedSuburb>, SuburbError> {
        let pages = &self.config.location_pages;
        let radius_km = self.config.service.radius_km;
        tracing::info!(
            featured = names.len(),
            mode = %pages.suburb_selection_mode,
            "using featured footer suburbs"
        );

        let mut chosen =
            process_featured_suburbs(names, self.catalogue, center, pages.suburb_selection_mode)?;

        for outside in chosen.iter().filter(|s| s.distance_km > radius_km) {
            tracing::warn!(
                name = outside.name(),
                distance_km = outside.distance_km,
                radius_km,
                "featured suburb is outside the service radius"
            );
        }

        if pages.auto_supplement && chosen.len() < self.footer_count {
            let taken: HashSet<u32> = chosen.iter().map(EnrichedSuburb::id).collect();
            let pool: Vec<EnrichedSuburb> = self
                .catalogue
                .within_radius(center, radius_km)
                .into_iter()
                .filter(|s| !taken.contains(&s.id()))
                .collect();
            let extra = select(&pool, self.footer_count - chosen.len(), Some(center));
            tracing::debug!(
                featured = chosen.len(),
                supplemented = extra.len(),
                "padded featured suburbs with smart selection"
            );
            chosen.extend(extra);
        }

        Ok(chosen)
    }

    fn smart_selection(&self, center: Coordinates) -> Vec<EnrichedSuburb> {
        let radius_km = self.config.service.radius_km;
        let pool = self.catalogue.within_radius(center, radius_km);
        if pool.is_empty() {
            tracing::warn!(radius_km, "no suburbs inside the service radius");
            return Vec::new();
        }
        tracing::info!(candidates = pool.len(), "using smart selection for footer suburbs");
        select(&pool, self.footer_count, Some(center))
    }

    /// Every suburb inside the service radius, nearest first, capped at
    /// `max_location_pages` when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the center cannot be resolved.
    pub fn service_area_locations(&self) -> Result<Vec<FooterLocationEntry>, SuburbError> {
        if self.catalogue.is_empty() {
            return Ok(Vec::new());
        }
        let center = self.center()?;
        let mut suburbs = self
            .catalogue
            .within_radius(center, self.config.service.radius_km);
        if let Some(max) = self.config.service.max_location_pages {
            suburbs.truncate(max);
        }
        Ok(suburbs.into_iter().map(|s| self.entry(s)).collect())
    }

    /// The `limit` suburbs nearest to `suburb_id`, excluding itself.
    /// Distances are measured from that suburb.
    ///
    /// # Errors
    ///
    /// Returns [`SuburbError::UnknownSuburb`] when the id is not in the catalogue.
    pub fn related_locations(
        &self,
        suburb_id: u32,
        limit: usize,
    ) -> Result<Vec<FooterLocationEntry>, SuburbError> {
        let origin = self
            .catalogue
            .by_id(suburb_id)
            .ok_or(SuburbError::UnknownSuburb(suburb_id))?;
        Ok(self
            .catalogue
            .nearest(origin.coordinates(), limit, Some(suburb_id))
            .into_iter()
            .map(|s| self.entry(s))
            .collect())
    }

    fn entry(&self, suburb: EnrichedSuburb) -> FooterLocationEntry {
        let slug = location_slug(suburb.name());
        let prefix = self.config.location_pages.url_prefix.trim_end_matches('/');
        let url = format!("{prefix}/{slug}");
        FooterLocationEntry { suburb, slug, url }
    }
}

#[cfg(test)]
#[path = "footer_test.rs"]
mod tests;
