use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Path prefix used for suburb page URLs when none is configured.
pub const DEFAULT_URL_PREFIX: &str = "/locations";

/// How a manually featured suburb name is expanded against the catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Keep only the single best candidate per name.
    #[default]
    BestMatch,
    /// Keep every catalogue entry the name matches.
    AllVariations,
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionMode::BestMatch => write!(f, "best_match"),
            SelectionMode::AllVariations => write!(f, "all_variations"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub name: String,
    pub tagline: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressConfig {
    pub street: Option<String>,
    pub city: String,
    pub state: String,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

impl AddressConfig {
    /// Single-line address as it would be handed to a geocoder.
    #[must_use]
    pub fn one_line(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(street) = self.street.as_deref().filter(|s| !s.trim().is_empty()) {
            parts.push(street);
        }
        parts.push(&self.city);
        parts.push(&self.state);
        if let Some(postcode) = self.postcode.as_deref().filter(|s| !s.trim().is_empty()) {
            parts.push(postcode);
        }
        if let Some(country) = self.country.as_deref().filter(|s| !s.trim().is_empty()) {
            parts.push(country);
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub main_category: Option<String>,
    pub main_location: Option<String>,
    pub radius_km: f64,
    pub max_location_pages: Option<usize>,
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
}

impl ServiceConfig {
    /// Configured business center, when both coordinates are present.
    #[must_use]
    pub fn center(&self) -> Option<(f64, f64)> {
        self.center_lat.zip(self.center_lng)
    }
}

/// Options that drive the footer and service-area suburb lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationPagesConfig {
    pub footer_featured_suburbs: Option<Vec<String>>,
    pub suburb_selection_mode: SelectionMode,
    pub suburb_limit: Option<usize>,
    pub auto_supplement: bool,
    pub url_prefix: String,
}

impl Default for LocationPagesConfig {
    fn default() -> Self {
        Self {
            footer_featured_suburbs: None,
            suburb_selection_mode: SelectionMode::BestMatch,
            suburb_limit: None,
            auto_supplement: true,
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
        }
    }
}

impl LocationPagesConfig {
    /// Manually curated suburb names, or `None` when the list is absent or empty.
    #[must_use]
    pub fn featured_suburbs(&self) -> Option<&[String]> {
        self.footer_featured_suburbs
            .as_deref()
            .filter(|names| !names.is_empty())
    }

    /// Hard output cap. Zero means unlimited.
    #[must_use]
    pub fn effective_limit(&self) -> Option<usize> {
        self.suburb_limit.filter(|&limit| limit > 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    pub business: BusinessInfo,
    pub address: AddressConfig,
    pub service: ServiceConfig,
    #[serde(default)]
    pub location_pages: LocationPagesConfig,
}

/// Load and validate the business configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_business_config(path: &Path) -> Result<BusinessConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BusinessFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_business_config(&content)
}

/// Parse and validate business configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_business_config(content: &str) -> Result<BusinessConfig, ConfigError> {
    let config: BusinessConfig = serde_yaml::from_str(content)?;
    validate_business(&config)?;
    Ok(config)
}

fn validate_business(config: &BusinessConfig) -> Result<(), ConfigError> {
    if config.business.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "business name must be non-empty".to_string(),
        ));
    }

    let radius = config.service.radius_km;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "service radius_km must be a positive number, got {radius}"
        )));
    }

    match (config.service.center_lat, config.service.center_lng) {
        (Some(lat), Some(lng)) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ConfigError::Validation(format!(
                    "center_lat {lat} is outside -90..=90"
                )));
            }
            if !(-180.0..=180.0).contains(&lng) {
                return Err(ConfigError::Validation(format!(
                    "center_lng {lng} is outside -180..=180"
                )));
            }
        }
        (None, None) => {}
        _ => {
            return Err(ConfigError::Validation(
                "center_lat and center_lng must be set together".to_string(),
            ));
        }
    }

    if !config.location_pages.url_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "location_pages.url_prefix '{}' must start with '/'",
            config.location_pages.url_prefix
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "business_test.rs"]
mod tests;
