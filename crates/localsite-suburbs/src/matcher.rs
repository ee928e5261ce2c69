//! Resolution of hand-typed suburb names against the catalogue.
//!
//! Matching is deliberately loose ("Salisbury" also finds "Salisbury North")
//! and a deterministic ordering picks one winner when a single entry is
//! wanted.

use std::cmp::Ordering;
use std::collections::HashSet;

use localsite_core::SelectionMode;

use crate::catalogue::{enrich, Catalogue};
use crate::error::SuburbError;
use crate::geo::Coordinates;
use crate::types::EnrichedSuburb;

/// How closely a catalogue name matches a search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchQuality {
    Substring,
    PrefixWord,
    Exact,
}

impl MatchQuality {
    #[must_use]
    pub fn score(self) -> u32 {
        match self {
            MatchQuality::Exact => 100,
            MatchQuality::PrefixWord => 50,
            MatchQuality::Substring => 25,
        }
    }

    #[must_use]
    pub fn of(term: &str, name: &str) -> Self {
        let term = normalize(term);
        let name = normalize(name);
        if name == term {
            MatchQuality::Exact
        } else if name.starts_with(&format!("{term} ")) {
            MatchQuality::PrefixWord
        } else {
            MatchQuality::Substring
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Whether catalogue `name` matches search `term`, case-insensitively.
///
/// Accepts an exact name, a name starting with the term, or the term as a
/// whole word in the middle or at the end. This over-matches on purpose
/// ("Pro" finds "Prospect"); a blank term matches nothing.
#[must_use]
pub fn name_matches(term: &str, name: &str) -> bool {
    let term = normalize(term);
    if term.is_empty() {
        return false;
    }
    let name = normalize(name);

    name == term
        || name.starts_with(&format!("{term} "))
        || name.starts_with(&term)
        || name.contains(&format!(" {term} "))
        || name.ends_with(&format!(" {term}"))
}

/// Name with a trailing parenthetical qualifier removed:
/// `"Prospect (SA)"` becomes `"Prospect"`.
fn base_name(name: &str) -> String {
    let trimmed = name.trim();
    let base = match trimmed.rfind(" (") {
        Some(idx) if trimmed.ends_with(')') => &trimmed[..idx],
        _ => trimmed,
    };
    normalize(base)
}

#[allow(clippy::cast_precision_loss)]
fn population_score(suburb: &EnrichedSuburb, max_population: Option<u32>) -> f64 {
    match (suburb.suburb.population(), max_population) {
        (Some(p), Some(max)) => f64::from(p) / f64::from(max),
        _ => 0.0,
    }
}

/// Ordering of two candidates for `term`; `Less` means `a` is preferred.
fn compare_candidates(
    term: &str,
    a: &EnrichedSuburb,
    b: &EnrichedSuburb,
    max_population: Option<u32>,
) -> Ordering {
    let term_key = normalize(term);

    b.suburb
        .has_population()
        .cmp(&a.suburb.has_population())
        .then_with(|| {
            population_score(b, max_population).total_cmp(&population_score(a, max_population))
        })
        .then_with(|| {
            let a_exact = base_name(a.name()) == term_key;
            let b_exact = base_name(b.name()) == term_key;
            b_exact.cmp(&a_exact)
        })
        .then_with(|| MatchQuality::of(term, b.name()).cmp(&MatchQuality::of(term, a.name())))
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        .then_with(|| a.name().cmp(b.name()))
}

/// Pick the single best candidate for `term`.
///
/// Preference order: has population data, larger population relative to
/// the other candidates, base name equal to the term, match quality,
/// nearer to the center, then alphabetical.
///
/// # Errors
///
/// Returns [`SuburbError::EmptyCandidates`] if `candidates` is empty. Callers
/// filter out unmatched terms before resolving, so this indicates a bug.
pub fn select_best_match<'a>(
    term: &str,
    candidates: &'a [EnrichedSuburb],
) -> Result<&'a EnrichedSuburb, SuburbError> {
    let max_population = candidates
        .iter()
        .filter_map(|c| c.suburb.population())
        .max();

    candidates
        .iter()
        .min_by(|a, b| compare_candidates(term, a, b, max_population))
        .ok_or(SuburbError::EmptyCandidates)
}

/// Resolve a curated list of suburb names into catalogue entries.
///
/// Each term contributes its best match (`BestMatch`) or every match
/// (`AllVariations`). Results keep term order and each suburb id appears
/// once, at its first occurrence. Unmatched and blank terms are skipped
/// with a warning.
///
/// # Errors
///
/// Propagates [`SuburbError::EmptyCandidates`] from [`select_best_match`],
/// which cannot happen for terms that matched.
pub fn process_featured_suburbs<S: AsRef<str>>(
    terms: &[S],
    catalogue: &Catalogue,
    center: Coordinates,
    mode: SelectionMode,
) -> Result<Vec<EnrichedSuburb>, SuburbError> {
    let mut seen: HashSet<u32> = HashSet::new();
    let mut resolved: Vec<EnrichedSuburb> = Vec::new();

    for term in terms {
        let term = term.as_ref();
        if term.trim().is_empty() {
            tracing::warn!("skipping blank featured suburb name");
            continue;
        }

        let candidates: Vec<EnrichedSuburb> = catalogue
            .matches_for(term)
            .into_iter()
            .map(|s| enrich(s, center))
            .collect();

        if candidates.is_empty() {
            let err = SuburbError::NoMatch {
                term: term.to_string(),
            };
            tracing::warn!(error = %err, "featured suburb skipped");
            continue;
        }

        match mode {
            SelectionMode::BestMatch => {
                let best = select_best_match(term, &candidates)?;
                if candidates.len() > 1 {
                    tracing::debug!(
                        term,
                        chosen = best.name(),
                        candidates = candidates.len(),
                        "resolved ambiguous featured suburb"
                    );
                }
                if seen.insert(best.id()) {
                    resolved.push(best.clone());
                }
            }
            SelectionMode::AllVariations => {
                for candidate in candidates {
                    if seen.insert(candidate.id()) {
                        resolved.push(candidate);
                    }
                }
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
