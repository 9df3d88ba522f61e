//! Fuzzy matching of circuit descriptions to catalog features
//!
//! Matching is first-match-wins over catalog order: there is no scoring pass, so when
//! several entries plausibly match, the earliest one in the catalog decides the outcome.

use crate::catalog::GeographicFeature;
use serde::{Deserialize, Serialize};

/// Descriptive fields identifying the circuit to resolve
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitQuery {
    /// Human-readable circuit name; may carry sponsor names or differ in
    /// punctuation and casing from the catalog entry
    pub name: Option<String>,
    /// City/locality name
    pub location: Option<String>,
    /// Country name; part of the query contract but not used for matching
    pub country: Option<String>,
}

impl CircuitQuery {
    /// Build a query from name and location
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        CircuitQuery {
            name: Some(name.into()),
            location: Some(location.into()),
            country: None,
        }
    }
}

/// Reduce a string to a compact comparable token: lowercase ASCII alphanumerics only.
///
/// Accented characters are not decomposed; being non-ASCII they are simply dropped,
/// so "Autódromo" becomes "autdromo".
pub fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Find the first catalog feature matching the query.
///
/// A feature matches when the normalized names are both non-empty and one is a
/// substring of the other (either direction), or the normalized locations are both
/// non-empty and exactly equal. Absent or empty query fields cannot satisfy either
/// condition and fall through to `None`; this never fails.
pub fn find_feature<'a>(
    query: &CircuitQuery,
    catalog: &'a [GeographicFeature],
) -> Option<&'a GeographicFeature> {
    let query_name = normalize(query.name.as_deref().unwrap_or(""));
    let query_location = normalize(query.location.as_deref().unwrap_or(""));
    if query_name.is_empty() && query_location.is_empty() {
        return None;
    }

    catalog.iter().find(|feature| {
        let name = normalize(&feature.name);
        let location = normalize(&feature.location);

        let name_match = !name.is_empty()
            && !query_name.is_empty()
            && (name.contains(&query_name) || query_name.contains(&name));
        let location_match =
            !location.is_empty() && !query_location.is_empty() && location == query_location;

        name_match || location_match
    })
}
