//! Static geography tables for invoice address resolution.
//!
//! Invoice drafts carry ISO country codes and state/province codes; the
//! assembled document wants canonical names (`"US"` → `"United States"`,
//! `("US", "CA")` → `"California"`). Lookups fail closed: a present but
//! unknown code is an [`UnknownLocale`] error, never passed through.
//!
//! The tables cover common invoicing jurisdictions. Subdivisions are keyed
//! by `(country code, state code)`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A country with its ISO 3166-1 alpha-2 code and canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryInfo {
    /// ISO 3166-1 alpha-2 code (e.g. `"US"`).
    pub code: &'static str,
    /// Canonical country name (e.g. `"United States"`).
    pub name: &'static str,
}

/// A state or province with its country, subdivision code, and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    /// ISO 3166-1 alpha-2 code of the owning country.
    pub country: &'static str,
    /// Subdivision code (e.g. `"CA"` for California).
    pub code: &'static str,
    /// Canonical subdivision name.
    pub name: &'static str,
}

/// Known countries.
pub static COUNTRIES: &[CountryInfo] = &[
    CountryInfo { code: "AE", name: "United Arab Emirates" },
    CountryInfo { code: "AU", name: "Australia" },
    CountryInfo { code: "BR", name: "Brazil" },
    CountryInfo { code: "CA", name: "Canada" },
    CountryInfo { code: "CH", name: "Switzerland" },
    CountryInfo { code: "DE", name: "Germany" },
    CountryInfo { code: "ES", name: "Spain" },
    CountryInfo { code: "FR", name: "France" },
    CountryInfo { code: "GB", name: "United Kingdom" },
    CountryInfo { code: "IN", name: "India" },
    CountryInfo { code: "IT", name: "Italy" },
    CountryInfo { code: "JP", name: "Japan" },
    CountryInfo { code: "MX", name: "Mexico" },
    CountryInfo { code: "NL", name: "Netherlands" },
    CountryInfo { code: "PT", name: "Portugal" },
    CountryInfo { code: "SG", name: "Singapore" },
    CountryInfo { code: "US", name: "United States" },
];

/// Known states and provinces, keyed by owning country.
pub static STATES: &[StateInfo] = &[
    // United States
    StateInfo { country: "US", code: "CA", name: "California" },
    StateInfo { country: "US", code: "CO", name: "Colorado" },
    StateInfo { country: "US", code: "FL", name: "Florida" },
    StateInfo { country: "US", code: "GA", name: "Georgia" },
    StateInfo { country: "US", code: "IL", name: "Illinois" },
    StateInfo { country: "US", code: "MA", name: "Massachusetts" },
    StateInfo { country: "US", code: "NJ", name: "New Jersey" },
    StateInfo { country: "US", code: "NY", name: "New York" },
    StateInfo { country: "US", code: "TX", name: "Texas" },
    StateInfo { country: "US", code: "WA", name: "Washington" },
    // Canada
    StateInfo { country: "CA", code: "AB", name: "Alberta" },
    StateInfo { country: "CA", code: "BC", name: "British Columbia" },
    StateInfo { country: "CA", code: "ON", name: "Ontario" },
    StateInfo { country: "CA", code: "QC", name: "Quebec" },
    // Australia
    StateInfo { country: "AU", code: "NSW", name: "New South Wales" },
    StateInfo { country: "AU", code: "QLD", name: "Queensland" },
    StateInfo { country: "AU", code: "VIC", name: "Victoria" },
    // Germany
    StateInfo { country: "DE", code: "BE", name: "Berlin" },
    StateInfo { country: "DE", code: "BY", name: "Bavaria" },
    StateInfo { country: "DE", code: "HE", name: "Hesse" },
    StateInfo { country: "DE", code: "NW", name: "North Rhine-Westphalia" },
    // India
    StateInfo { country: "IN", code: "DL", name: "Delhi" },
    StateInfo { country: "IN", code: "KA", name: "Karnataka" },
    StateInfo { country: "IN", code: "MH", name: "Maharashtra" },
    StateInfo { country: "IN", code: "TN", name: "Tamil Nadu" },
    // Brazil
    StateInfo { country: "BR", code: "RJ", name: "Rio de Janeiro" },
    StateInfo { country: "BR", code: "SP", name: "São Paulo" },
];

static COUNTRY_BY_CODE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COUNTRIES.iter().map(|c| (c.code, c.name)).collect());

static STATE_BY_CODE: LazyLock<HashMap<(&'static str, &'static str), &'static str>> =
    LazyLock::new(|| STATES.iter().map(|s| ((s.country, s.code), s.name)).collect());

/// A non-empty country or state code that is not in the geography tables.
///
/// Raised during final assembly; partial or garbage locale data must not
/// silently pass through into the payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownLocale {
    /// The country code did not resolve.
    #[error("Unknown country code {0:?}")]
    Country(String),
    /// The state code did not resolve within the given country.
    #[error("Unknown state code {state:?} for country {country:?}")]
    State {
        /// The country code the state was looked up under.
        country: String,
        /// The unresolvable state code.
        state: String,
    },
}

/// Resolves an ISO country code to its canonical name.
///
/// # Example
///
/// ```
/// use rnf_types::geo::resolve_country;
///
/// assert_eq!(resolve_country("US").unwrap(), "United States");
/// assert!(resolve_country("ZZ").is_err());
/// ```
pub fn resolve_country(code: &str) -> Result<&'static str, UnknownLocale> {
    COUNTRY_BY_CODE
        .get(code)
        .copied()
        .ok_or_else(|| UnknownLocale::Country(code.to_string()))
}

/// Resolves a `(country code, state code)` pair to the canonical state name.
pub fn resolve_state(country_code: &str, state_code: &str) -> Result<&'static str, UnknownLocale> {
    STATE_BY_CODE
        .get(&(country_code, state_code))
        .copied()
        .ok_or_else(|| UnknownLocale::State {
            country: country_code.to_string(),
            state: state_code.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_country() {
        assert_eq!(resolve_country("DE").unwrap(), "Germany");
        assert_eq!(resolve_country("SG").unwrap(), "Singapore");
        assert_eq!(
            resolve_country("ZZ"),
            Err(UnknownLocale::Country("ZZ".into()))
        );
    }

    #[test]
    fn test_resolve_state_is_scoped_to_country() {
        assert_eq!(resolve_state("US", "CA").unwrap(), "California");
        assert_eq!(resolve_state("CA", "ON").unwrap(), "Ontario");
        // "ON" is an Ontario code, not a US state.
        assert!(resolve_state("US", "ON").is_err());
    }

    #[test]
    fn test_unknown_state_reports_both_codes() {
        let err = resolve_state("DE", "XX").unwrap_err();
        assert_eq!(
            err,
            UnknownLocale::State {
                country: "DE".into(),
                state: "XX".into()
            }
        );
    }
}
