// crates/geoform-core/src/model.rs
use crate::text::parse_opt_f64;
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};

/// A country entry from the reference API.
///
/// Read-only reference data; keyed by the (unique) ISO2 code. Field names
/// mirror the wire format so the structs deserialize straight from the API
/// payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: u32,
    pub name: String,
    pub iso2: String,
    #[serde(default)]
    pub iso3: Option<String>,
    #[serde(default)]
    pub phonecode: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// A state/region entry.
///
/// Keyed by (country code, state code). The global `/states` listing and the
/// country-scoped listing both decode into this shape; `country_id` and
/// `country_code` default when an endpoint omits them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub country_id: u32,
    #[serde(default)]
    pub country_code: String,
    /// Two-letter state code, e.g. "CA" or "BY" (Bavaria). Not every region
    /// has one.
    #[serde(default)]
    pub iso2: Option<String>,
}

impl State {
    pub fn state_code(&self) -> Option<&str> {
        self.iso2.as_deref()
    }
}

/// A city entry.
///
/// City ids are only unique within their (country, state) scope. Some API
/// responses attach a city directly to a country with no state context, so
/// the state fields default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub state_id: u32,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub country_id: u32,
    #[serde(default)]
    pub country_code: String,
    /// Coordinates arrive as strings on the wire; use [`City::latitude`] and
    /// [`City::longitude`] for parsed values.
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

impl City {
    pub fn latitude(&self) -> Option<f64> {
        parse_opt_f64(&self.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        parse_opt_f64(&self.longitude)
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for State {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for City {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// Counts of the currently loaded/offered catalog data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CatalogStats {
    pub countries: usize,
    pub states: usize,
    pub cities: usize,
}
