// crates/geoform-core/src/loader.rs

//! # Reference Data Loader
//!
//! Pulls the full country and state catalogs once at startup. The two
//! fetches run concurrently and are *joined*: neither result is used until
//! both have completed, and a failure of either surfaces as a typed error
//! instead of leaving the form silently empty.

use crate::error::Result;
use crate::model::{Country, State};
use crate::traits::{CatalogSource, NameMatch};
use tracing::info;

/// The session-lifetime reference catalogs.
///
/// Loaded once and then owned by the form for the rest of the session. The
/// state list kept here is the global "all states" baseline the cascade
/// falls back to whenever no country is resolved.
#[derive(Debug, Clone)]
pub struct Catalogs {
    countries: Vec<Country>,
    all_states: Vec<State>,
}

impl Catalogs {
    /// Fetch both catalogs from the source, joined.
    pub async fn load<S: CatalogSource>(source: &S) -> Result<Self> {
        let (countries, all_states) = tokio::try_join!(source.countries(), source.states())?;
        info!(
            countries = countries.len(),
            states = all_states.len(),
            "reference catalogs loaded"
        );
        Ok(Self {
            countries,
            all_states,
        })
    }

    /// Build catalogs from already-materialized lists.
    pub fn from_parts(countries: Vec<Country>, all_states: Vec<State>) -> Self {
        Self {
            countries,
            all_states,
        }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// The global state baseline (states of every country).
    pub fn all_states(&self) -> &[State] {
        &self.all_states
    }

    /// Resolve typed text to a country by exact display-name equality.
    ///
    /// This is the resolution step of the cascade: the text either names a
    /// country exactly as displayed, or it resolves to nothing.
    pub fn find_country_by_name(&self, typed: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.is_exactly(typed))
    }

    /// Find a country by ISO2 code, case-insensitive (e.g. "DE", "us").
    pub fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.iso2.eq_ignore_ascii_case(iso2))
    }
}
