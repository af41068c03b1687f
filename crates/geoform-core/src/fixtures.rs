// crates/geoform-core/src/fixtures.rs

//! In-memory [`CatalogSource`] used by the unit tests. Records which
//! endpoints were hit and can be told to fail specific ones.

use crate::error::{GeoFormError, Result};
use crate::model::{City, Country, State};
use crate::traits::CatalogSource;
use std::collections::HashSet;
use std::sync::Mutex;

fn country(id: u32, name: &str, iso2: &str) -> Country {
    Country {
        id,
        name: name.to_string(),
        iso2: iso2.to_string(),
        iso3: None,
        phonecode: None,
        capital: None,
        currency: None,
        native: None,
        emoji: None,
    }
}

fn state(id: u32, name: &str, code: &str, country_iso2: &str) -> State {
    State {
        id,
        name: name.to_string(),
        country_id: 0,
        country_code: country_iso2.to_string(),
        iso2: Some(code.to_string()),
    }
}

fn city(id: u32, name: &str, state_code: &str, country_iso2: &str) -> City {
    City {
        id,
        name: name.to_string(),
        state_id: 0,
        state_code: Some(state_code.to_string()),
        country_id: 0,
        country_code: country_iso2.to_string(),
        latitude: None,
        longitude: None,
    }
}

pub(crate) struct FixtureSource {
    countries: Vec<Country>,
    states: Vec<State>,
    cities: Vec<City>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
}

impl FixtureSource {
    /// Two countries, three states, a handful of cities.
    pub(crate) fn us_de() -> Self {
        Self {
            countries: vec![
                country(1, "United States", "US"),
                country(2, "Germany", "DE"),
            ],
            states: vec![
                state(10, "California", "CA", "US"),
                state(11, "Texas", "TX", "US"),
                state(20, "Bavaria", "BY", "DE"),
            ],
            cities: vec![
                city(100, "Fresno", "CA", "US"),
                city(101, "Los Angeles", "CA", "US"),
                city(102, "Houston", "TX", "US"),
                city(200, "Munich", "BY", "DE"),
            ],
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    pub(crate) fn fail_endpoint(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    pub(crate) fn was_called(&self, key: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == key)
    }

    pub(crate) fn countries_snapshot(&self) -> Vec<Country> {
        self.countries.clone()
    }

    fn record(&self, key: String) -> Result<()> {
        if self.failing.lock().unwrap().contains(&key) {
            return Err(GeoFormError::ApiStatus {
                endpoint: key,
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        self.calls.lock().unwrap().push(key);
        Ok(())
    }
}

impl CatalogSource for FixtureSource {
    async fn countries(&self) -> Result<Vec<Country>> {
        self.record("countries".to_string())?;
        Ok(self.countries.clone())
    }

    async fn states(&self) -> Result<Vec<State>> {
        self.record("states".to_string())?;
        Ok(self.states.clone())
    }

    async fn states_of(&self, country_iso2: &str) -> Result<Vec<State>> {
        self.record(format!("states_of:{country_iso2}"))?;
        Ok(self
            .states
            .iter()
            .filter(|s| s.country_code.eq_ignore_ascii_case(country_iso2))
            .cloned()
            .collect())
    }

    async fn cities_of(&self, country_iso2: &str) -> Result<Vec<City>> {
        self.record(format!("cities_of:{country_iso2}"))?;
        Ok(self
            .cities
            .iter()
            .filter(|c| c.country_code.eq_ignore_ascii_case(country_iso2))
            .cloned()
            .collect())
    }

    async fn cities_of_state(&self, country_iso2: &str, state_code: &str) -> Result<Vec<City>> {
        self.record(format!("cities_of_state:{country_iso2}:{state_code}"))?;
        Ok(self
            .cities
            .iter()
            .filter(|c| {
                c.country_code.eq_ignore_ascii_case(country_iso2)
                    && c.state_code.as_deref() == Some(state_code)
            })
            .cloned()
            .collect())
    }
}
