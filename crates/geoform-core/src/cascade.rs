// crates/geoform-core/src/cascade.rs

//! # Cascade Controller
//!
//! A finite-state machine over the (country-text, state-text, city-text)
//! triple, with one transition function per field.
//!
//! [`CascadeState`] is pure: editing a field updates the texts and bindings
//! synchronously and returns the *scoped fetches* the edit requires as
//! [`FetchPlan`] values, each carrying a [`Ticket`] from a per-field
//! monotonically increasing sequence. Completed fetches come back through
//! [`CascadeState::apply`], which drops any response whose ticket is no
//! longer the latest issued for its field — overlapping in-flight requests
//! therefore cannot let a stale response overwrite a newer candidate set.
//!
//! [`CascadeForm`] is the async driver that runs plans against a
//! [`CatalogSource`]. A failed scoped fetch propagates the typed error and
//! leaves the previous candidate sets untouched.

use crate::error::Result;
use crate::loader::Catalogs;
use crate::model::{CatalogStats, City, Country, State};
use crate::suggest::filter_candidates;
use crate::traits::{CatalogSource, NameMatch};
use tracing::debug;

/// Opaque per-field request sequence ticket. Latest issued wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic request sequence for one dependent candidate list.
#[derive(Debug, Default)]
pub struct RequestSeq {
    issued: u64,
}

impl RequestSeq {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}

/// A scoped fetch a transition decided is needed, keyed by entity codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchPlan {
    /// `GET /countries/{iso2}/states`
    StatesOfCountry { iso2: String, ticket: Ticket },
    /// `GET /countries/{iso2}/cities`
    CitiesOfCountry { iso2: String, ticket: Ticket },
    /// `GET /countries/{iso2}/states/{state_code}/cities`
    CitiesOfCountryState {
        iso2: String,
        state_code: String,
        ticket: Ticket,
    },
}

impl FetchPlan {
    pub fn ticket(&self) -> Ticket {
        match self {
            FetchPlan::StatesOfCountry { ticket, .. }
            | FetchPlan::CitiesOfCountry { ticket, .. }
            | FetchPlan::CitiesOfCountryState { ticket, .. } => *ticket,
        }
    }
}

/// The result of a completed scoped fetch, ready to be applied.
#[derive(Clone, Debug)]
pub enum FetchOutcome {
    States { ticket: Ticket, states: Vec<State> },
    Cities { ticket: Ticket, cities: Vec<City> },
}

/// Pure cascade state: field texts, candidate sets, bindings, sequences.
///
/// The country candidate set is the loaded catalog and never changes. The
/// state candidate set starts as the global baseline and is narrowed per
/// country. The city candidate set is `None` until a country resolves —
/// "no data" is deliberately distinguishable from "no matches".
#[derive(Debug)]
pub struct CascadeState {
    catalogs: Catalogs,
    country_text: String,
    state_text: String,
    city_text: String,
    /// ISO2 of the currently resolved country. The binding is the code; the
    /// typed display name is only how the user reached it.
    selected_country: Option<String>,
    /// State code of the currently resolved state under `selected_country`.
    selected_state: Option<String>,
    state_candidates: Vec<State>,
    city_candidates: Option<Vec<City>>,
    state_seq: RequestSeq,
    city_seq: RequestSeq,
}

impl CascadeState {
    pub fn new(catalogs: Catalogs) -> Self {
        let state_candidates = catalogs.all_states().to_vec();
        Self {
            catalogs,
            country_text: String::new(),
            state_text: String::new(),
            city_text: String::new(),
            selected_country: None,
            selected_state: None,
            state_candidates,
            city_candidates: None,
            state_seq: RequestSeq::default(),
            city_seq: RequestSeq::default(),
        }
    }

    /// Transition: the country field changed.
    ///
    /// On an exact display-name match the country is bound by code and both
    /// dependent lists get a planned scoped fetch. On no match the state
    /// candidates reset to the global baseline and the city candidates are
    /// cleared to "no data" — no city suggestion is valid without a resolved
    /// country.
    pub fn edit_country(&mut self, text: impl Into<String>) -> Vec<FetchPlan> {
        self.country_text = text.into();
        match self.catalogs.find_country_by_name(&self.country_text) {
            Some(country) => {
                let iso2 = country.iso2.clone();
                self.selected_country = Some(iso2.clone());
                self.selected_state = None;
                vec![
                    FetchPlan::StatesOfCountry {
                        iso2: iso2.clone(),
                        ticket: self.state_seq.issue(),
                    },
                    FetchPlan::CitiesOfCountry {
                        iso2,
                        ticket: self.city_seq.issue(),
                    },
                ]
            }
            None => {
                self.selected_country = None;
                self.selected_state = None;
                self.state_candidates = self.catalogs.all_states().to_vec();
                self.city_candidates = None;
                // Invalidate anything still in flight for both lists.
                self.state_seq.issue();
                self.city_seq.issue();
                Vec::new()
            }
        }
    }

    /// Transition: the state field changed.
    ///
    /// The country is re-resolved from the *current* country text on every
    /// state edit, never cached from a prior transition, so out-of-order
    /// field edits can never act on a stale country.
    pub fn edit_state(&mut self, text: impl Into<String>) -> Vec<FetchPlan> {
        self.state_text = text.into();

        let Some(country) = self.catalogs.find_country_by_name(&self.country_text) else {
            self.selected_country = None;
            self.selected_state = None;
            self.city_candidates = None;
            self.city_seq.issue();
            return Vec::new();
        };
        let iso2 = country.iso2.clone();
        self.selected_country = Some(iso2.clone());

        // A match must be a state offered for this country. Country-scoped
        // listings omit `country_code` on the wire, so an empty code counts
        // as belonging to the scoping country. A state that carries no
        // state code cannot scope a fetch and falls back to the
        // country-wide list.
        let matched_code = self
            .state_candidates
            .iter()
            .find(|s| {
                s.is_exactly(&self.state_text)
                    && (s.country_code.is_empty() || s.country_code.eq_ignore_ascii_case(&iso2))
            })
            .and_then(|s| s.state_code().map(str::to_owned));

        match matched_code {
            Some(state_code) => {
                self.selected_state = Some(state_code.clone());
                vec![FetchPlan::CitiesOfCountryState {
                    iso2,
                    state_code,
                    ticket: self.city_seq.issue(),
                }]
            }
            None => {
                self.selected_state = None;
                vec![FetchPlan::CitiesOfCountry {
                    iso2,
                    ticket: self.city_seq.issue(),
                }]
            }
        }
    }

    /// Transition: the city field changed. No cascade effect; the text only
    /// feeds the city suggestion filter.
    pub fn edit_city(&mut self, text: impl Into<String>) {
        self.city_text = text.into();
    }

    /// Programmatic, identifier-based selection of a country.
    ///
    /// Fills the country field with the canonical display name and runs the
    /// usual transition. Returns `None` for an unknown code.
    pub fn select_country_by_code(&mut self, iso2: &str) -> Option<Vec<FetchPlan>> {
        let name = self.catalogs.find_country_by_iso2(iso2)?.name.clone();
        Some(self.edit_country(name))
    }

    /// Apply a completed fetch if its ticket is still the latest issued for
    /// that field. Returns whether the candidate set was replaced.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::States { ticket, states } => {
                if !self.state_seq.is_current(ticket) {
                    debug!("stale state response ignored");
                    return false;
                }
                self.state_candidates = states;
                true
            }
            FetchOutcome::Cities { ticket, cities } => {
                if !self.city_seq.is_current(ticket) {
                    debug!("stale city response ignored");
                    return false;
                }
                self.city_candidates = Some(cities);
                true
            }
        }
    }

    // --- Accessors ---

    pub fn country_text(&self) -> &str {
        &self.country_text
    }

    pub fn state_text(&self) -> &str {
        &self.state_text
    }

    pub fn city_text(&self) -> &str {
        &self.city_text
    }

    pub fn selected_country(&self) -> Option<&str> {
        self.selected_country.as_deref()
    }

    pub fn selected_state(&self) -> Option<&str> {
        self.selected_state.as_deref()
    }

    pub fn country_candidates(&self) -> &[Country] {
        self.catalogs.countries()
    }

    pub fn state_candidates(&self) -> &[State] {
        &self.state_candidates
    }

    /// `None` while no city data is offered (country unresolved).
    pub fn city_candidates(&self) -> Option<&[City]> {
        self.city_candidates.as_deref()
    }

    // --- Suggestions (candidates filtered by the current field text) ---

    pub fn country_suggestions(&self) -> Vec<&Country> {
        filter_candidates(Some(self.catalogs.countries()), &self.country_text)
            .unwrap_or_default()
    }

    pub fn state_suggestions(&self) -> Vec<&State> {
        filter_candidates(Some(self.state_candidates.as_slice()), &self.state_text)
            .unwrap_or_default()
    }

    /// `None` when there is no city candidate data at all.
    pub fn city_suggestions(&self) -> Option<Vec<&City>> {
        filter_candidates(self.city_candidates(), &self.city_text)
    }

    /// Counts of what the form currently offers.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            countries: self.catalogs.countries().len(),
            states: self.state_candidates.len(),
            cities: self.city_candidates.as_ref().map_or(0, Vec::len),
        }
    }
}

/// Async driver binding a [`CascadeState`] to a [`CatalogSource`].
#[derive(Debug)]
pub struct CascadeForm<S> {
    source: S,
    state: CascadeState,
}

impl<S: CatalogSource> CascadeForm<S> {
    /// Load the reference catalogs (joined) and start with empty fields.
    pub async fn initialize(source: S) -> Result<Self> {
        let catalogs = Catalogs::load(&source).await?;
        Ok(Self {
            state: CascadeState::new(catalogs),
            source,
        })
    }

    pub fn cascade(&self) -> &CascadeState {
        &self.state
    }

    /// Edit the country field and run whatever scoped fetches that implies.
    pub async fn set_country(&mut self, text: impl Into<String>) -> Result<()> {
        let plans = self.state.edit_country(text);
        self.run_plans(plans).await
    }

    /// Edit the state field and run whatever scoped fetch that implies.
    pub async fn set_state(&mut self, text: impl Into<String>) -> Result<()> {
        let plans = self.state.edit_state(text);
        self.run_plans(plans).await
    }

    /// Edit the city field. Never fetches.
    pub fn set_city(&mut self, text: impl Into<String>) {
        self.state.edit_city(text);
    }

    /// Identifier-based country selection. Returns false for an unknown code.
    pub async fn select_country(&mut self, iso2: &str) -> Result<bool> {
        match self.state.select_country_by_code(iso2) {
            Some(plans) => {
                self.run_plans(plans).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn run_plans(&mut self, plans: Vec<FetchPlan>) -> Result<()> {
        for plan in plans {
            let outcome = match &plan {
                FetchPlan::StatesOfCountry { iso2, ticket } => FetchOutcome::States {
                    ticket: *ticket,
                    states: self.source.states_of(iso2).await?,
                },
                FetchPlan::CitiesOfCountry { iso2, ticket } => FetchOutcome::Cities {
                    ticket: *ticket,
                    cities: self.source.cities_of(iso2).await?,
                },
                FetchPlan::CitiesOfCountryState {
                    iso2,
                    state_code,
                    ticket,
                } => FetchOutcome::Cities {
                    ticket: *ticket,
                    cities: self.source.cities_of_state(iso2, state_code).await?,
                },
            };
            self.state.apply(outcome);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoFormError;
    use crate::fixtures::FixtureSource;

    async fn form() -> CascadeForm<FixtureSource> {
        CascadeForm::initialize(FixtureSource::us_de()).await.unwrap()
    }

    #[tokio::test]
    async fn matched_country_narrows_states_to_that_country() {
        let mut form = form().await;
        form.set_country("United States").await.unwrap();

        let cascade = form.cascade();
        assert_eq!(cascade.selected_country(), Some("US"));
        assert!(!cascade.state_candidates().is_empty());
        assert!(cascade
            .state_candidates()
            .iter()
            .all(|s| s.country_code == "US"));
        // Cities become available country-wide.
        let cities = cascade.city_candidates().unwrap();
        assert!(cities.iter().all(|c| c.country_code == "US"));
    }

    #[tokio::test]
    async fn unmatched_country_resets_states_and_clears_cities() {
        let mut form = form().await;
        form.set_country("United States").await.unwrap();
        form.set_country("United Sta").await.unwrap();

        let cascade = form.cascade();
        assert_eq!(cascade.selected_country(), None);
        // Back to the global baseline, which spans both countries.
        assert!(cascade.state_candidates().iter().any(|s| s.country_code == "US"));
        assert!(cascade.state_candidates().iter().any(|s| s.country_code == "DE"));
        // "No data", not "empty list".
        assert!(cascade.city_candidates().is_none());
        assert!(cascade.city_suggestions().is_none());
    }

    #[tokio::test]
    async fn unmatched_state_under_matched_country_falls_back_to_country_cities() {
        let mut form = form().await;
        form.set_country("United States").await.unwrap();
        form.set_state("Calif").await.unwrap();

        let cascade = form.cascade();
        assert_eq!(cascade.selected_state(), None);
        let cities = cascade.city_candidates().unwrap();
        // Full US list, not state-scoped and not empty.
        assert!(cities.iter().any(|c| c.state_code.as_deref() == Some("CA")));
        assert!(cities.iter().any(|c| c.state_code.as_deref() == Some("TX")));
    }

    #[tokio::test]
    async fn matched_state_scopes_cities_to_country_and_state() {
        let mut form = form().await;
        form.set_country("United States").await.unwrap();
        form.set_state("California").await.unwrap();

        let cascade = form.cascade();
        assert_eq!(cascade.selected_state(), Some("CA"));
        let cities = cascade.city_candidates().unwrap();
        assert!(!cities.is_empty());
        assert!(cities
            .iter()
            .all(|c| c.country_code == "US" && c.state_code.as_deref() == Some("CA")));
    }

    #[tokio::test]
    async fn wire_shaped_states_without_country_code_still_scope_cities() {
        let source = FixtureSource::us_de();
        let catalogs = Catalogs::load(&source).await.unwrap();
        let mut cascade = CascadeState::new(catalogs);

        let plans = cascade.edit_country("United States");
        // The country-scoped states listing omits country_code on the wire;
        // it serde-defaults to "".
        let states: Vec<State> =
            serde_json::from_str(r#"[{"id":1416,"name":"California","iso2":"CA"}]"#).unwrap();
        assert!(cascade.apply(FetchOutcome::States {
            ticket: plans[0].ticket(),
            states,
        }));

        let plans = cascade.edit_state("California");
        assert!(matches!(
            plans.as_slice(),
            [FetchPlan::CitiesOfCountryState { iso2, state_code, .. }]
                if iso2.as_str() == "US" && state_code.as_str() == "CA"
        ));
        assert_eq!(cascade.selected_state(), Some("CA"));
    }

    #[tokio::test]
    async fn state_edit_without_resolved_country_clears_cities() {
        let mut form = form().await;
        form.set_state("California").await.unwrap();

        assert!(form.cascade().city_candidates().is_none());
        // No scoped fetch was issued.
        assert!(!form.source.was_called("cities_of:US"));
    }

    #[tokio::test]
    async fn country_is_reresolved_on_every_state_edit() {
        let mut form = form().await;
        form.set_country("United States").await.unwrap();
        // User edits the country out from under the state field.
        form.set_country("Germa").await.unwrap();
        form.set_state("California").await.unwrap();

        // The stale US selection must not leak into the city list.
        assert_eq!(form.cascade().selected_country(), None);
        assert!(form.cascade().city_candidates().is_none());
    }

    #[tokio::test]
    async fn selecting_the_same_country_twice_is_idempotent() {
        let mut form = form().await;
        form.set_country("United States").await.unwrap();
        let states_first = form.cascade().state_candidates().to_vec();
        let cities_first = form.cascade().city_candidates().unwrap().to_vec();

        form.set_country("United States").await.unwrap();
        assert_eq!(form.cascade().state_candidates(), states_first.as_slice());
        assert_eq!(
            form.cascade().city_candidates().unwrap(),
            cities_first.as_slice()
        );
    }

    #[tokio::test]
    async fn identifier_based_selection_matches_name_based_selection() {
        let mut by_code = form().await;
        assert!(by_code.select_country("us").await.unwrap());
        assert!(!by_code.select_country("XX").await.unwrap());

        let mut by_name = form().await;
        by_name.set_country("United States").await.unwrap();

        assert_eq!(by_code.cascade().country_text(), "United States");
        assert_eq!(
            by_code.cascade().state_candidates(),
            by_name.cascade().state_candidates()
        );
    }

    #[tokio::test]
    async fn failed_scoped_fetch_keeps_previous_candidates() {
        let mut form = form().await;
        form.set_country("United States").await.unwrap();
        let states_before = form.cascade().state_candidates().to_vec();
        let cities_before = form.cascade().city_candidates().unwrap().to_vec();

        form.source.fail_endpoint("cities_of_state:US:CA");
        let err = form.set_state("California").await.unwrap_err();
        assert!(matches!(err, GeoFormError::ApiStatus { .. }));

        // Candidate sets survive the failure untouched.
        assert_eq!(form.cascade().state_candidates(), states_before.as_slice());
        assert_eq!(
            form.cascade().city_candidates().unwrap(),
            cities_before.as_slice()
        );
    }

    #[tokio::test]
    async fn stale_responses_are_ignored() {
        let source = FixtureSource::us_de();
        let catalogs = Catalogs::load(&source).await.unwrap();
        let mut cascade = CascadeState::new(catalogs);

        // First edit: plans issued but responses still "in flight".
        let first = cascade.edit_country("United States");
        // Second edit supersedes the first before anything arrived.
        let second = cascade.edit_country("Germany");

        let stale = FetchOutcome::States {
            ticket: first[0].ticket(),
            states: source.states_of("US").await.unwrap(),
        };
        assert!(!cascade.apply(stale));
        // Baseline still in place, untouched by the stale reply.
        assert!(cascade.state_candidates().iter().any(|s| s.country_code == "DE"));

        let fresh = FetchOutcome::States {
            ticket: second[0].ticket(),
            states: source.states_of("DE").await.unwrap(),
        };
        assert!(cascade.apply(fresh));
        assert!(cascade
            .state_candidates()
            .iter()
            .all(|s| s.country_code == "DE"));
    }

    #[tokio::test]
    async fn clearing_the_country_invalidates_in_flight_responses() {
        let source = FixtureSource::us_de();
        let catalogs = Catalogs::load(&source).await.unwrap();
        let mut cascade = CascadeState::new(catalogs);

        let plans = cascade.edit_country("United States");
        // The field is cleared while the fetches are still outstanding.
        assert!(cascade.edit_country("").is_empty());

        let late = FetchOutcome::Cities {
            ticket: plans[1].ticket(),
            cities: source.cities_of("US").await.unwrap(),
        };
        assert!(!cascade.apply(late));
        assert!(cascade.city_candidates().is_none());
    }

    #[tokio::test]
    async fn stats_track_current_candidate_sets() {
        let mut form = form().await;
        let before = form.cascade().stats();
        assert_eq!(before.cities, 0);

        form.set_country("United States").await.unwrap();
        let after = form.cascade().stats();
        assert_eq!(after.countries, before.countries);
        assert!(after.cities > 0);
    }
}
