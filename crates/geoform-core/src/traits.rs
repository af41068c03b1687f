// crates/geoform-core/src/traits.rs
use crate::error::Result;
use crate::model::{City, Country, State};
use crate::text::fold_key;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// Two distinct comparisons live here on purpose:
/// - [`NameMatch::is_exactly`] — exact, as-typed equality. This is what the
///   cascade uses to decide whether a field's free text has *selected* an
///   entity. The durable binding is still the entity's code; the typed name
///   is only how the user reaches it.
/// - [`NameMatch::name_contains`] — accent-insensitive, case-insensitive
///   substring containment via [`fold_key`], used for autocomplete
///   suggestions.
///
/// # Examples
/// ```rust
/// use geoform_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("California").is_exactly("California"));
/// assert!(!Place("California").is_exactly("california"));
/// assert!(Place("Zürich").name_contains("zuri"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Exact, case-sensitive equality against the typed text.
    #[inline]
    fn is_exactly(&self, q: &str) -> bool {
        self.name_str() == q
    }

    /// Accent-insensitive + case-insensitive substring match.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}

/// Read-only access to the geographic reference catalogs.
///
/// This is the seam between the cascade logic and the external API: the
/// production implementation is [`crate::client::CscClient`]; tests drive the
/// cascade with an in-memory source. Scoped lookups are keyed by codes, never
/// by display names.
pub trait CatalogSource {
    /// Full country catalog.
    async fn countries(&self) -> Result<Vec<Country>>;

    /// Full global state catalog (all countries).
    async fn states(&self) -> Result<Vec<State>>;

    /// States belonging to one country.
    async fn states_of(&self, country_iso2: &str) -> Result<Vec<State>>;

    /// All cities in one country, regardless of state.
    async fn cities_of(&self, country_iso2: &str) -> Result<Vec<City>>;

    /// Cities scoped to one state of one country.
    async fn cities_of_state(&self, country_iso2: &str, state_code: &str) -> Result<Vec<City>>;
}
