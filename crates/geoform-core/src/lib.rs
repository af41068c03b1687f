// crates/geoform-core/src/lib.rs

//! Cascading country → state → city selection backed by a geographic
//! reference API.
//!
//! The crate splits into a pure cascade state machine ([`cascade`]), the
//! autocomplete filter ([`suggest`]), the joined reference-data loader
//! ([`loader`]) and an async API client ([`client`]) behind the
//! [`traits::CatalogSource`] seam.

pub mod cascade;
pub mod client;
pub mod error;
pub mod loader;
pub mod model;
pub mod suggest;
pub mod text;
pub mod traits;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-exports
pub use crate::cascade::{CascadeForm, CascadeState, FetchOutcome, FetchPlan, RequestSeq, Ticket};
pub use crate::client::{CscClient, CscClientBuilder, API_KEY_HEADER, DEFAULT_BASE_URL};
pub use crate::error::{GeoFormError, Result};
pub use crate::loader::Catalogs;
pub use crate::model::{CatalogStats, City, Country, State};
pub use crate::suggest::{filter_candidates, Debouncer, DEFAULT_DEBOUNCE};
pub use crate::traits::{CatalogSource, NameMatch};
