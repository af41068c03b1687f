// crates/geoform-core/src/suggest.rs

//! # Autocomplete Filter
//!
//! The suggestion filter is a pure function over a query and an optional
//! candidate list, plus a small debouncer that coalesces keystroke-level
//! recomputation behind a short quiet window.

use crate::traits::NameMatch;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Default quiet window before suggestions are recomputed. Tens of
/// milliseconds is enough; the exact value is not behaviorally significant.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Filter candidates by folded substring containment of `query`.
///
/// - `None` candidates (no data loaded/offered) stays `None`, which is
///   deliberately distinguishable from an empty match list.
/// - An empty query returns the full candidate list, order preserved.
/// - Otherwise returns the ordered subsequence whose display name contains
///   the query, case- and accent-insensitively.
pub fn filter_candidates<'a, T: NameMatch>(
    candidates: Option<&'a [T]>,
    query: &str,
) -> Option<Vec<&'a T>> {
    let list = candidates?;
    if query.is_empty() {
        return Some(list.iter().collect());
    }
    Some(list.iter().filter(|c| c.name_contains(query)).collect())
}

/// Coalesces rapid edits: only the latest edit within the quiet window
/// "settles".
///
/// Each call to [`Debouncer::settle`] registers a new edit and waits out the
/// window; it resolves to `true` only if no newer edit arrived meanwhile.
/// Callers recompute suggestions exactly when `settle` returns `true`.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    epoch: AtomicU64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            epoch: AtomicU64::new(0),
        }
    }

    /// Wait out the quiet window for this edit. `true` means this edit is
    /// still the latest and suggestions should be recomputed now.
    pub async fn settle(&self) -> bool {
        let mine = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.epoch.load(Ordering::SeqCst) == mine
    }
}
