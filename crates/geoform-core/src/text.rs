// crates/geoform-core/src/text.rs

/// Convert a string into a folded key suitable for matching.
///
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// Autocomplete matching folds both sides, so queries like "munchen" still
/// hit "München".
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Parses an `Option<String>` into an `Option<f64>`.
///
/// The upstream API ships coordinates as strings; values are trimmed before
/// parsing and anything unparseable becomes `None`.
pub fn parse_opt_f64(s: &Option<String>) -> Option<f64> {
    s.as_ref().and_then(|v| v.trim().parse::<f64>().ok())
}
