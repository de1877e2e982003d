//! Deterministic request fingerprints
//!
//! A fingerprint uniquely and repeatably identifies an API request by its
//! endpoint and parameter set, independent of parameter insertion order.
//! Fingerprints double as the keys of the persisted cache files, so their
//! exact shape must stay stable across releases.

use std::collections::HashMap;

/// Builds the fingerprint for a request against `endpoint` with `params`.
///
/// Each parameter becomes the string `"{key}_{value}"`; the collected
/// strings are sorted lexicographically and joined with `_`, prefixed by
/// `endpoint + "_"`. Sorting makes the result independent of the map's
/// iteration order.
///
/// An empty parameter map yields exactly `endpoint + "_"`; the trailing
/// separator is part of the persisted key format and must be preserved.
///
/// Note: because keys and values may themselves contain `_`, two different
/// parameter sets can in principle collide (e.g. `{"a_b": "c"}` vs
/// `{"a": "b_c"}`). This is a known, accepted limitation of the plain
/// string format; callers control the parameter vocabulary.
pub fn build_fingerprint(endpoint: &str, params: &HashMap<String, String>) -> String {
    let mut parts: Vec<String> = params.iter().map(|(k, v)| format!("{k}_{v}")).collect();
    parts.sort();
    format!("{}_{}", endpoint, parts.join("_"))
}
