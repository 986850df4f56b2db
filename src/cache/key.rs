//! Cache Key Module
//!
//! Derives deterministic cache keys from an operation name and its
//! parameters. Parameter order never changes the key.

use std::collections::BTreeMap;

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the parameter digest.
pub const DIGEST_LEN: usize = 16;

/// Builds a `(name, Value)` parameter list from `name = value` pairs.
///
/// ```
/// use anime_cache::{cache_params, cache::generate_cache_key};
///
/// let key = generate_cache_key("search_anime", cache_params!(query = "x", limit = 10));
/// assert!(key.starts_with("search_anime:"));
/// ```
#[macro_export]
macro_rules! cache_params {
    () => {
        ::std::vec::Vec::<(&str, $crate::__serde_json::Value)>::new()
    };
    ($($name:ident = $value:expr),+ $(,)?) => {
        ::std::vec![$((stringify!($name), $crate::__serde_json::json!($value))),+]
    };
}

/// Returns `"{method}:{digest}"` for the given parameters.
///
/// Parameters are sorted by name and each `name:value` pair is hashed in
/// its JSON form.
/// A parameter present with a `null` value produces a different key than
/// the same parameter left out. Later duplicates of a name win.
pub fn generate_cache_key<I, K>(method: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let canonical: BTreeMap<String, Value> = params
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect();

    let mut hasher = Sha256::new();
    for (name, value) in &canonical {
        hasher.update(Value::from(name.as_str()).to_string());
        hasher.update(b":");
        hasher.update(value.to_string());
        hasher.update(b",");
    }
    let digest = format!("{:x}", hasher.finalize());

    format!("{}:{}", method, &digest[..DIGEST_LEN])
}
