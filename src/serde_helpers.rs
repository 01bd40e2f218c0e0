//! Serde helpers for partial updates
//!
//! Partial-update bodies must distinguish "field not supplied" from "field
//! explicitly set to null". A field declared as
//! `#[serde(default, deserialize_with = "double_option")]` on an
//! `Option<Option<T>>` decodes to:
//!
//! - `None` when the key is absent (leave unchanged)
//! - `Some(None)` when the key is `null` (clear the value)
//! - `Some(Some(v))` when a value is supplied (set it)

use serde::{Deserialize, Deserializer};

/// Deserializer for `Option<Option<T>>` that maps an explicit `null` to
/// `Some(None)` instead of collapsing it into `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
