//! Forgiving numeric decoding for half-entered forms.
//!
//! Every numeric field of the input snapshot goes through these helpers so a
//! missing, null, textual or otherwise odd value decodes to zero instead of
//! failing the whole document.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::currency::parse_korean_money;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Flag(bool),
    Text(String),
    Null,
}

impl Loose {
    fn into_number(self) -> Option<f64> {
        match self {
            Loose::Number(value) => Some(value),
            Loose::Flag(_) | Loose::Null => None,
            Loose::Text(text) if text.trim().is_empty() => None,
            Loose::Text(text) => Some(parse_korean_money(&text)),
        }
    }
}

/// Replace NaN and infinities with zero.
pub fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Convert an arbitrary float into a unit count: rounded, clamped at zero.
pub fn to_count(value: f64) -> u32 {
    let value = finite(value).round();
    if value <= 0.0 {
        0
    } else {
        // `as` saturates at u32::MAX
        value as u32
    }
}

/// Deserialize a required number, defaulting anything unusable to 0.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let loose = Loose::deserialize(deserializer)?;
    Ok(loose.into_number().map(finite).unwrap_or(0.0))
}

/// Deserialize an optional number. Empty and non-numeric input becomes `None`.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let loose = Loose::deserialize(deserializer)?;
    Ok(loose.into_number().map(finite))
}

/// Deserialize a unit count.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let loose = Loose::deserialize(deserializer)?;
    Ok(loose.into_number().map(to_count).unwrap_or(0))
}

/// Deserialize an optional unit count.
pub fn opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let loose = Loose::deserialize(deserializer)?;
    Ok(loose.into_number().map(to_count))
}

/// Deserialize an optional map of per-key rates. Each value decodes like
/// [`number`], so one bad entry costs only that entry.
pub fn opt_number_map<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Loose>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|map| {
        map.into_iter()
            .map(|(key, value)| (key, value.into_number().map(finite).unwrap_or(0.0)))
            .collect()
    }))
}
