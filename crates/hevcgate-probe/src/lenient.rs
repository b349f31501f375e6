//! Serde helpers for probe values that arrive either as JSON numbers or as
//! strings (ffprobe reports `bit_rate` as `"4000000"`, hosts often as `4000000`).

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_text(self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::Text(s) => s,
        }
    }
}

/// Deserialize an optional value into its raw textual form.
pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumberOrString>::deserialize(deserializer)?.map(NumberOrString::into_text))
}

/// Deserialize an optional value as a finite number. Unparseable text is
/// treated as absent.
pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.and_then(|s| crate::parse_number(&s)))
}

/// Deserialize a value, mapping an explicit `null` to `T::default()`.
///
/// `#[serde(default)]` alone only covers a missing key.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
