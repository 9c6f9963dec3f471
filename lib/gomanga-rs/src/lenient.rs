use serde::Deserialize;
use serde::Deserializer;

/// Deserialize a display field, using its default if it is null or has an unexpected shape.
///
/// Use together with `#[serde(default)]`, which covers missing keys.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
