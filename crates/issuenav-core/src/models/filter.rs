use serde::{Deserialize, Deserializer, Serialize};

/// A saved issue filter the user marked as favourite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFilter {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// Filter metadata loaded once before the screen becomes interactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterMetadata {
    #[serde(default)]
    pub can_manage_filters: bool,
    #[serde(default)]
    pub can_bulk_change: bool,
    #[serde(default)]
    pub favorites: Vec<SavedFilter>,
}

// Filter ids arrive as JSON numbers but are used as route strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number filter id, got {}",
            other
        ))),
    }
}
