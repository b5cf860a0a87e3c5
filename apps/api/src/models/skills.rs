//! Skill lists are stored as JSON-encoded string arrays in TEXT columns.
//! Anything that is not a JSON array of strings degrades to an empty list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A list of skill terms decoded from a stored text blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillList(pub Vec<String>);

impl SkillList {
    /// Decodes a stored skills column. Never fails: invalid JSON, a non-array value,
    /// or NULL yields an empty list; non-string elements are dropped.
    pub fn from_stored(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => Self(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            Ok(_) | Err(_) => {
                tracing::debug!("Stored skills blob is not a string array; treating as empty");
                Self::default()
            }
        }
    }

    /// Space-joined terms, the form used when building text documents.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

#[cfg(test)]
impl From<Vec<&str>> for SkillList {
    fn from(items: Vec<&str>) -> Self {
        Self(items.into_iter().map(str::to_string).collect())
    }
}
