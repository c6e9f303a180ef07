//! Todo types exchanged with the remote todo API.

use serde::{Deserialize, Deserializer, Serialize};

/// A single todo as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-issued id; numeric ids are kept in their decimal form.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl Todo {
    /// Editable fields of this todo, used to pre-populate the edit form.
    pub fn fields(&self) -> TodoFields {
        TodoFields {
            title: self.title.clone(),
            description: self.description.clone(),
            is_completed: self.is_completed,
        }
    }
}

/// Body of create (POST) and update (PUT) requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoFields {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

impl Default for TodoFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            is_completed: true,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
