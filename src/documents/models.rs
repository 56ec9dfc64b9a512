use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys the store owns; client-supplied values for them are discarded.
pub const RESERVED_KEYS: [&str; 2] = ["_id", "createdAt"];

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("El campo {0} es requerido")]
    MissingField(&'static str),
}

/// Player record held in the document store. Unknown fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPlayer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Nombre")]
    pub first_name: String,
    #[serde(rename = "Apellido")]
    pub last_name: String,
    #[serde(rename = "FechaNacimiento", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "Gmail", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "Ranking", default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<u32>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDocumentPlayer {
    #[serde(rename = "Nombre", default)]
    pub first_name: String,
    #[serde(rename = "Apellido", default)]
    pub last_name: String,
    #[serde(rename = "FechaNacimiento", default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "Gmail", default)]
    pub email: Option<String>,
    #[serde(rename = "Telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "Ranking", default)]
    pub ranking: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewDocumentPlayer {
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.first_name.trim().is_empty() {
            return Err(DocumentError::MissingField("Nombre"));
        }
        if self.last_name.trim().is_empty() {
            return Err(DocumentError::MissingField("Apellido"));
        }
        Ok(())
    }

    pub(crate) fn into_document(mut self, id: String, created_at: DateTime<Utc>) -> DocumentPlayer {
        for key in RESERVED_KEYS {
            self.extra.remove(key);
        }

        DocumentPlayer {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            birth_date: self.birth_date,
            email: self.email,
            phone: self.phone,
            ranking: self.ranking,
            created_at,
            extra: self.extra,
        }
    }
}
