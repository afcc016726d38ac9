//! Note model representing a note attached to a person, company or object.

use super::common::{EntityReference, IdRef, Visibility};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author block on a note. Folk may omit any of these for imported notes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoteAuthor {
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// A note in Folk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub entity: Option<EntityReference>,
    pub content: String,
    pub visibility: Visibility,
    pub author: Option<NoteAuthor>,
    pub created_at: Option<String>,
    pub parent_note: Option<Value>,
}

/// Request body for `POST /notes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteInput {
    pub entity: IdRef,
    pub content: String,
    pub visibility: Visibility,
}

impl NoteInput {
    pub fn new(entity_id: impl Into<String>, content: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            entity: IdRef::new(entity_id),
            content: content.into(),
            visibility,
        }
    }
}

/// Request body for `PATCH /notes/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.visibility.is_none()
    }
}
