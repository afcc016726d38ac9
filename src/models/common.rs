//! Shapes shared across Folk resources: references, envelopes and pagination.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Who can see a note or reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Kind of record a note, reminder or interaction is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Person,
    Company,
    Object,
    #[serde(other)]
    Unknown,
}

/// Reference to a user (author, creator, assignee).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserReference {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// Reference to a group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupReference {
    pub id: String,
    pub name: String,
}

/// Reference to a company.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyReference {
    pub id: String,
    pub name: String,
}

/// Reference to a person.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonReference {
    pub id: String,
    pub full_name: String,
}

/// Reference to the record a note or reminder hangs off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub id: String,
    #[serde(default)]
    pub entity_type: Option<EntityType>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// `{"id": ...}` as Folk expects it in request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: String,
}

impl IdRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Single-record envelope: `{"data": {...}}`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Listing envelope: `{"data": {"items": [...], "pagination": {...}}}`.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: ListData<T>,
}

#[derive(Debug, Deserialize)]
pub struct ListData<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> ListEnvelope<T> {
    /// Flatten into a page, resolving the next cursor from `nextLink`.
    pub fn into_page(self) -> Page<T> {
        let next_cursor = self.data.pagination.next_cursor();
        Page {
            items: self.data.items,
            next_cursor,
        }
    }
}

/// Cursor pagination block of a listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub next_link: Option<String>,
}

impl Pagination {
    /// The `cursor` query parameter of `nextLink`, percent-decoded.
    pub fn next_cursor(&self) -> Option<String> {
        let link = self.next_link.as_deref()?;
        let (_, query) = link.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "cursor")
            .and_then(|(_, value)| urlencoding::decode(value).ok())
            .map(|value| value.into_owned())
            .filter(|value| !value.is_empty())
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the following page; `None` once the listing is exhausted.
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Error body returned by Folk alongside 4xx/5xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
    pub documentation_url: Option<String>,
    pub request_id: Option<String>,
}
