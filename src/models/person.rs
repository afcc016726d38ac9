//! Person model representing a contact in Folk.

use super::common::{CompanyReference, GroupReference, UserReference};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Interaction counters Folk keeps per person.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionMetadata {
    pub user: Option<InteractionStats>,
    pub workspace: Option<InteractionStats>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionStats {
    pub approximate_count: u64,
    pub last_interacted_at: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub last_interacted_by: Vec<UserReference>,
}

/// A person in the Folk CRM.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub birthday: Option<String>,
    pub job_title: Option<String>,
    pub created_at: Option<String>,
    pub created_by: Option<UserReference>,
    pub groups: Vec<GroupReference>,
    pub companies: Vec<CompanyReference>,
    pub addresses: Vec<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub urls: Vec<String>,
    /// Keyed by group ID, then by field name
    pub custom_field_values: Map<String, Value>,
    pub interaction_metadata: Option<InteractionMetadata>,
}

impl Person {
    /// Name to show: "first last", else Folk's fullName, else "Unknown".
    pub fn display_name(&self) -> String {
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !joined.is_empty() {
            return joined;
        }

        self.full_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// First email on record.
    pub fn primary_email(&self) -> Option<String> {
        self.emails.first().cloned()
    }

    /// Custom field values this person has within one group.
    pub fn group_fields(&self, group_id: &str) -> Map<String, Value> {
        self.custom_field_values
            .get(group_id)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}

/// Body for `POST /people` and `PATCH /people/{id}`.
///
/// Absent fields are left out of the JSON so a PATCH only touches what was given.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PersonInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
