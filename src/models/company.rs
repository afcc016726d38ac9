//! Company model.

use super::common::{GroupReference, UserReference};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A company in the Folk CRM.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub funding_raised: Option<String>,
    pub last_funding_date: Option<String>,
    pub industry: Option<String>,
    pub foundation_year: Option<i32>,
    pub employee_range: Option<String>,
    pub created_at: Option<String>,
    pub created_by: Option<UserReference>,
    pub groups: Vec<GroupReference>,
    pub addresses: Vec<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub urls: Vec<String>,
    pub custom_field_values: Map<String, Value>,
}

impl Company {
    /// Custom field values this company has within one group.
    pub fn group_fields(&self, group_id: &str) -> Map<String, Value> {
        self.custom_field_values
            .get(group_id)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}

/// Body for `POST /companies` and `PATCH /companies/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
}

impl CompanyInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
