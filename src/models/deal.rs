//! Deal model. Deals are custom objects that live inside a group.

use super::common::{CompanyReference, PersonReference, UserReference};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub name: String,
    pub companies: Vec<CompanyReference>,
    pub people: Vec<PersonReference>,
    pub created_at: Option<String>,
    pub created_by: Option<UserReference>,
    pub custom_field_values: Map<String, Value>,
}
