//! Group-scoped search: people or companies in a named group, optionally
//! narrowed by the group's `Status` or another custom field.

use super::clamp_per_page;
use crate::client::AsyncFolkClient;
use crate::domain::{require_text, ValidationError};
use crate::error::FolkApiResult;
use crate::models::{Company, Filter, Group, ListQuery, Person, MAX_PAGE_SIZE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// How many group names a miss suggests.
const SUGGESTED_GROUPS: usize = 10;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GroupSearchParams {
    /// Group name; exact (case-insensitive) match first, then partial
    pub group_name: String,
    /// Value of the group's "Status" field, e.g. "Follow up 1", "Active"
    #[serde(default)]
    pub status: Option<String>,
    /// Name of another custom field to filter by (needs custom_value)
    #[serde(default)]
    pub custom_field: Option<String>,
    /// Value the custom_field must have
    #[serde(default)]
    pub custom_value: Option<String>,
    /// Maximum results, 1-50 (default 20)
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Reply when the group name does not resolve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNotFound {
    pub found: bool,
    pub error: String,
    pub available_groups: Vec<String>,
    pub hint: String,
}

impl GroupNotFound {
    fn new(group_name: &str, groups: &[Group]) -> Self {
        Self {
            found: false,
            error: format!("Group '{}' not found", group_name),
            available_groups: groups
                .iter()
                .take(SUGGESTED_GROUPS)
                .map(|g| g.name.clone())
                .collect(),
            hint: "Check the group name or use list_groups to see all available groups".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupSearch<T> {
    Found(T),
    GroupNotFound(GroupNotFound),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPerson {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub status: Option<Value>,
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeopleInGroup {
    pub found: bool,
    pub people: Vec<GroupPerson>,
    pub total: usize,
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCompany {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    pub status: Option<Value>,
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompaniesInGroup {
    pub found: bool,
    pub companies: Vec<GroupCompany>,
    pub total: usize,
    pub group_name: String,
}

/// Validated arguments, before the group is resolved.
struct GroupCriteria {
    group_name: String,
    status: Option<String>,
    custom: Option<(String, String)>,
    limit: u32,
}

impl GroupCriteria {
    fn from_params(params: GroupSearchParams) -> Result<Self, ValidationError> {
        let group_name = require_text("group_name", &params.group_name)?;
        let status = params
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let custom = match (non_blank(params.custom_field), non_blank(params.custom_value)) {
            (Some(field), Some(value)) => Some((field, value)),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ValidationError::InvalidArgument {
                    name: "custom_value".to_string(),
                    reason: "required when custom_field is given".to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(ValidationError::InvalidArgument {
                    name: "custom_field".to_string(),
                    reason: "required when custom_value is given".to_string(),
                })
            }
        };

        Ok(Self {
            group_name,
            status,
            custom,
            limit: clamp_per_page(params.limit),
        })
    }

    fn query(&self, group_id: &str) -> ListQuery {
        let mut query = ListQuery::new(self.limit).filter(Filter::in_group(group_id));
        if let Some(status) = &self.status {
            query = query.filter(Filter::custom_field(group_id, "Status", status.clone()));
        }
        if let Some((field, value)) = &self.custom {
            query = query.filter(Filter::custom_field(group_id, field, value.clone()));
        }
        query
    }
}

pub struct GroupTools {
    client: Arc<dyn AsyncFolkClient>,
}

impl GroupTools {
    pub fn new(client: Arc<dyn AsyncFolkClient>) -> Self {
        Self { client }
    }

    /// Every group in the workspace, following cursors to the end.
    ///
    /// Stops early if Folk hands back a cursor it already gave.
    async fn all_groups(&self) -> FolkApiResult<Vec<Group>> {
        let mut groups = Vec::new();
        let mut seen = HashSet::new();
        let mut query = ListQuery::new(MAX_PAGE_SIZE);
        loop {
            let page = self.client.list_groups(&query).await?;
            groups.extend(page.items);
            match page.next_cursor {
                Some(cursor) if seen.insert(cursor.clone()) => {
                    query = query.with_cursor(Some(cursor))
                }
                Some(cursor) => {
                    tracing::warn!("Group listing repeated cursor '{}', stopping", cursor);
                    break;
                }
                None => break,
            }
        }
        Ok(groups)
    }

    async fn resolve(&self, group_name: &str) -> FolkApiResult<Result<Group, GroupNotFound>> {
        let groups = self.all_groups().await?;
        Ok(match Group::resolve(&groups, group_name) {
            Some(group) => Ok(group.clone()),
            None => {
                tracing::debug!("Group '{}' not among {} groups", group_name, groups.len());
                Err(GroupNotFound::new(group_name, &groups))
            }
        })
    }

    pub async fn find_people_in_group(
        &self,
        params: GroupSearchParams,
    ) -> FolkApiResult<GroupSearch<PeopleInGroup>> {
        let criteria = GroupCriteria::from_params(params)?;
        let group = match self.resolve(&criteria.group_name).await? {
            Ok(group) => group,
            Err(missing) => return Ok(GroupSearch::GroupNotFound(missing)),
        };

        let page = self.client.list_people(&criteria.query(&group.id)).await?;
        let people: Vec<GroupPerson> = page
            .items
            .iter()
            .map(|person| group_person(person, &group.id))
            .collect();

        Ok(GroupSearch::Found(PeopleInGroup {
            found: !people.is_empty(),
            total: people.len(),
            people,
            group_name: group.name,
        }))
    }

    pub async fn find_companies_in_group(
        &self,
        params: GroupSearchParams,
    ) -> FolkApiResult<GroupSearch<CompaniesInGroup>> {
        let criteria = GroupCriteria::from_params(params)?;
        let group = match self.resolve(&criteria.group_name).await? {
            Ok(group) => group,
            Err(missing) => return Ok(GroupSearch::GroupNotFound(missing)),
        };

        let page = self.client.list_companies(&criteria.query(&group.id)).await?;
        let companies: Vec<GroupCompany> = page
            .items
            .iter()
            .map(|company| group_company(company, &group.id))
            .collect();

        Ok(GroupSearch::Found(CompaniesInGroup {
            found: !companies.is_empty(),
            total: companies.len(),
            companies,
            group_name: group.name,
        }))
    }
}

fn group_person(person: &Person, group_id: &str) -> GroupPerson {
    let custom_fields = person.group_fields(group_id);
    GroupPerson {
        id: person.id.clone(),
        name: person.display_name(),
        email: person.primary_email(),
        job_title: person.job_title.clone(),
        status: custom_fields.get("Status").cloned(),
        custom_fields,
    }
}

fn group_company(company: &Company, group_id: &str) -> GroupCompany {
    let custom_fields = company.group_fields(group_id);
    GroupCompany {
        id: company.id.clone(),
        name: company.name.clone().unwrap_or_else(|| "Unknown".to_string()),
        industry: company.industry.clone(),
        status: custom_fields.get("Status").cloned(),
        custom_fields,
    }
}
