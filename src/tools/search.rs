//! Search tier: find people and companies by name.
//!
//! Matching and ranking happen in Folk; these tools only shape the matches
//! into `{id, name, email|industry}` so the assistant can pick an ID.

use super::SEARCH_LIMIT;
use crate::client::AsyncFolkClient;
use crate::domain::require_text;
use crate::error::FolkApiResult;
use crate::models::{Company, Filter, ListQuery, Person};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindByNameParams {
    /// Name (or part of a name) to search for
    pub name: String,
}

/// Result of a name search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindResponse<T> {
    pub found: bool,
    pub matches: Vec<T>,
    pub total: usize,
}

impl<T> FindResponse<T> {
    pub fn new(matches: Vec<T>) -> Self {
        Self {
            found: !matches.is_empty(),
            total: matches.len(),
            matches,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonMatch {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

impl From<&Person> for PersonMatch {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            name: person.display_name(),
            email: person.primary_email(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyMatch {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
}

impl From<&Company> for CompanyMatch {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id.clone(),
            name: company.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            industry: company.industry.clone(),
        }
    }
}

/// Name search over people and companies.
pub struct SearchTools {
    client: Arc<dyn AsyncFolkClient>,
}

impl SearchTools {
    pub fn new(client: Arc<dyn AsyncFolkClient>) -> Self {
        Self { client }
    }

    /// `GET /people?limit=10&filter[fullName][like]=<name>`
    pub async fn find_person(&self, params: FindByNameParams) -> FolkApiResult<FindResponse<PersonMatch>> {
        let name = require_text("name", &params.name)?;
        tracing::debug!("find_person: {}", name);

        let query = ListQuery::new(SEARCH_LIMIT).filter(Filter::like("fullName", name));
        let page = self.client.list_people(&query).await?;

        Ok(FindResponse::new(page.items.iter().map(PersonMatch::from).collect()))
    }

    /// `GET /companies?limit=10&filter[name][like]=<name>`
    pub async fn find_company(&self, params: FindByNameParams) -> FolkApiResult<FindResponse<CompanyMatch>> {
        let name = require_text("name", &params.name)?;
        tracing::debug!("find_company: {}", name);

        let query = ListQuery::new(SEARCH_LIMIT).filter(Filter::like("name", name));
        let page = self.client.list_companies(&query).await?;

        Ok(FindResponse::new(page.items.iter().map(CompanyMatch::from).collect()))
    }
}
