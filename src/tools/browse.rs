//! Browse tier: one page of a listing, records returned as Folk sent them.
//!
//! Folk paginates with opaque cursors. A numbered page is reached by following
//! `page - 1` cursors from the start; a caller that kept the `next_cursor` of
//! the previous page gets the next one in a single request.

use super::{clamp_per_page, DEFAULT_PER_PAGE};
use crate::client::AsyncFolkClient;
use crate::domain::{require_text, FolkId, ValidationError};
use crate::error::FolkApiResult;
use crate::models::{Company, Deal, Group, ListQuery, Note, Page, Person, Reminder, User};
use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::future::Future;
use std::sync::Arc;

/// Paging arguments shared by every browse tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct BrowseParams {
    /// Page number, starting at 1 (default 1)
    #[serde(default)]
    pub page: Option<u32>,
    /// Results per page, 1-50 (default 20)
    #[serde(default)]
    pub per_page: Option<u32>,
    /// next_cursor from a previous page; fetches the page after it directly
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BrowseDealsParams {
    /// Folk group ID the deals live in (from list_groups)
    pub group_id: String,
    /// Custom object type name in the group, e.g. "Deals"
    pub object_type: String,
    #[serde(flatten)]
    pub paging: BrowseParams,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EntityListParams {
    /// Folk ID of the person, company or object the records are attached to
    pub entity_id: String,
    #[serde(flatten)]
    pub paging: BrowseParams,
}

/// One page of records under an entity-specific key (`people`, `notes`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub key: &'static str,
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub next_cursor: Option<String>,
}

impl<T> Listing<T> {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

impl<T: Serialize> Serialize for Listing<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry(self.key, &self.items)?;
        map.serialize_entry("page", &self.page)?;
        map.serialize_entry("per_page", &self.per_page)?;
        map.serialize_entry("has_more", &self.has_more())?;
        map.serialize_entry("next_cursor", &self.next_cursor)?;
        map.end()
    }
}

/// Fetch the requested page, walking cursors from the first page when no
/// cursor was supplied. A page past the end comes back empty.
pub async fn walk_to_page<T, F, Fut>(
    key: &'static str,
    params: &BrowseParams,
    base: ListQuery,
    mut fetch: F,
) -> FolkApiResult<Listing<T>>
where
    F: FnMut(ListQuery) -> Fut,
    Fut: Future<Output = FolkApiResult<Page<T>>>,
{
    let page = params.page.unwrap_or(1);
    if page == 0 {
        return Err(ValidationError::InvalidArgument {
            name: "page".to_string(),
            reason: "pages start at 1".to_string(),
        }
        .into());
    }

    let per_page = clamp_per_page(params.per_page);
    let mut query = ListQuery { limit: per_page, ..base };

    let fetched = match params.cursor.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(cursor) => fetch(query.with_cursor(Some(cursor.to_string()))).await?,
        None => {
            let mut current = fetch(query.clone()).await?;
            for step in 1..page {
                match current.next_cursor.take() {
                    Some(cursor) => {
                        tracing::debug!("{}: following cursor to page {}", key, step + 1);
                        query = query.with_cursor(Some(cursor));
                        current = fetch(query.clone()).await?;
                    }
                    None => {
                        current = Page::empty();
                        break;
                    }
                }
            }
            current
        }
    };

    Ok(Listing {
        key,
        items: fetched.items,
        page,
        per_page,
        next_cursor: fetched.next_cursor,
    })
}

pub struct BrowseTools {
    client: Arc<dyn AsyncFolkClient>,
}

impl BrowseTools {
    pub fn new(client: Arc<dyn AsyncFolkClient>) -> Self {
        Self { client }
    }

    pub async fn browse_people(&self, params: BrowseParams) -> FolkApiResult<Listing<Person>> {
        let client = self.client.clone();
        walk_to_page("people", &params, ListQuery::default(), |q| {
            let client = client.clone();
            async move { client.list_people(&q).await }
        })
        .await
    }

    pub async fn browse_companies(&self, params: BrowseParams) -> FolkApiResult<Listing<Company>> {
        let client = self.client.clone();
        walk_to_page("companies", &params, ListQuery::default(), |q| {
            let client = client.clone();
            async move { client.list_companies(&q).await }
        })
        .await
    }

    pub async fn list_groups(&self, params: BrowseParams) -> FolkApiResult<Listing<Group>> {
        let client = self.client.clone();
        walk_to_page("groups", &params, ListQuery::default(), |q| {
            let client = client.clone();
            async move { client.list_groups(&q).await }
        })
        .await
    }

    pub async fn list_users(&self, params: BrowseParams) -> FolkApiResult<Listing<User>> {
        let client = self.client.clone();
        walk_to_page("users", &params, ListQuery::default(), |q| {
            let client = client.clone();
            async move { client.list_users(&q).await }
        })
        .await
    }

    pub async fn browse_deals(&self, params: BrowseDealsParams) -> FolkApiResult<Listing<Deal>> {
        let group_id = FolkId::parse(&params.group_id, "group")?.into_inner();
        let object_type = require_text("object_type", &params.object_type)?;

        let client = self.client.clone();
        walk_to_page("deals", &params.paging, ListQuery::default(), |q| {
            let client = client.clone();
            let group_id = group_id.clone();
            let object_type = object_type.clone();
            async move { client.list_deals(&group_id, &object_type, &q).await }
        })
        .await
    }

    pub async fn get_notes(&self, params: EntityListParams) -> FolkApiResult<Listing<Note>> {
        let entity_id = FolkId::parse(&params.entity_id, "entity")?;
        let base = ListQuery::new(DEFAULT_PER_PAGE).for_entity(entity_id.into_inner());

        let client = self.client.clone();
        walk_to_page("notes", &params.paging, base, |q| {
            let client = client.clone();
            async move { client.list_notes(&q).await }
        })
        .await
    }

    pub async fn get_reminders(&self, params: EntityListParams) -> FolkApiResult<Listing<Reminder>> {
        let entity_id = FolkId::parse(&params.entity_id, "entity")?;
        let base = ListQuery::new(DEFAULT_PER_PAGE).for_entity(entity_id.into_inner());

        let client = self.client.clone();
        walk_to_page("reminders", &params.paging, base, |q| {
            let client = client.clone();
            async move { client.list_reminders(&q).await }
        })
        .await
    }
}
