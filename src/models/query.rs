//! Listing query parameters and Folk's bracket-notation filters.

/// Default page size for listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size Folk accepts on listing endpoints.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Every filter must match. Folk also accepts `or`, which no tool exposes.
const FILTER_COMBINATOR: &str = "and";

/// A single `filter[...]=value` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    key: String,
    value: String,
}

impl Filter {
    /// `filter[<field>][<op>]=<value>`
    pub fn new(field: &str, op: &str, value: impl Into<String>) -> Self {
        Self {
            key: format!("filter[{}][{}]", field, op),
            value: value.into(),
        }
    }

    /// Fuzzy text match, e.g. `filter[fullName][like]=john`.
    pub fn like(field: &str, value: impl Into<String>) -> Self {
        Self::new(field, "like", value)
    }

    /// Membership match, e.g. `filter[companies][in]=com_...`.
    pub fn within(field: &str, value: impl Into<String>) -> Self {
        Self::new(field, "in", value)
    }

    /// Records belonging to a group: `filter[groups][in][id]=grp_...`.
    pub fn in_group(group_id: impl Into<String>) -> Self {
        Self {
            key: "filter[groups][in][id]".to_string(),
            value: group_id.into(),
        }
    }

    /// Group-scoped custom field match:
    /// `filter[customFieldValues.<groupId>.<field>][in]=<value>`.
    pub fn custom_field(group_id: &str, field: &str, value: impl Into<String>) -> Self {
        Self::within(&format!("customFieldValues.{}.{}", group_id, field), value)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Parameters of a listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    pub cursor: Option<String>,
    pub filters: Vec<Filter>,
    /// Notes and reminders only: restrict to one attached entity
    pub entity_id: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            cursor: None,
            filters: Vec::new(),
            entity_id: None,
        }
    }

    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor.filter(|c| !c.is_empty());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn for_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Flatten into query pairs. Unset values are omitted and the combinator
    /// is only sent alongside filters.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("limit".to_string(), self.limit.to_string())];

        if let Some(cursor) = &self.cursor {
            pairs.push(("cursor".to_string(), cursor.clone()));
        }

        if let Some(entity_id) = &self.entity_id {
            pairs.push(("entity.id".to_string(), entity_id.clone()));
        }

        if !self.filters.is_empty() {
            pairs.push(("combinator".to_string(), FILTER_COMBINATOR.to_string()));
            pairs.extend(
                self.filters
                    .iter()
                    .map(|f| (f.key.clone(), f.value.clone())),
            );
        }

        pairs
    }
}
