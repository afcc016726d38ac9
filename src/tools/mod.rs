//! MCP tools for the Folk CRM, grouped by how an assistant uses them:
//! - **Search**: find people and companies by name, or within a group
//! - **Details**: full records by ID
//! - **Browse**: paginated listings returned verbatim
//! - **Actions**: create, update and delete records

pub mod actions;
pub mod browse;
pub mod details;
pub mod groups;
pub mod search;

pub use actions::{
    Ack, ActionTools, AddCompanyParams, AddNoteParams, AddPersonParams, LogInteractionParams,
    Outcome, SetReminderParams, UpdateCompanyParams, UpdateNoteParams, UpdatePersonParams,
    UpdateReminderParams,
};
pub use browse::{
    walk_to_page, BrowseDealsParams, BrowseParams, BrowseTools, EntityListParams, Listing,
};
pub use details::{
    CompanyIdParams, DetailsTools, NoteIdParams, PersonIdParams, ReminderIdParams, UserIdParams,
    WhoAmI,
};
pub use groups::{
    CompaniesInGroup, GroupCompany, GroupNotFound, GroupPerson, GroupSearch, GroupSearchParams,
    GroupTools, PeopleInGroup,
};
pub use search::{CompanyMatch, FindByNameParams, FindResponse, PersonMatch, SearchTools};

/// Matches returned by a name search.
pub const SEARCH_LIMIT: u32 = 10;

/// Default page size for browse and group tools.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page browse and group tools will return.
pub const MAX_PER_PAGE: u32 = 50;

/// Clamp a requested page size to `1..=MAX_PER_PAGE`.
pub fn clamp_per_page(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}
