//! Data models for Folk CRM resources.
//!
//! Response shapes mirror the camelCase JSON the Folk API returns; request
//! bodies (`*Input`, `*Update`) serialize only the fields that were supplied.

pub mod common;
pub mod company;
pub mod deal;
pub mod group;
pub mod interaction;
pub mod note;
pub mod person;
pub mod query;
pub mod reminder;
pub mod user;

pub use common::{
    CompanyReference, DataEnvelope, EntityReference, EntityType, ErrorDetail, GroupReference,
    IdRef, ListEnvelope, Page, Pagination, PersonReference, UserReference, Visibility,
};
pub use company::{Company, CompanyInput};
pub use deal::Deal;
pub use group::Group;
pub use interaction::{Interaction, InteractionInput};
pub use note::{Note, NoteAuthor, NoteInput, NoteUpdate};
pub use person::{InteractionMetadata, InteractionStats, Person, PersonInput};
pub use query::{Filter, ListQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use reminder::{Reminder, ReminderInput, ReminderUpdate};
pub use user::User;
