//! Details tier: full records by identifier.

use crate::client::AsyncFolkClient;
use crate::domain::FolkId;
use crate::error::FolkApiResult;
use crate::models::{Company, Note, Person, Reminder, User};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PersonIdParams {
    /// Exact Folk ID from find_person results (e.g. per_xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)
    pub person_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyIdParams {
    /// Exact Folk ID from find_company results (e.g. com_xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)
    pub company_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NoteIdParams {
    /// Folk ID of the note (from get_notes)
    pub note_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReminderIdParams {
    /// Folk ID of the reminder (from get_reminders)
    pub reminder_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserIdParams {
    /// Folk user ID from list_users results
    pub user_id: String,
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhoAmI {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for WhoAmI {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.full_name,
            email: user.email,
        }
    }
}

pub struct DetailsTools {
    client: Arc<dyn AsyncFolkClient>,
}

impl DetailsTools {
    pub fn new(client: Arc<dyn AsyncFolkClient>) -> Self {
        Self { client }
    }

    pub async fn get_person_details(&self, params: PersonIdParams) -> FolkApiResult<Person> {
        let id = FolkId::parse(&params.person_id, "person")?;
        self.client.get_person(id.as_str()).await
    }

    pub async fn get_company_details(&self, params: CompanyIdParams) -> FolkApiResult<Company> {
        let id = FolkId::parse(&params.company_id, "company")?;
        self.client.get_company(id.as_str()).await
    }

    pub async fn get_note_details(&self, params: NoteIdParams) -> FolkApiResult<Note> {
        let id = FolkId::parse(&params.note_id, "note")?;
        self.client.get_note(id.as_str()).await
    }

    pub async fn get_reminder_details(&self, params: ReminderIdParams) -> FolkApiResult<Reminder> {
        let id = FolkId::parse(&params.reminder_id, "reminder")?;
        self.client.get_reminder(id.as_str()).await
    }

    pub async fn get_user_details(&self, params: UserIdParams) -> FolkApiResult<User> {
        let id = FolkId::parse(&params.user_id, "user")?;
        self.client.get_user(id.as_str()).await
    }

    pub async fn whoami(&self) -> FolkApiResult<WhoAmI> {
        Ok(self.client.get_current_user().await?.into())
    }
}
