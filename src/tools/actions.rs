//! Action tier: create, update and delete records.
//!
//! Every action validates its arguments locally first, then replies with a
//! minimal acknowledgement such as `{"id": "...", "added": true}`.

use super::details::{CompanyIdParams, NoteIdParams, PersonIdParams, ReminderIdParams};
use crate::client::AsyncFolkClient;
use crate::domain::{require_text, EmailAddress, FolkId, TriggerTime, ValidationError};
use crate::error::FolkApiResult;
use crate::models::{
    CompanyInput, IdRef, InteractionInput, NoteInput, NoteUpdate, PersonInput, ReminderInput,
    ReminderUpdate, Visibility,
};
use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Added,
    Updated,
    Deleted,
}

impl Outcome {
    fn key(self) -> &'static str {
        match self {
            Outcome::Added => "added",
            Outcome::Updated => "updated",
            Outcome::Deleted => "deleted",
        }
    }
}

/// Minimal acknowledgement of a write.
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    pub id: String,
    pub name: Option<String>,
    pub outcome: Outcome,
}

impl Ack {
    pub fn added(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            outcome: Outcome::Added,
        }
    }

    pub fn updated(id: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Updated,
            ..Self::added(id)
        }
    }

    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Deleted,
            ..Self::added(id)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Serialize for Ack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        map.serialize_entry(self.outcome.key(), &true)?;
        map.end()
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AddPersonParams {
    /// Person's first name (required)
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    /// Initial notes, stored as the person's description
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UpdatePersonParams {
    /// Exact Folk ID from find_person results
    pub person_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Replaces existing emails
    #[serde(default)]
    pub email: Option<String>,
    /// Replaces existing phones
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AddCompanyParams {
    /// Company name (required)
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    /// Company website URL
    #[serde(default)]
    pub website: Option<String>,
    /// Initial notes, stored as the company's description
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UpdateCompanyParams {
    /// Exact Folk ID from find_company results
    pub company_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Replaces existing URLs
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AddNoteParams {
    /// Folk ID of the person, company or object the note is about
    pub entity_id: String,
    pub content: String,
    /// "public" (default) or "private"
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UpdateNoteParams {
    pub note_id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SetReminderParams {
    /// Folk ID of the person, company or object the reminder is about
    pub entity_id: String,
    /// What to be reminded about
    pub reminder: String,
    /// When to trigger, ISO 8601 with offset, e.g. "2026-01-28T09:00:00Z"
    pub when: String,
    /// "public" (default) or "private"
    #[serde(default)]
    pub visibility: Option<Visibility>,
    /// Users to notify; public reminders default to the current user
    #[serde(default)]
    pub assigned_user_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UpdateReminderParams {
    pub reminder_id: String,
    #[serde(default)]
    pub reminder: Option<String>,
    /// New trigger time, ISO 8601 with offset
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    /// Replaces the assignees
    #[serde(default)]
    pub assigned_user_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct LogInteractionParams {
    /// Folk ID of the person or company the interaction was with
    pub entity_id: String,
    /// Kind of interaction, e.g. "email", "meeting", "call"
    pub interaction_type: String,
    /// When it happened, ISO 8601 with offset
    pub when: String,
}

/// Trim an optional argument; blank counts as absent.
fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn optional_email(value: Option<String>) -> Result<Option<Vec<String>>, ValidationError> {
    optional_text(value)
        .map(|email| EmailAddress::new(email).map(|e| vec![e.into_inner()]))
        .transpose()
}

fn user_refs(ids: Vec<String>) -> Result<Vec<IdRef>, ValidationError> {
    ids.iter()
        .map(|id| FolkId::parse(id, "user").map(|id| IdRef::new(id.into_inner())))
        .collect()
}

fn nothing_to_update() -> ValidationError {
    ValidationError::InvalidArgument {
        name: "fields".to_string(),
        reason: "provide at least one field to change".to_string(),
    }
}

pub struct ActionTools {
    client: Arc<dyn AsyncFolkClient>,
}

impl ActionTools {
    pub fn new(client: Arc<dyn AsyncFolkClient>) -> Self {
        Self { client }
    }

    // ========================= People =========================

    pub async fn add_person(&self, params: AddPersonParams) -> FolkApiResult<Ack> {
        let input = PersonInput {
            first_name: Some(require_text("first_name", &params.first_name)?),
            last_name: optional_text(params.last_name),
            emails: optional_email(params.email)?,
            phones: optional_text(params.phone).map(|p| vec![p]),
            job_title: optional_text(params.job_title),
            description: optional_text(params.notes),
        };

        let person = self.client.create_person(&input).await?;
        tracing::info!("Person added: {}", person.id);
        Ok(Ack::added(person.id.clone()).named(person.display_name()))
    }

    pub async fn update_person(&self, params: UpdatePersonParams) -> FolkApiResult<Ack> {
        let id = FolkId::parse(&params.person_id, "person")?;
        let input = PersonInput {
            first_name: optional_text(params.first_name),
            last_name: optional_text(params.last_name),
            emails: optional_email(params.email)?,
            phones: optional_text(params.phone).map(|p| vec![p]),
            job_title: optional_text(params.job_title),
            description: None,
        };
        if input.is_empty() {
            return Err(nothing_to_update().into());
        }

        let person = self.client.update_person(id.as_str(), &input).await?;
        Ok(Ack::updated(person.id.clone()).named(person.display_name()))
    }

    pub async fn delete_person(&self, params: PersonIdParams) -> FolkApiResult<Ack> {
        let id = FolkId::parse(&params.person_id, "person")?;
        self.client.delete_person(id.as_str()).await?;
        tracing::info!("Person deleted: {}", id);
        Ok(Ack::deleted(id.into_inner()))
    }

    // ========================= Companies =========================

    pub async fn add_company(&self, params: AddCompanyParams) -> FolkApiResult<Ack> {
        let input = CompanyInput {
            name: Some(require_text("name", &params.name)?),
            description: optional_text(params.notes),
            industry: optional_text(params.industry),
            urls: optional_text(params.website).map(|w| vec![w]),
        };

        let company = self.client.create_company(&input).await?;
        tracing::info!("Company added: {}", company.id);
        let name = company.name.clone().or(input.name).unwrap_or_default();
        Ok(Ack::added(company.id).named(name))
    }

    pub async fn update_company(&self, params: UpdateCompanyParams) -> FolkApiResult<Ack> {
        let id = FolkId::parse(&params.company_id, "company")?;
        let input = CompanyInput {
            name: optional_text(params.name),
            description: optional_text(params.notes),
            industry: optional_text(params.industry),
            urls: optional_text(params.website).map(|w| vec![w]),
        };
        if input.is_empty() {
            return Err(nothing_to_update().into());
        }

        let company = self.client.update_company(id.as_str(), &input).await?;
        let name = company.name.unwrap_or_default();
        Ok(Ack::updated(company.id).named(name))
    }

    pub async fn delete_company(&self, params: CompanyIdParams) -> FolkApiResult<Ack> {
        let id = FolkId::parse(&params.company_id, "company")?;
        self.client.delete_company(id.as_str()).await?;
        tracing::info!("Company deleted: {}", id);
        Ok(Ack::deleted(id.into_inner()))
    }

    // ========================= Notes =========================

    pub async fn add_note(&self, params: AddNoteParams) -> FolkApiResult<Ack> {
        let entity = FolkId::parse(&params.entity_id, "entity")?;
        let content = require_text("content", &params.content)?;
        let input = NoteInput::new(entity.into_inner(), content, params.visibility.unwrap_or_default());

        let note = self.client.create_note(&input).await?;
        Ok(Ack::added(note.id))
    }

    pub async fn update_note(&self, params: UpdateNoteParams) -> FolkApiResult<Ack> {
        let id = FolkId::parse(&params.note_id, "note")?;
        let update = NoteUpdate {
            content: optional_text(params.content),
            visibility: params.visibility,
        };
        if update.is_empty() {
            return Err(nothing_to_update().into());
        }

        let note = self.client.update_note(id.as_str(), &update).await?;
        Ok(Ack::updated(note.id))
    }

    pub async fn delete_note(&self, params: NoteIdParams) -> FolkApiResult<Ack> {
        let id = FolkId::parse(&params.note_id, "note")?;
        self.client.delete_note(id.as_str()).await?;
        Ok(Ack::deleted(id.into_inner()))
    }

    // ========================= Reminders =========================

    /// Schedule a one-shot reminder.
    ///
    /// A public reminder without assignees is assigned to the current user,
    /// which costs one extra request.
    pub async fn set_reminder(&self, params: SetReminderParams) -> FolkApiResult<Ack> {
        let entity = FolkId::parse(&params.entity_id, "entity")?;
        let name = require_text("reminder", &params.reminder)?;
        let when = TriggerTime::parse(&params.when)?;
        let assigned_users = user_refs(params.assigned_user_ids.unwrap_or_default())?;

        let mut input = ReminderInput {
            entity: IdRef::new(entity.into_inner()),
            name,
            recurrence_rule: when.recurrence_rule(),
            visibility: params.visibility.unwrap_or_default(),
            assigned_users,
        };

        if input.needs_assignee() {
            let me = self.client.get_current_user().await?;
            tracing::debug!("Assigning public reminder to current user {}", me.id);
            input.assigned_users.push(IdRef::new(me.id));
        }

        let reminder = self.client.create_reminder(&input).await?;
        tracing::info!("Reminder set: {} at {}", reminder.id, when.to_rfc3339());
        Ok(Ack::added(reminder.id))
    }

    pub async fn update_reminder(&self, params: UpdateReminderParams) -> FolkApiResult<Ack> {
        let id = FolkId::parse(&params.reminder_id, "reminder")?;
        let recurrence_rule = optional_text(params.when)
            .map(|when| TriggerTime::parse(&when).map(|t| t.recurrence_rule()))
            .transpose()?;
        let assigned_users = params.assigned_user_ids.map(user_refs).transpose()?;

        let update = ReminderUpdate {
            name: optional_text(params.reminder),
            recurrence_rule,
            visibility: params.visibility,
            assigned_users,
        };
        if update.is_empty() {
            return Err(nothing_to_update().into());
        }

        let reminder = self.client.update_reminder(id.as_str(), &update).await?;
        Ok(Ack::updated(reminder.id))
    }

    pub async fn delete_reminder(&self, params: ReminderIdParams) -> FolkApiResult<Ack> {
        let id = FolkId::parse(&params.reminder_id, "reminder")?;
        self.client.delete_reminder(id.as_str()).await?;
        Ok(Ack::deleted(id.into_inner()))
    }

    // ========================= Interactions =========================

    pub async fn log_interaction(&self, params: LogInteractionParams) -> FolkApiResult<Ack> {
        let entity = FolkId::parse(&params.entity_id, "entity")?;
        let interaction_type = require_text("interaction_type", &params.interaction_type)?;
        let when = TriggerTime::parse(&params.when)?;

        let input = InteractionInput {
            entity: IdRef::new(entity.into_inner()),
            interaction_type,
            occurred_at: when.to_rfc3339(),
        };

        let interaction = self.client.create_interaction(&input).await?;
        Ok(Ack::added(interaction.id))
    }
}
