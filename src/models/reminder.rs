//! Reminder model and request bodies.

use super::common::{EntityReference, IdRef, UserReference, Visibility};
use serde::{Deserialize, Serialize};

/// A reminder in Folk.
///
/// Scheduling is carried in `recurrence_rule` as an iCalendar
/// `DTSTART`/`RRULE` pair; Folk computes the trigger times from it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub name: String,
    pub entity: Option<EntityReference>,
    pub recurrence_rule: Option<String>,
    pub visibility: Visibility,
    pub assigned_users: Vec<UserReference>,
    pub next_trigger_time: Option<String>,
    pub last_trigger_time: Option<String>,
    pub created_by: Option<UserReference>,
    pub created_at: Option<String>,
}

/// Request body for `POST /reminders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderInput {
    pub entity: IdRef,
    pub name: String,
    pub recurrence_rule: String,
    pub visibility: Visibility,
    /// Folk requires at least one assignee on public reminders
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assigned_users: Vec<IdRef>,
}

impl ReminderInput {
    /// Public reminders need an assignee before they are sent.
    pub fn needs_assignee(&self) -> bool {
        self.visibility == Visibility::Public && self.assigned_users.is_empty()
    }
}

/// Request body for `PATCH /reminders/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_users: Option<Vec<IdRef>>,
}

impl ReminderUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
