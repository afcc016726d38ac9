//! Async wrapper around synchronous FolkClient.
//!
//! This module provides an async interface to the synchronous FolkClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::FolkClient;
use crate::error::{FolkApiError, FolkApiResult};
use crate::models::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Async client operations the tools depend on.
///
/// Implemented by [`AsyncFolkClientImpl`] for the real API and by in-memory
/// mocks in tests.
#[async_trait]
pub trait AsyncFolkClient: Send + Sync {
    async fn list_people(&self, query: &ListQuery) -> FolkApiResult<Page<Person>>;
    async fn get_person(&self, id: &str) -> FolkApiResult<Person>;
    async fn create_person(&self, input: &PersonInput) -> FolkApiResult<Person>;
    async fn update_person(&self, id: &str, input: &PersonInput) -> FolkApiResult<Person>;
    async fn delete_person(&self, id: &str) -> FolkApiResult<()>;

    async fn list_companies(&self, query: &ListQuery) -> FolkApiResult<Page<Company>>;
    async fn get_company(&self, id: &str) -> FolkApiResult<Company>;
    async fn create_company(&self, input: &CompanyInput) -> FolkApiResult<Company>;
    async fn update_company(&self, id: &str, input: &CompanyInput) -> FolkApiResult<Company>;
    async fn delete_company(&self, id: &str) -> FolkApiResult<()>;

    async fn list_notes(&self, query: &ListQuery) -> FolkApiResult<Page<Note>>;
    async fn get_note(&self, id: &str) -> FolkApiResult<Note>;
    async fn create_note(&self, input: &NoteInput) -> FolkApiResult<Note>;
    async fn update_note(&self, id: &str, update: &NoteUpdate) -> FolkApiResult<Note>;
    async fn delete_note(&self, id: &str) -> FolkApiResult<()>;

    async fn list_reminders(&self, query: &ListQuery) -> FolkApiResult<Page<Reminder>>;
    async fn get_reminder(&self, id: &str) -> FolkApiResult<Reminder>;
    async fn create_reminder(&self, input: &ReminderInput) -> FolkApiResult<Reminder>;
    async fn update_reminder(&self, id: &str, update: &ReminderUpdate) -> FolkApiResult<Reminder>;
    async fn delete_reminder(&self, id: &str) -> FolkApiResult<()>;

    async fn list_groups(&self, query: &ListQuery) -> FolkApiResult<Page<Group>>;

    async fn list_users(&self, query: &ListQuery) -> FolkApiResult<Page<User>>;
    async fn get_current_user(&self) -> FolkApiResult<User>;
    async fn get_user(&self, id: &str) -> FolkApiResult<User>;

    async fn list_deals(
        &self,
        group_id: &str,
        object_type: &str,
        query: &ListQuery,
    ) -> FolkApiResult<Page<Deal>>;

    async fn create_interaction(&self, input: &InteractionInput) -> FolkApiResult<Interaction>;
}

/// Async wrapper around synchronous FolkClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncFolkClientImpl {
    client: Arc<FolkClient>,
}

impl AsyncFolkClientImpl {
    pub fn new(client: FolkClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Run a blocking client call on the blocking pool.
    async fn run<T, F>(&self, op: F) -> FolkApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&FolkClient) -> FolkApiResult<T> + Send + 'static,
    {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || op(&client))
            .await
            .map_err(|e| FolkApiError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl AsyncFolkClient for AsyncFolkClientImpl {
    async fn list_people(&self, query: &ListQuery) -> FolkApiResult<Page<Person>> {
        let query = query.clone();
        self.run(move |c| c.list_people(&query)).await
    }

    async fn get_person(&self, id: &str) -> FolkApiResult<Person> {
        let id = id.to_string();
        self.run(move |c| c.get_person(&id)).await
    }

    async fn create_person(&self, input: &PersonInput) -> FolkApiResult<Person> {
        let input = input.clone();
        self.run(move |c| c.create_person(&input)).await
    }

    async fn update_person(&self, id: &str, input: &PersonInput) -> FolkApiResult<Person> {
        let id = id.to_string();
        let input = input.clone();
        self.run(move |c| c.update_person(&id, &input)).await
    }

    async fn delete_person(&self, id: &str) -> FolkApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.delete_person(&id)).await
    }

    async fn list_companies(&self, query: &ListQuery) -> FolkApiResult<Page<Company>> {
        let query = query.clone();
        self.run(move |c| c.list_companies(&query)).await
    }

    async fn get_company(&self, id: &str) -> FolkApiResult<Company> {
        let id = id.to_string();
        self.run(move |c| c.get_company(&id)).await
    }

    async fn create_company(&self, input: &CompanyInput) -> FolkApiResult<Company> {
        let input = input.clone();
        self.run(move |c| c.create_company(&input)).await
    }

    async fn update_company(&self, id: &str, input: &CompanyInput) -> FolkApiResult<Company> {
        let id = id.to_string();
        let input = input.clone();
        self.run(move |c| c.update_company(&id, &input)).await
    }

    async fn delete_company(&self, id: &str) -> FolkApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.delete_company(&id)).await
    }

    async fn list_notes(&self, query: &ListQuery) -> FolkApiResult<Page<Note>> {
        let query = query.clone();
        self.run(move |c| c.list_notes(&query)).await
    }

    async fn get_note(&self, id: &str) -> FolkApiResult<Note> {
        let id = id.to_string();
        self.run(move |c| c.get_note(&id)).await
    }

    async fn create_note(&self, input: &NoteInput) -> FolkApiResult<Note> {
        let input = input.clone();
        self.run(move |c| c.create_note(&input)).await
    }

    async fn update_note(&self, id: &str, update: &NoteUpdate) -> FolkApiResult<Note> {
        let id = id.to_string();
        let update = update.clone();
        self.run(move |c| c.update_note(&id, &update)).await
    }

    async fn delete_note(&self, id: &str) -> FolkApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.delete_note(&id)).await
    }

    async fn list_reminders(&self, query: &ListQuery) -> FolkApiResult<Page<Reminder>> {
        let query = query.clone();
        self.run(move |c| c.list_reminders(&query)).await
    }

    async fn get_reminder(&self, id: &str) -> FolkApiResult<Reminder> {
        let id = id.to_string();
        self.run(move |c| c.get_reminder(&id)).await
    }

    async fn create_reminder(&self, input: &ReminderInput) -> FolkApiResult<Reminder> {
        let input = input.clone();
        self.run(move |c| c.create_reminder(&input)).await
    }

    async fn update_reminder(&self, id: &str, update: &ReminderUpdate) -> FolkApiResult<Reminder> {
        let id = id.to_string();
        let update = update.clone();
        self.run(move |c| c.update_reminder(&id, &update)).await
    }

    async fn delete_reminder(&self, id: &str) -> FolkApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.delete_reminder(&id)).await
    }

    async fn list_groups(&self, query: &ListQuery) -> FolkApiResult<Page<Group>> {
        let query = query.clone();
        self.run(move |c| c.list_groups(&query)).await
    }

    async fn list_users(&self, query: &ListQuery) -> FolkApiResult<Page<User>> {
        let query = query.clone();
        self.run(move |c| c.list_users(&query)).await
    }

    async fn get_current_user(&self) -> FolkApiResult<User> {
        self.run(|c| c.get_current_user()).await
    }

    async fn get_user(&self, id: &str) -> FolkApiResult<User> {
        let id = id.to_string();
        self.run(move |c| c.get_user(&id)).await
    }

    async fn list_deals(
        &self,
        group_id: &str,
        object_type: &str,
        query: &ListQuery,
    ) -> FolkApiResult<Page<Deal>> {
        let group_id = group_id.to_string();
        let object_type = object_type.to_string();
        let query = query.clone();
        self.run(move |c| c.list_deals(&group_id, &object_type, &query))
            .await
    }

    async fn create_interaction(&self, input: &InteractionInput) -> FolkApiResult<Interaction> {
        let input = input.clone();
        self.run(move |c| c.create_interaction(&input)).await
    }
}
