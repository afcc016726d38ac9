//! HTTP client for the Folk CRM REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles bearer authentication, the
//! `{data: ...}` envelopes, cursor pagination and error mapping for the Folk API.

mod async_wrapper;
pub use async_wrapper::{AsyncFolkClient, AsyncFolkClientImpl};

use crate::config::Config;
use crate::error::{FolkApiError, FolkApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("folk-mcp-server/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Folk CRM API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct FolkClient {
    base_url: String,
    api_key: String,
    agent: Arc<ureq::Agent>,
    metrics: Metrics,
}

impl FolkClient {
    /// Create a new FolkClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.folk_api_url.clone(),
            config.folk_api_key.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a FolkClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self::build(base_url, api_key, Duration::from_secs(10))
    }

    fn build(base_url: String, api_key: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Perform one authenticated request.
    ///
    /// Returns `None` for `204 No Content` or an empty body.
    fn send(
        &self,
        method: &str,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> FolkApiResult<Option<Value>> {
        let url = self.build_url(path);
        tracing::debug!(method, url = %url, params = query.len(), "Folk API request");

        let mut request = self
            .agent
            .request(method, &url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Accept", "application/json");

        for (key, value) in query {
            request = request.query(key, value);
        }

        let timer = HttpTimer::new(self.metrics.clone());
        let result = match body {
            Some(body) => request
                .set("Content-Type", "application/json")
                .send_json(body),
            None => request.call(),
        };

        let response = match result {
            Ok(response) => {
                timer.complete();
                response
            }
            Err(e) => {
                timer.complete_with_error();
                let error = map_error(e);
                tracing::error!(method, url = %url, "Folk API request failed: {}", error);
                return Err(error);
            }
        };

        tracing::debug!(method, url = %url, status = response.status(), "Folk API response");

        if response.status() == 204 {
            return Ok(None);
        }

        let text = response
            .into_string()
            .map_err(|e| FolkApiError::HttpError(e.to_string()))?;

        if text.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&text)?))
    }

    fn get(&self, path: &str, query: &[(String, String)]) -> FolkApiResult<Option<Value>> {
        self.send("GET", path, query, None)
    }

    fn post(&self, path: &str, body: &Value) -> FolkApiResult<Option<Value>> {
        self.send("POST", path, &[], Some(body))
    }

    fn patch(&self, path: &str, body: &Value) -> FolkApiResult<Option<Value>> {
        self.send("PATCH", path, &[], Some(body))
    }

    fn delete(&self, path: &str) -> FolkApiResult<Option<Value>> {
        self.send("DELETE", path, &[], None)
    }

    // ========================= Generic helpers =========================

    fn fetch_one<T: DeserializeOwned>(&self, path: &str) -> FolkApiResult<T> {
        let record = decode_data(self.get(path, &[])?)?;
        self.metrics.record_fetched(1);
        Ok(record)
    }

    fn fetch_page<T: DeserializeOwned>(&self, path: &str, query: &ListQuery) -> FolkApiResult<Page<T>> {
        let page = match self.get(path, &query.to_query_pairs())? {
            Some(value) => serde_json::from_value::<ListEnvelope<T>>(value)?.into_page(),
            None => Page::empty(),
        };
        self.metrics.record_fetched(page.items.len());
        Ok(page)
    }

    fn create<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> FolkApiResult<T> {
        let body = serde_json::to_value(body)?;
        decode_data(self.post(path, &body)?)
    }

    fn modify<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> FolkApiResult<T> {
        let body = serde_json::to_value(body)?;
        decode_data(self.patch(path, &body)?)
    }

    fn remove(&self, path: &str) -> FolkApiResult<()> {
        self.delete(path)?;
        Ok(())
    }

    // ========================= People =========================

    pub fn list_people(&self, query: &ListQuery) -> FolkApiResult<Page<Person>> {
        self.fetch_page("/people", query)
    }

    pub fn get_person(&self, person_id: &str) -> FolkApiResult<Person> {
        self.fetch_one(&resource_path("people", person_id))
    }

    pub fn create_person(&self, input: &PersonInput) -> FolkApiResult<Person> {
        tracing::info!("Creating person");
        self.create("/people", input)
    }

    pub fn update_person(&self, person_id: &str, input: &PersonInput) -> FolkApiResult<Person> {
        self.modify(&resource_path("people", person_id), input)
    }

    pub fn delete_person(&self, person_id: &str) -> FolkApiResult<()> {
        self.remove(&resource_path("people", person_id))
    }

    // ========================= Companies =========================

    pub fn list_companies(&self, query: &ListQuery) -> FolkApiResult<Page<Company>> {
        self.fetch_page("/companies", query)
    }

    pub fn get_company(&self, company_id: &str) -> FolkApiResult<Company> {
        self.fetch_one(&resource_path("companies", company_id))
    }

    pub fn create_company(&self, input: &CompanyInput) -> FolkApiResult<Company> {
        tracing::info!("Creating company");
        self.create("/companies", input)
    }

    pub fn update_company(&self, company_id: &str, input: &CompanyInput) -> FolkApiResult<Company> {
        self.modify(&resource_path("companies", company_id), input)
    }

    pub fn delete_company(&self, company_id: &str) -> FolkApiResult<()> {
        self.remove(&resource_path("companies", company_id))
    }

    // ========================= Notes =========================

    /// List notes; scope to one entity with [`ListQuery::for_entity`].
    pub fn list_notes(&self, query: &ListQuery) -> FolkApiResult<Page<Note>> {
        self.fetch_page("/notes", query)
    }

    pub fn get_note(&self, note_id: &str) -> FolkApiResult<Note> {
        self.fetch_one(&resource_path("notes", note_id))
    }

    pub fn create_note(&self, input: &NoteInput) -> FolkApiResult<Note> {
        tracing::info!("Creating note for entity: {}", input.entity.id);
        self.create("/notes", input)
    }

    pub fn update_note(&self, note_id: &str, update: &NoteUpdate) -> FolkApiResult<Note> {
        self.modify(&resource_path("notes", note_id), update)
    }

    pub fn delete_note(&self, note_id: &str) -> FolkApiResult<()> {
        self.remove(&resource_path("notes", note_id))
    }

    // ========================= Reminders =========================

    pub fn list_reminders(&self, query: &ListQuery) -> FolkApiResult<Page<Reminder>> {
        self.fetch_page("/reminders", query)
    }

    pub fn get_reminder(&self, reminder_id: &str) -> FolkApiResult<Reminder> {
        self.fetch_one(&resource_path("reminders", reminder_id))
    }

    pub fn create_reminder(&self, input: &ReminderInput) -> FolkApiResult<Reminder> {
        tracing::info!("Creating reminder for entity: {}", input.entity.id);
        self.create("/reminders", input)
    }

    pub fn update_reminder(&self, reminder_id: &str, update: &ReminderUpdate) -> FolkApiResult<Reminder> {
        self.modify(&resource_path("reminders", reminder_id), update)
    }

    pub fn delete_reminder(&self, reminder_id: &str) -> FolkApiResult<()> {
        self.remove(&resource_path("reminders", reminder_id))
    }

    // ========================= Groups, users, deals =========================

    pub fn list_groups(&self, query: &ListQuery) -> FolkApiResult<Page<Group>> {
        self.fetch_page("/groups", query)
    }

    pub fn list_users(&self, query: &ListQuery) -> FolkApiResult<Page<User>> {
        self.fetch_page("/users", query)
    }

    pub fn get_current_user(&self) -> FolkApiResult<User> {
        self.fetch_one("/users/me")
    }

    pub fn get_user(&self, user_id: &str) -> FolkApiResult<User> {
        self.fetch_one(&resource_path("users", user_id))
    }

    /// List the records of a custom object type (e.g. deals) inside a group.
    pub fn list_deals(&self, group_id: &str, object_type: &str, query: &ListQuery) -> FolkApiResult<Page<Deal>> {
        let path = format!(
            "/groups/{}/{}",
            urlencoding::encode(group_id),
            urlencoding::encode(object_type)
        );
        self.fetch_page(&path, query)
    }

    // ========================= Interactions =========================

    pub fn create_interaction(&self, input: &InteractionInput) -> FolkApiResult<Interaction> {
        tracing::info!("Logging {} interaction for entity: {}", input.interaction_type, input.entity.id);
        self.create("/interactions", input)
    }
}

/// `/<collection>/<id>` with the identifier percent-encoded.
fn resource_path(collection: &str, id: &str) -> String {
    format!("/{}/{}", collection, urlencoding::encode(id))
}

/// Unwrap a `{"data": T}` envelope.
fn decode_data<T: DeserializeOwned>(value: Option<Value>) -> FolkApiResult<T> {
    let value = value.ok_or_else(|| FolkApiError::HttpError("Empty response body".to_string()))?;
    Ok(serde_json::from_value::<DataEnvelope<T>>(value)?.data)
}

/// Map a ureq error to a FolkApiError.
fn map_error(error: ureq::Error) -> FolkApiError {
    match error {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            let message = error_message(&body);

            match code {
                404 => FolkApiError::NotFound(message),
                _ => FolkApiError::ApiError {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => {
            let text = transport.to_string();
            match transport.kind() {
                ureq::ErrorKind::Io if is_timeout(&transport, &text) => FolkApiError::Timeout,
                ureq::ErrorKind::ConnectionFailed => {
                    FolkApiError::HttpError(format!("Connection failed: {}", text))
                }
                _ => FolkApiError::HttpError(text),
            }
        }
    }
}

/// A read or write that ran past the agent deadline.
fn is_timeout(transport: &ureq::Transport, text: &str) -> bool {
    let io_kind = std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .map(|e| e.kind());

    matches!(
        io_kind,
        Some(std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock)
    ) || text.contains("timed out")
}

/// Best message from a Folk error body.
///
/// Tries `error.message`, `error` as a string, a top-level `message`, then the
/// raw body.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(error) = value.get("error") {
            if let Some(message) = error.as_str() {
                return message.to_string();
            }
            if let Ok(detail) = serde_json::from_value::<ErrorDetail>(error.clone()) {
                if let Some(request_id) = &detail.request_id {
                    tracing::warn!(request_id = %request_id, "Folk API returned an error");
                }
                if let Some(message) = detail.message {
                    return message;
                }
            }
        }
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}
