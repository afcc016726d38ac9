use async_trait::async_trait;
use folk_mcp_server::client::AsyncFolkClient;
use folk_mcp_server::error::{FolkApiError, FolkApiResult};
use folk_mcp_server::models::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Well-formed Folk ID for a prefix and sequence number.
#[allow(dead_code)]
pub fn folk_id(prefix: &str, n: u64) -> String {
    format!("{}_{:08x}-0000-4000-8000-{:012x}", prefix, n, n)
}

#[derive(Default)]
struct Store {
    next_id: u64,
    people: Vec<Person>,
    companies: Vec<Company>,
    notes: Vec<Note>,
    reminders: Vec<Reminder>,
    groups: Vec<Group>,
    users: Vec<User>,
    current_user: Option<User>,
    deals: HashMap<(String, String), Vec<Deal>>,
    interactions: Vec<Interaction>,
    reminder_inputs: Vec<ReminderInput>,
    queries: Vec<ListQuery>,
    failure: Option<(u16, String)>,
    stuck_group_cursor: Option<String>,
}

impl Store {
    fn next(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        folk_id(prefix, self.next_id)
    }
}

/// In-memory stand-in for the Folk API.
///
/// Listings page by offset (the cursor is the next offset) and honour the
/// `like`, group and custom field filters the tools send.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockFolkClient {
    store: Arc<Mutex<Store>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockFolkClient {
    pub fn new() -> Self {
        let client = Self {
            store: Arc::new(Mutex::new(Store::default())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        };
        client.set_current_user(User {
            id: folk_id("usr", 0xfeed),
            full_name: "Test User".to_string(),
            email: "me@example.com".to_string(),
        });
        client
    }

    pub fn set_current_user(&self, user: User) {
        let mut store = self.store.lock().unwrap();
        store.users.retain(|u| u.id != user.id);
        store.users.push(user.clone());
        store.current_user = Some(user);
    }

    pub fn add_person(&self, person: Person) {
        self.store.lock().unwrap().people.push(person);
    }

    pub fn add_company(&self, company: Company) {
        self.store.lock().unwrap().companies.push(company);
    }

    pub fn add_group(&self, group: Group) {
        self.store.lock().unwrap().groups.push(group);
    }

    pub fn add_deal(&self, group_id: &str, object_type: &str, deal: Deal) {
        self.store
            .lock()
            .unwrap()
            .deals
            .entry((group_id.to_string(), object_type.to_string()))
            .or_default()
            .push(deal);
    }

    /// Seed `count` people named "Person 1", "Person 2", ...
    pub fn seed_people(&self, count: u64) -> Vec<Person> {
        let mut store = self.store.lock().unwrap();
        (1..=count)
            .map(|n| {
                let person = Person {
                    id: store.next("per"),
                    first_name: Some("Person".to_string()),
                    last_name: Some(n.to_string()),
                    full_name: Some(format!("Person {}", n)),
                    ..Default::default()
                };
                store.people.push(person.clone());
                person
            })
            .collect()
    }

    /// Every call after this fails with the given API error.
    pub fn fail_with(&self, status: u16, message: &str) {
        self.store.lock().unwrap().failure = Some((status, message.to_string()));
    }

    /// Group listings always point at this cursor, as a misbehaving API might.
    pub fn repeat_group_cursor(&self, cursor: &str) {
        self.store.lock().unwrap().stuck_group_cursor = Some(cursor.to_string());
    }

    pub fn reminder_inputs(&self) -> Vec<ReminderInput> {
        self.store.lock().unwrap().reminder_inputs.clone()
    }

    pub fn last_query(&self) -> Option<ListQuery> {
        self.store.lock().unwrap().queries.last().cloned()
    }

    pub fn interactions(&self) -> Vec<Interaction> {
        self.store.lock().unwrap().interactions.clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> FolkApiResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        match &self.store.lock().unwrap().failure {
            Some((status, message)) => Err(FolkApiError::ApiError {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn record_query(&self, query: &ListQuery) {
        self.store.lock().unwrap().queries.push(query.clone());
    }
}

impl Default for MockFolkClient {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(kind: &str, id: &str) -> FolkApiError {
    FolkApiError::NotFound(format!("{} {} not found", kind, id))
}

/// Slice a filtered listing the way Folk's cursors would.
fn paginate<T: Clone>(items: Vec<T>, query: &ListQuery) -> Page<T> {
    let start: usize = query
        .cursor
        .as_deref()
        .and_then(|c| c.parse().ok())
        .unwrap_or(0)
        .min(items.len());
    let end = (start + query.limit as usize).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        next_cursor: (end < items.len()).then(|| end.to_string()),
    }
}

fn field_value<'a>(custom: &'a serde_json::Map<String, Value>, path: &str) -> Option<&'a Value> {
    let (group_id, field) = path.split_once('.')?;
    custom.get(group_id)?.get(field)
}

/// Whether a record passes one `filter[...]` parameter.
fn passes(filter: &Filter, name: &str, groups: &[GroupReference], custom: &serde_json::Map<String, Value>) -> bool {
    let key = filter.key();
    let value = filter.value();

    if key.ends_with("[like]") {
        return name.to_lowercase().contains(&value.to_lowercase());
    }
    if key == "filter[groups][in][id]" {
        return groups.iter().any(|g| g.id == value);
    }
    if let Some(path) = key
        .strip_prefix("filter[customFieldValues.")
        .and_then(|rest| rest.strip_suffix("][in]"))
    {
        return field_value(custom, path).and_then(Value::as_str) == Some(value);
    }
    true
}

fn person_from_input(id: String, input: &PersonInput) -> Person {
    let mut person = Person {
        id,
        ..Default::default()
    };
    apply_person(&mut person, input);
    person
}

fn apply_person(person: &mut Person, input: &PersonInput) {
    if let Some(v) = &input.first_name {
        person.first_name = Some(v.clone());
    }
    if let Some(v) = &input.last_name {
        person.last_name = Some(v.clone());
    }
    if let Some(v) = &input.emails {
        person.emails = v.clone();
    }
    if let Some(v) = &input.phones {
        person.phones = v.clone();
    }
    if let Some(v) = &input.job_title {
        person.job_title = Some(v.clone());
    }
    if let Some(v) = &input.description {
        person.description = Some(v.clone());
    }
    person.full_name = Some(person.display_name());
}

fn apply_company(company: &mut Company, input: &CompanyInput) {
    if let Some(v) = &input.name {
        company.name = Some(v.clone());
    }
    if let Some(v) = &input.description {
        company.description = Some(v.clone());
    }
    if let Some(v) = &input.industry {
        company.industry = Some(v.clone());
    }
    if let Some(v) = &input.urls {
        company.urls = v.clone();
    }
}

fn entity_ref(id: &str) -> EntityReference {
    EntityReference {
        id: id.to_string(),
        entity_type: None,
        full_name: None,
    }
}

#[async_trait]
impl AsyncFolkClient for MockFolkClient {
    async fn list_people(&self, query: &ListQuery) -> FolkApiResult<Page<Person>> {
        self.track_call("list_people")?;
        self.record_query(query);
        let store = self.store.lock().unwrap();
        let matching: Vec<Person> = store
            .people
            .iter()
            .filter(|p| {
                query.filters.iter().all(|f| {
                    passes(f, &p.display_name(), &p.groups, &p.custom_field_values)
                })
            })
            .cloned()
            .collect();
        Ok(paginate(matching, query))
    }

    async fn get_person(&self, id: &str) -> FolkApiResult<Person> {
        self.track_call("get_person")?;
        let store = self.store.lock().unwrap();
        store
            .people
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("Person", id))
    }

    async fn create_person(&self, input: &PersonInput) -> FolkApiResult<Person> {
        self.track_call("create_person")?;
        let mut store = self.store.lock().unwrap();
        let id = store.next("per");
        let person = person_from_input(id, input);
        store.people.push(person.clone());
        Ok(person)
    }

    async fn update_person(&self, id: &str, input: &PersonInput) -> FolkApiResult<Person> {
        self.track_call("update_person")?;
        let mut store = self.store.lock().unwrap();
        let person = store
            .people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("Person", id))?;
        apply_person(person, input);
        Ok(person.clone())
    }

    async fn delete_person(&self, id: &str) -> FolkApiResult<()> {
        self.track_call("delete_person")?;
        let mut store = self.store.lock().unwrap();
        let before = store.people.len();
        store.people.retain(|p| p.id != id);
        if store.people.len() == before {
            return Err(not_found("Person", id));
        }
        Ok(())
    }

    async fn list_companies(&self, query: &ListQuery) -> FolkApiResult<Page<Company>> {
        self.track_call("list_companies")?;
        self.record_query(query);
        let store = self.store.lock().unwrap();
        let matching: Vec<Company> = store
            .companies
            .iter()
            .filter(|c| {
                let name = c.name.clone().unwrap_or_default();
                query
                    .filters
                    .iter()
                    .all(|f| passes(f, &name, &c.groups, &c.custom_field_values))
            })
            .cloned()
            .collect();
        Ok(paginate(matching, query))
    }

    async fn get_company(&self, id: &str) -> FolkApiResult<Company> {
        self.track_call("get_company")?;
        let store = self.store.lock().unwrap();
        store
            .companies
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("Company", id))
    }

    async fn create_company(&self, input: &CompanyInput) -> FolkApiResult<Company> {
        self.track_call("create_company")?;
        let mut store = self.store.lock().unwrap();
        let mut company = Company {
            id: store.next("com"),
            ..Default::default()
        };
        apply_company(&mut company, input);
        store.companies.push(company.clone());
        Ok(company)
    }

    async fn update_company(&self, id: &str, input: &CompanyInput) -> FolkApiResult<Company> {
        self.track_call("update_company")?;
        let mut store = self.store.lock().unwrap();
        let company = store
            .companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Company", id))?;
        apply_company(company, input);
        Ok(company.clone())
    }

    async fn delete_company(&self, id: &str) -> FolkApiResult<()> {
        self.track_call("delete_company")?;
        let mut store = self.store.lock().unwrap();
        let before = store.companies.len();
        store.companies.retain(|c| c.id != id);
        if store.companies.len() == before {
            return Err(not_found("Company", id));
        }
        Ok(())
    }

    async fn list_notes(&self, query: &ListQuery) -> FolkApiResult<Page<Note>> {
        self.track_call("list_notes")?;
        self.record_query(query);
        let store = self.store.lock().unwrap();
        let matching: Vec<Note> = store
            .notes
            .iter()
            .filter(|n| match &query.entity_id {
                Some(entity_id) => n.entity.as_ref().map(|e| &e.id) == Some(entity_id),
                None => true,
            })
            .cloned()
            .collect();
        Ok(paginate(matching, query))
    }

    async fn get_note(&self, id: &str) -> FolkApiResult<Note> {
        self.track_call("get_note")?;
        let store = self.store.lock().unwrap();
        store
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| not_found("Note", id))
    }

    async fn create_note(&self, input: &NoteInput) -> FolkApiResult<Note> {
        self.track_call("create_note")?;
        let mut store = self.store.lock().unwrap();
        let note = Note {
            id: store.next("nte"),
            entity: Some(entity_ref(&input.entity.id)),
            content: input.content.clone(),
            visibility: input.visibility,
            ..Default::default()
        };
        store.notes.push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: &str, update: &NoteUpdate) -> FolkApiResult<Note> {
        self.track_call("update_note")?;
        let mut store = self.store.lock().unwrap();
        let note = store
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| not_found("Note", id))?;
        if let Some(content) = &update.content {
            note.content = content.clone();
        }
        if let Some(visibility) = update.visibility {
            note.visibility = visibility;
        }
        Ok(note.clone())
    }

    async fn delete_note(&self, id: &str) -> FolkApiResult<()> {
        self.track_call("delete_note")?;
        let mut store = self.store.lock().unwrap();
        let before = store.notes.len();
        store.notes.retain(|n| n.id != id);
        if store.notes.len() == before {
            return Err(not_found("Note", id));
        }
        Ok(())
    }

    async fn list_reminders(&self, query: &ListQuery) -> FolkApiResult<Page<Reminder>> {
        self.track_call("list_reminders")?;
        self.record_query(query);
        let store = self.store.lock().unwrap();
        let matching: Vec<Reminder> = store
            .reminders
            .iter()
            .filter(|r| match &query.entity_id {
                Some(entity_id) => r.entity.as_ref().map(|e| &e.id) == Some(entity_id),
                None => true,
            })
            .cloned()
            .collect();
        Ok(paginate(matching, query))
    }

    async fn get_reminder(&self, id: &str) -> FolkApiResult<Reminder> {
        self.track_call("get_reminder")?;
        let store = self.store.lock().unwrap();
        store
            .reminders
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found("Reminder", id))
    }

    async fn create_reminder(&self, input: &ReminderInput) -> FolkApiResult<Reminder> {
        self.track_call("create_reminder")?;
        let mut store = self.store.lock().unwrap();
        store.reminder_inputs.push(input.clone());
        let reminder = Reminder {
            id: store.next("rem"),
            name: input.name.clone(),
            entity: Some(entity_ref(&input.entity.id)),
            recurrence_rule: Some(input.recurrence_rule.clone()),
            visibility: input.visibility,
            assigned_users: input
                .assigned_users
                .iter()
                .map(|u| UserReference {
                    id: u.id.clone(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        store.reminders.push(reminder.clone());
        Ok(reminder)
    }

    async fn update_reminder(&self, id: &str, update: &ReminderUpdate) -> FolkApiResult<Reminder> {
        self.track_call("update_reminder")?;
        let mut store = self.store.lock().unwrap();
        let reminder = store
            .reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found("Reminder", id))?;
        if let Some(name) = &update.name {
            reminder.name = name.clone();
        }
        if let Some(rule) = &update.recurrence_rule {
            reminder.recurrence_rule = Some(rule.clone());
        }
        if let Some(visibility) = update.visibility {
            reminder.visibility = visibility;
        }
        Ok(reminder.clone())
    }

    async fn delete_reminder(&self, id: &str) -> FolkApiResult<()> {
        self.track_call("delete_reminder")?;
        let mut store = self.store.lock().unwrap();
        let before = store.reminders.len();
        store.reminders.retain(|r| r.id != id);
        if store.reminders.len() == before {
            return Err(not_found("Reminder", id));
        }
        Ok(())
    }

    async fn list_groups(&self, query: &ListQuery) -> FolkApiResult<Page<Group>> {
        self.track_call("list_groups")?;
        self.record_query(query);
        let store = self.store.lock().unwrap();
        let mut page = paginate(store.groups.clone(), query);
        if let Some(cursor) = &store.stuck_group_cursor {
            page.next_cursor = Some(cursor.clone());
        }
        Ok(page)
    }

    async fn list_users(&self, query: &ListQuery) -> FolkApiResult<Page<User>> {
        self.track_call("list_users")?;
        self.record_query(query);
        let store = self.store.lock().unwrap();
        Ok(paginate(store.users.clone(), query))
    }

    async fn get_current_user(&self) -> FolkApiResult<User> {
        self.track_call("get_current_user")?;
        let store = self.store.lock().unwrap();
        store
            .current_user
            .clone()
            .ok_or_else(|| not_found("User", "me"))
    }

    async fn get_user(&self, id: &str) -> FolkApiResult<User> {
        self.track_call("get_user")?;
        let store = self.store.lock().unwrap();
        store
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| not_found("User", id))
    }

    async fn list_deals(
        &self,
        group_id: &str,
        object_type: &str,
        query: &ListQuery,
    ) -> FolkApiResult<Page<Deal>> {
        self.track_call("list_deals")?;
        self.record_query(query);
        let store = self.store.lock().unwrap();
        let deals = store
            .deals
            .get(&(group_id.to_string(), object_type.to_string()))
            .cloned()
            .ok_or_else(|| not_found("Group", group_id))?;
        Ok(paginate(deals, query))
    }

    async fn create_interaction(&self, input: &InteractionInput) -> FolkApiResult<Interaction> {
        self.track_call("create_interaction")?;
        let mut store = self.store.lock().unwrap();
        let interaction = Interaction {
            id: store.next("int"),
            entity_id: input.entity.id.clone(),
            interaction_type: input.interaction_type.clone(),
            occurred_at: input.occurred_at.clone(),
        };
        store.interactions.push(interaction.clone());
        Ok(interaction)
    }
}
