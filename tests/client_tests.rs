//! Integration tests for the FolkClient using mockito for HTTP mocking.

use folk_mcp_server::models::{
    Filter, IdRef, ListQuery, NoteInput, PersonInput, ReminderInput, Visibility,
};
use folk_mcp_server::{Config, FolkApiError, FolkClient};
use mockito::{Matcher, Server};
use std::net::TcpListener;

const PERSON_ID: &str = "per_183ed5cc-3182-45de-84d1-d520f2604810";

fn client(server: &Server) -> FolkClient {
    FolkClient::with_base_url(server.url(), "test-api-key".to_string())
}

#[test]
fn test_list_people_sends_filters_and_reads_cursor() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/people")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("combinator".into(), "and".into()),
            Matcher::UrlEncoded("filter[fullName][like]".into(), "john".into()),
        ]))
        .match_header("authorization", "Bearer test-api-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "data": {
                "items": [{
                    "id": "per_183ed5cc-3182-45de-84d1-d520f2604810",
                    "firstName": "John",
                    "lastName": "Doe",
                    "fullName": "John Doe",
                    "emails": ["john@example.com"]
                }],
                "pagination": {
                    "nextLink": "https://api.folk.app/v1/people?limit=10&cursor=eyJvZmZzZXQiOjEwfQ%3D%3D"
                }
            }
        }"#,
        )
        .create();

    let query = ListQuery::new(10).filter(Filter::like("fullName", "john"));
    let page = client(&server).list_people(&query).unwrap();

    mock.assert();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].display_name(), "John Doe");
    assert_eq!(page.next_cursor.as_deref(), Some("eyJvZmZzZXQiOjEwfQ=="));
}

#[test]
fn test_list_without_filters_omits_combinator() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/groups")
        .match_query(Matcher::Exact("limit=100&cursor=abc".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"items": [{"id": "grp_1", "name": "Clients"}], "pagination": {}}}"#)
        .create();

    let query = ListQuery::new(100).with_cursor(Some("abc".to_string()));
    let page = client(&server).list_groups(&query).unwrap();

    mock.assert();
    assert_eq!(page.items[0].name, "Clients");
    assert!(!page.has_more());
}

#[test]
fn test_list_notes_scoped_to_entity() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/notes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "20".into()),
            Matcher::UrlEncoded("entity.id".into(), PERSON_ID.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {"items": [{
                "id": "nte_1",
                "entity": {"id": "per_183ed5cc-3182-45de-84d1-d520f2604810", "entityType": "person"},
                "content": "Met at the conference",
                "visibility": "private"
            }]}}"#,
        )
        .create();

    let page = client(&server)
        .list_notes(&ListQuery::new(20).for_entity(PERSON_ID))
        .unwrap();

    mock.assert();
    assert_eq!(page.items[0].content, "Met at the conference");
    assert_eq!(page.items[0].visibility, Visibility::Private);
}

#[test]
fn test_get_person_unwraps_data_envelope() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", format!("/people/{}", PERSON_ID).as_str())
        .match_header("authorization", "Bearer test-api-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {
                "id": "per_183ed5cc-3182-45de-84d1-d520f2604810",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "jobTitle": "Analyst",
                "groups": [{"id": "grp_1", "name": "Clients"}]
            }}"#,
        )
        .create();

    let person = client(&server).get_person(PERSON_ID).unwrap();

    mock.assert();
    assert_eq!(person.id, PERSON_ID);
    assert_eq!(person.job_title.as_deref(), Some("Analyst"));
    assert_eq!(person.groups[0].name, "Clients");
}

#[test]
fn test_create_person_posts_camel_case_body() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/people")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "firstName": "Ada",
            "emails": ["ada@example.com"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {"id": "per_183ed5cc-3182-45de-84d1-d520f2604810", "firstName": "Ada", "emails": ["ada@example.com"]}}"#,
        )
        .create();

    let input = PersonInput {
        first_name: Some("Ada".to_string()),
        emails: Some(vec!["ada@example.com".to_string()]),
        ..Default::default()
    };
    let person = client(&server).create_person(&input).unwrap();

    mock.assert();
    assert_eq!(person.id, PERSON_ID);
}

#[test]
fn test_update_person_patches_only_given_fields() {
    let mut server = Server::new();

    let mock = server
        .mock("PATCH", format!("/people/{}", PERSON_ID).as_str())
        .match_body(Matcher::Json(serde_json::json!({"jobTitle": "CTO"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {"id": "per_183ed5cc-3182-45de-84d1-d520f2604810", "jobTitle": "CTO"}}"#,
        )
        .create();

    let input = PersonInput {
        job_title: Some("CTO".to_string()),
        ..Default::default()
    };
    let person = client(&server).update_person(PERSON_ID, &input).unwrap();

    mock.assert();
    assert_eq!(person.job_title.as_deref(), Some("CTO"));
}

#[test]
fn test_delete_accepts_no_content() {
    let mut server = Server::new();

    let mock = server
        .mock("DELETE", format!("/people/{}", PERSON_ID).as_str())
        .with_status(204)
        .create();

    let result = client(&server).delete_person(PERSON_ID);

    mock.assert();
    assert!(result.is_ok());
}

#[test]
fn test_create_note_body() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/notes")
        .match_body(Matcher::Json(serde_json::json!({
            "entity": {"id": PERSON_ID},
            "content": "Follow up next week",
            "visibility": "public"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {"id": "nte_1", "content": "Follow up next week", "visibility": "public"}}"#,
        )
        .create();

    let input = NoteInput::new(PERSON_ID, "Follow up next week", Visibility::Public);
    let note = client(&server).create_note(&input).unwrap();

    mock.assert();
    assert_eq!(note.id, "nte_1");
}

#[test]
fn test_create_reminder_body() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/reminders")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "entity": {"id": PERSON_ID},
            "name": "Call back",
            "recurrenceRule": "DTSTART;TZID=UTC:20260128T090000\nRRULE:FREQ=DAILY;COUNT=1",
            "visibility": "public",
            "assignedUsers": [{"id": "usr_1"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"id": "rem_1", "name": "Call back", "visibility": "public"}}"#)
        .create();

    let input = ReminderInput {
        entity: IdRef::new(PERSON_ID),
        name: "Call back".to_string(),
        recurrence_rule: "DTSTART;TZID=UTC:20260128T090000\nRRULE:FREQ=DAILY;COUNT=1".to_string(),
        visibility: Visibility::Public,
        assigned_users: vec![IdRef::new("usr_1")],
    };
    let reminder = client(&server).create_reminder(&input).unwrap();

    mock.assert();
    assert_eq!(reminder.name, "Call back");
}

#[test]
fn test_get_current_user() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/users/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"id": "usr_1", "fullName": "Test User", "email": "me@example.com"}}"#)
        .create();

    let user = client(&server).get_current_user().unwrap();

    mock.assert();
    assert_eq!(user.full_name, "Test User");
    assert_eq!(user.email, "me@example.com");
}

#[test]
fn test_list_deals_path() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/groups/grp_1/Deals")
        .match_query(Matcher::UrlEncoded("limit".into(), "20".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"items": [{"id": "obj_1", "name": "Big deal"}]}}"#)
        .create();

    let page = client(&server)
        .list_deals("grp_1", "Deals", &ListQuery::default())
        .unwrap();

    mock.assert();
    assert_eq!(page.items[0].name, "Big deal");
}

#[test]
fn test_not_found_maps_to_not_found() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", format!("/people/{}", PERSON_ID).as_str())
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"code": "NOT_FOUND", "message": "Person not found"}}"#)
        .create();

    match client(&server).get_person(PERSON_ID) {
        Err(FolkApiError::NotFound(message)) => assert_eq!(message, "Person not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_validation_error_keeps_status_and_message() {
    let mut server = Server::new();

    let _mock = server
        .mock("POST", "/people")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "emails[0] must be a valid email", "requestId": "req_1"}}"#)
        .create();

    let err = client(&server)
        .create_person(&PersonInput {
            first_name: Some("Ada".to_string()),
            ..Default::default()
        })
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert!(err.to_string().contains("emails[0] must be a valid email"));
}

#[test]
fn test_plain_text_error_body() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream exploded")
        .create();

    let err = client(&server).list_users(&ListQuery::default()).unwrap_err();

    match err {
        FolkApiError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[test]
fn test_metrics_count_requests_and_errors() {
    let mut server = Server::new();

    let _ok = server
        .mock("GET", "/users/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"id": "usr_1", "fullName": "Test User", "email": "me@example.com"}}"#)
        .create();
    let _missing = server
        .mock("GET", format!("/people/{}", PERSON_ID).as_str())
        .with_status(404)
        .create();

    let client = client(&server);
    client.get_current_user().unwrap();
    let _ = client.get_person(PERSON_ID);

    assert_eq!(client.metrics().http_requests_total(), 2);
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_silent_server_maps_to_timeout() {
    // Connections complete in the backlog but nothing ever answers
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = Config {
        folk_api_url: format!("http://{}", listener.local_addr().unwrap()),
        folk_api_key: "test-api-key".to_string(),
        request_timeout: 1,
        ..Default::default()
    };
    let client = FolkClient::new(&config);

    let err = client.get_current_user().unwrap_err();

    assert!(matches!(err, FolkApiError::Timeout), "got {:?}", err);
    assert_eq!(err.status(), None);
    assert_eq!(client.metrics().http_errors_total(), 1);
    drop(listener);
}
