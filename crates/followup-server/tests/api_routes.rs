//! End-to-end route tests: the axum app over a fake Drive backend.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use common::{FakeDrive, spawn_fake_drive, test_config};
use followup_server::{app, state::AppState};
use serde_json::{Value, json};
use std::sync::Arc;

async fn test_server(rate_max_writes: u32) -> (TestServer, Arc<FakeDrive>) {
    let drive = Arc::new(FakeDrive::default());
    let base = spawn_fake_drive(drive.clone()).await;
    let state = Arc::new(AppState::new(test_config(&base, rate_max_writes)));
    (TestServer::new(app(state)).unwrap(), drive)
}

#[tokio::test]
async fn health_reports_ok() {
    let (server, _drive) = test_server(30).await;
    let response = server.get("/api/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn tasks_list_is_sorted_by_due_date_with_undated_last() {
    let (server, _drive) = test_server(30).await;
    let soon = (Utc::now() + Duration::days(1)).to_rfc3339();
    let later = (Utc::now() + Duration::days(5)).to_rfc3339();

    for body in [
        json!({"title": "later", "dueAt": later}),
        json!({"title": "undated"}),
        json!({"title": "soon", "dueAt": soon}),
    ] {
        let response = server.post("/api/tasks").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let tasks = server.get("/api/tasks").await.json::<Vec<Value>>();
    let titles: Vec<_> = tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["soon", "later", "undated"]);
}

#[tokio::test]
async fn task_with_unknown_contact_is_rejected_without_a_write() {
    let (server, drive) = test_server(30).await;

    let response = server
        .post("/api/tasks")
        .json(&json!({
            "title": "Orphan",
            "contactId": "11111111-2222-3333-4444-555555555555"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // The backing document still holds no tasks.
    let stored: Value = serde_json::from_str(&drive.content().unwrap()).unwrap();
    assert_eq!(stored["tasks"], json!([]));
}

#[tokio::test]
async fn blank_title_is_a_validation_error() {
    let (server, _drive) = test_server(30).await;
    let response = server.post("/api/tasks").json(&json!({"title": "  "})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn rate_gate_rejects_after_the_window_limit() {
    let (server, _drive) = test_server(2).await;

    for _ in 0..2 {
        let response = server
            .post("/api/tasks")
            .json(&json!({"title": "Allowed"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = server
        .post("/api/tasks")
        .json(&json!({"title": "Throttled"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn task_update_and_delete_flow() {
    let (server, _drive) = test_server(30).await;

    let created = server
        .post("/api/tasks")
        .json(&json!({"title": "Toggle me"}))
        .await
        .json::<Value>();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["status"], "open");

    let updated = server
        .patch(&format!("/api/tasks/{id}"))
        .json(&json!({"status": "done"}))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(updated.json::<Value>()["status"], "done");

    // Snooze: reschedule the due date.
    let due = (Utc::now() + Duration::days(7)).to_rfc3339();
    let snoozed = server
        .patch(&format!("/api/tasks/{id}"))
        .json(&json!({"dueAt": due}))
        .await;
    assert_eq!(snoozed.status_code(), StatusCode::OK);
    assert!(snoozed.json::<Value>()["dueAt"].is_string());

    let missing = server
        .patch("/api/tasks/99999999-9999-9999-9999-999999999999")
        .json(&json!({"status": "done"}))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let deleted = server.delete(&format!("/api/tasks/{id}")).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let tasks = server.get("/api/tasks").await.json::<Vec<Value>>();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn logging_an_interaction_touches_the_contact() {
    let (server, _drive) = test_server(30).await;

    let contact = server
        .post("/api/contacts")
        .json(&json!({"name": "Ada Lovelace", "email": "ada@example.com"}))
        .await
        .json::<Value>();
    let contact_id = contact["id"].as_str().unwrap().to_string();
    assert!(contact["lastTouchedAt"].is_null());

    let response = server
        .post("/api/interactions")
        .json(&json!({
            "contactId": contact_id,
            "channel": "email",
            "direction": "outbound",
            "summary": "Sent the intro note",
            "outcome": "positive"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let contact = server
        .get(&format!("/api/contacts/{contact_id}"))
        .await
        .json::<Value>();
    assert!(contact["lastTouchedAt"].is_string());

    let interactions = server
        .get(&format!("/api/contacts/{contact_id}/interactions"))
        .await
        .json::<Vec<Value>>();
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0]["outcome"], "positive");
}

#[tokio::test]
async fn contact_update_merges_fields() {
    let (server, _drive) = test_server(30).await;

    let contact = server
        .post("/api/contacts")
        .json(&json!({"name": "Grace", "company": "Navy"}))
        .await
        .json::<Value>();
    let id = contact["id"].as_str().unwrap().to_string();

    let updated = server
        .patch(&format!("/api/contacts/{id}"))
        .json(&json!({"status": "waiting", "tags": ["vip"]}))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);

    let body = updated.json::<Value>();
    assert_eq!(body["status"], "waiting");
    assert_eq!(body["company"], "Navy");
    assert_eq!(body["tags"], json!(["vip"]));
}

#[tokio::test]
async fn invalid_contact_email_is_rejected() {
    let (server, _drive) = test_server(30).await;
    let response = server
        .post("/api/contacts")
        .json(&json!({"name": "Ada", "email": "not-an-email"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(
        response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .contains("email")
    );
}

#[tokio::test]
async fn parse_date_resolves_or_returns_null() {
    let (server, _drive) = test_server(30).await;

    let response = server
        .get("/api/parse-date")
        .add_query_param("q", "tomorrow")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<Value>()["dueAt"].is_string());

    let response = server
        .get("/api/parse-date")
        .add_query_param("q", "not a real date")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<Value>()["dueAt"].is_null());
}
