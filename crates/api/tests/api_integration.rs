//! API integration tests.
//!
//! Handlers run against a mock database, so these cover routing, extraction,
//! validation, and the response envelope rather than SQL.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use http_body_util::BodyExt;
use naijafix_api::{middleware::AppState, router as api_router};
use naijafix_db::entities::report::{self, Category, Priority, ReportStatus};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use tower::ServiceExt;

const VALID_ID: &str = "01arz3ndektsv4rrffq69g5fav";

fn sample_model(id: &str) -> report::Model {
    let now = Utc::now();
    report::Model {
        id: id.to_string(),
        title: "Broken transformer on Allen Avenue".to_string(),
        description: "The transformer has been sparking for three days now".to_string(),
        category: Category::Electricity,
        priority: Priority::Medium,
        area: "Allen Avenue".to_string(),
        lga: "Ikeja".to_string(),
        state: "Lagos".to_string(),
        latitude: None,
        longitude: None,
        image: None,
        status: ReportStatus::Pending,
        userid: "user-1".to_string(),
        assigned_to: None,
        resolution_notes: None,
        estimated_resolution_date: None,
        votes: 0,
        is_urgent: false,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(total)))])
}

fn app_with(db: MockDatabase) -> Router {
    let state = AppState::new(Arc::new(db.into_connection()));
    api_router().with_state(state)
}

fn empty_app() -> Router {
    app_with(MockDatabase::new(DatabaseBackend::Postgres))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn get_with_malformed_id_returns_400() {
    let app = empty_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reports/not-a-ulid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "INVALID_ID");
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<report::Model>::new()]);
    let app = app_with(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/reports/{VALID_ID}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "REPORT_NOT_FOUND");
}

#[tokio::test]
async fn create_valid_report_returns_201_with_nested_location() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![sample_model(VALID_ID)]]);
    let app = app_with(db);

    let body = serde_json::json!({
        "title": "Broken transformer on Allen Avenue",
        "description": "The transformer has been sparking for three days now",
        "category": "Electricity",
        "location": {"area": "Allen Avenue", "state": "Lagos"},
        "userid": "user-1"
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reports")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Report created successfully");
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["priority"], "medium");
    assert_eq!(json["data"]["location"]["state"], "Lagos");
    assert_eq!(json["data"]["isUrgent"], false);
}

#[tokio::test]
async fn create_with_short_title_returns_validation_error() {
    let app = empty_app();

    let body = serde_json::json!({
        "title": "Bad",
        "description": "The transformer has been sparking for three days now",
        "category": "Electricity",
        "location": {"area": "Allen Avenue", "state": "Lagos"},
        "userid": "user-1"
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reports")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Title must be at least 5 characters long");
}

#[tokio::test]
async fn create_with_missing_fields_returns_400() {
    let app = empty_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reports")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn status_patch_rejects_unknown_status() {
    let app = empty_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/reports/{VALID_ID}/status"))
                .method("PATCH")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"status":"archived"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid status: archived");
}

#[tokio::test]
async fn status_patch_requires_status_field() {
    let app = empty_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/reports/{VALID_ID}/status"))
                .method("PATCH")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Status is required");
}

#[tokio::test]
async fn create_with_wrong_typed_field_returns_400() {
    let app = empty_app();

    let body = serde_json::json!({
        "title": 123,
        "description": "The transformer has been sparking for three days now",
        "category": "Electricity",
        "location": {"area": "Allen Avenue", "state": "Lagos"},
        "userid": "user-1"
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reports")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn status_patch_twice_yields_same_state() {
    let mut in_progress = sample_model(VALID_ID);
    in_progress.status = ReportStatus::InProgress;
    let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([
        vec![sample_model(VALID_ID)],
        vec![in_progress.clone()],
        vec![in_progress.clone()],
        vec![in_progress],
    ]);
    let app = app_with(db);

    let patch = || {
        Request::builder()
            .uri(format!("/reports/{VALID_ID}/status"))
            .method("PATCH")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"status":"in-progress"}"#))
            .unwrap()
    };

    let response = app.clone().oneshot(patch()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["data"]["status"], "in-progress");

    let response = app.oneshot(patch()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["data"], first["data"]);
}

#[tokio::test]
async fn stats_summary_for_empty_collection_has_zeroed_shape() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([
        vec![count_row(0)],
        vec![count_row(0)],
        vec![count_row(0)],
        vec![count_row(0)],
        Vec::new(),
        Vec::new(),
    ]);
    let app = app_with(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reports/stats/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        serde_json::json!({
            "total": 0,
            "pending": 0,
            "inProgress": 0,
            "resolved": 0,
            "byCategory": [],
            "byState": []
        })
    );
}

#[tokio::test]
async fn list_returns_pagination_envelope() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(0)]])
        .append_query_results([Vec::<report::Model>::new()]);
    let app = app_with(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reports?page=1&limit=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], serde_json::json!([]));
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["limit"], 10);
    assert_eq!(json["pagination"]["total"], 0);
    assert_eq!(json["pagination"]["pages"], 0);
}

#[tokio::test]
async fn list_with_unknown_category_filter_returns_400() {
    let app = empty_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reports?category=Potholes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn delete_unknown_report_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([MockExecResult {
        last_insert_id: 0,
        rows_affected: 0,
    }]);
    let app = app_with(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/reports/{VALID_ID}"))
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_database_state() {
    let app = empty_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "NaijaFix API is running");
    assert_eq!(json["database"], "Connected");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = empty_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
