use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use train_records::{app, AppState, MemoryTrainStore, TrainRecord};

fn fixture_rows() -> Vec<TrainRecord> {
    vec![
        TrainRecord {
            id: 52,
            train_date: "2022-01-01".into(),
            platform: 4,
            start_point: "start_point".into(),
            end_point: "end_point".into(),
            arrival_time: "10:00:00".into(),
            departure_time: "10:14:33".into(),
        },
        TrainRecord {
            id: 443,
            train_date: "2022-01-02".into(),
            platform: 2,
            start_point: "start_point2".into(),
            end_point: "end_point2".into(),
            arrival_time: "22:00:00".into(),
            departure_time: "22:40:20".into(),
        },
    ]
}

fn router_with(store: MemoryTrainStore) -> (Router, Arc<MemoryTrainStore>) {
    let store = Arc::new(store);
    let state = AppState { store: store.clone() };
    (app(state, 64 * 1024), store)
}

fn seeded() -> (Router, Arc<MemoryTrainStore>) {
    router_with(MemoryTrainStore::with_rows(fixture_rows()))
}

fn new_train() -> Value {
    json!({
        "train_date": "2022-01-01",
        "platform": 4,
        "start_point": "A",
        "end_point": "B",
        "arrival_time": "10:00:00",
        "departure_time": "10:14:33"
    })
}

fn updated_train() -> Value {
    json!({
        "train_date": "2023-01-01",
        "platform": 5,
        "start_point": "new_start",
        "end_point": "new_end",
        "arrival_time": "11:00:00",
        "departure_time": "11:30:00"
    })
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value, Option<String>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let error_header = response
        .headers()
        .get("x-error")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value, error_header)
}

async fn send_raw(router: &Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn root_returns_usage_message() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("/trains/end_point/{end_point}"));
}

#[tokio::test]
async fn create_returns_generated_id_and_echoes_fields() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::POST, "/trains", Some(new_train())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Train created successfully");
    let train = &body["train"];
    assert_eq!(train["id"], 444);
    for (key, value) in new_train().as_object().unwrap() {
        assert_eq!(&train[key], value, "field {}", key);
    }
}

#[tokio::test]
async fn list_returns_every_row() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/trains", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_by_id_returns_one_element_list() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/trains/id/52", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 52);
}

#[tokio::test]
async fn get_by_id_missing_is_404() {
    let (router, _) = seeded();
    let (status, body, header) = send(&router, Method::GET, "/trains/id/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Train not found" }));
    assert_eq!(header, None);
}

#[tokio::test]
async fn get_by_platform_filters_rows() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/trains/platform/4", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["platform"], 4);
}

#[tokio::test]
async fn empty_lookups_are_200_not_404() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/trains/platform/17", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body, _) = send(&router, Method::GET, "/trains/end_point/nowhere", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_by_end_point_matches_exactly() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/trains/end_point/end_point2", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 443);
}

#[tokio::test]
async fn end_point_is_percent_decoded() {
    let (router, _) = router_with(MemoryTrainStore::new());
    let mut train = new_train();
    train["end_point"] = json!("Central Station");
    send(&router, Method::POST, "/trains", Some(train)).await;
    let (status, body, _) = send(&router, Method::GET, "/trains/end_point/Central%20Station", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_numeric_platform_is_rejected_at_boundary() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/trains/platform/east", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["path", "platform"]));
    assert_eq!(body["detail"][0]["type"], "int_parsing");
}

#[tokio::test]
async fn non_numeric_id_is_rejected_at_boundary() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::DELETE, "/trains/id/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["path", "id"]));
}

#[tokio::test]
async fn update_overwrites_every_field() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::PUT, "/trains/id/52", Some(updated_train())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Train updated successfully");
    assert_eq!(body["train"]["id"], 52);

    let (status, body, _) = send(&router, Method::GET, "/trains/id/52", None).await;
    assert_eq!(status, StatusCode::OK);
    let row = &body[0];
    for (key, value) in updated_train().as_object().unwrap() {
        assert_eq!(&row[key], value, "field {}", key);
    }
}

#[tokio::test]
async fn update_with_unchanged_values_still_succeeds() {
    let (router, _) = seeded();
    let mut same = new_train();
    same["start_point"] = json!("start_point");
    same["end_point"] = json!("end_point");
    let (status, body, _) = send(&router, Method::PUT, "/trains/id/52", Some(same.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["train"]["start_point"], "start_point");
    assert_eq!(body["train"]["platform"], 4);
}

#[tokio::test]
async fn update_missing_is_404_without_mutation() {
    let (router, store) = seeded();
    let (status, body, _) = send(&router, Method::PUT, "/trains/id/999", Some(updated_train())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Train not found" }));
    assert_eq!(store.len(), 2);

    let (_, body, _) = send(&router, Method::GET, "/trains", None).await;
    let rows: Vec<TrainRecord> = serde_json::from_value(body).unwrap();
    assert_eq!(rows, fixture_rows());
}

#[tokio::test]
async fn update_requires_every_field() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::PUT, "/trains/id/52", Some(json!({ "platform": 9 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["loc"][1].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["train_date", "start_point", "end_point", "arrival_time", "departure_time"]
    );

    let (_, body, _) = send(&router, Method::GET, "/trains/id/52", None).await;
    assert_eq!(body[0]["platform"], 4);
}

#[tokio::test]
async fn delete_returns_captured_row_and_count() {
    let (router, store) = seeded();
    let (status, body, _) = send(&router, Method::DELETE, "/trains/id/52", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Train deleted successfully");
    assert_eq!(body["rows_affected"], 1);
    let deleted: TrainRecord = serde_json::from_value(body["deleted_train"].clone()).unwrap();
    assert_eq!(deleted, fixture_rows()[0]);
    assert_eq!(store.len(), 1);

    let (status, _, _) = send(&router, Method::GET, "/trains/id/52", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_is_404_and_keeps_other_rows() {
    let (router, store) = seeded();
    let (status, body, _) = send(&router, Method::DELETE, "/trains/id/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Train not found" }));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn create_delete_then_lookup_scenario() {
    let (router, _) = router_with(MemoryTrainStore::new());
    let (status, body, _) = send(&router, Method::POST, "/trains", Some(new_train())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["train"]["platform"], 4);
    let id = body["train"]["id"].as_i64().unwrap();

    let (status, body, _) = send(&router, Method::DELETE, &format!("/trains/id/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows_affected"], 1);

    let (status, body, _) = send(&router, Method::GET, &format!("/trains/id/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Train not found" }));
}

#[tokio::test]
async fn create_rejects_malformed_bodies() {
    let (router, store) = router_with(MemoryTrainStore::new());

    let (status, body) = send_raw(&router, Method::POST, "/trains", "{not json").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");

    let mut wrong = new_train();
    wrong["platform"] = json!("four");
    let (status, body, _) = send(&router, Method::POST, "/trains", Some(wrong)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "platform"]));

    assert!(store.is_empty());
}

#[tokio::test]
async fn storage_failures_are_500_with_diagnostic_header() {
    let (router, _) = router_with(MemoryTrainStore::failing("connection refused"));
    let cases = [
        (Method::GET, "/trains", None, "An error occurred while fetching the trains."),
        (Method::GET, "/trains/id/1", None, "An error occurred while fetching the train."),
        (Method::GET, "/trains/platform/1", None, "An error occurred while fetching the train."),
        (Method::GET, "/trains/end_point/B", None, "An error occurred while fetching the train."),
        (Method::POST, "/trains", Some(new_train()), "An error occurred while creating the train."),
        (Method::PUT, "/trains/id/1", Some(new_train()), "An error occurred while updating the train."),
        (Method::DELETE, "/trains/id/1", None, "An error occurred while deleting the train."),
    ];
    for (method, uri, body, expected) in cases {
        let (status, body, header) = send(&router, method.clone(), uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert!(body["detail"].as_str().unwrap().contains("connection refused"));
        assert_eq!(header.as_deref(), Some(expected), "{} {}", method, uri);
    }
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let store = Arc::new(MemoryTrainStore::new());
    let router = app(AppState { store: store.clone() }, 32);
    let (status, body, _) = send(&router, Method::POST, "/trains", Some(new_train())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["detail"].as_str().unwrap().contains("length limit exceeded"));

    let payload = new_train().to_string();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/trains")
        .header("content-type", "application/json")
        .header("content-length", payload.len())
        .body(Body::from(payload))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].is_string());
    assert!(store.is_empty());
}

#[tokio::test]
async fn unknown_routes_and_methods_use_detail_body() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/trains/id/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not Found" }));

    let (status, body, _) = send(&router, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not Found" }));

    let (status, body, _) = send(&router, Method::PATCH, "/trains/id/52", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "detail": "Method Not Allowed" }));
}

#[tokio::test]
async fn undecodable_path_segment_uses_detail_body() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/trains/end_point/%FF", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("UTF-8"));
}

#[tokio::test]
async fn update_reports_path_and_body_errors_together() {
    let (router, store) = seeded();
    let (status, body, _) = send(&router, Method::PUT, "/trains/id/abc", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = body["detail"].as_array().unwrap();
    assert_eq!(detail.len(), 7);
    assert_eq!(detail[0]["loc"], json!(["path", "id"]));
    assert!(detail[1..].iter().all(|e| e["loc"][0] == "body"));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn failed_writes_leave_rows_in_place() {
    let store = Arc::new(MemoryTrainStore::with_rows(fixture_rows()).fail_with("connection reset"));
    let router = app(AppState { store: store.clone() }, 64 * 1024);
    let (status, _, _) = send(&router, Method::DELETE, "/trains/id/52", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _, _) = send(&router, Method::PUT, "/trains/id/52", Some(updated_train())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn health_ready_and_openapi() {
    let (router, _) = seeded();
    let (status, body, _) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body, _) = send(&router, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body, _) = send(&router, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/trains/id/{id}"]["put"].is_object());
    assert!(body["components"]["schemas"]["TrainRecord"].is_object());
}

#[tokio::test]
async fn ready_degrades_when_store_is_down() {
    let (router, _) = router_with(MemoryTrainStore::failing("down"));
    let (status, body, _) = send(&router, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}
