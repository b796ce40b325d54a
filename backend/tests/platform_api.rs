use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use chrono::{Datelike, Duration};
use serde_json::{json, Value};
use hrdesk_backend::{docs, middleware::REQUEST_ID_HEADER, models::employee::EmployeeRole};
use tower::ServiceExt;
use utoipa::OpenApi;

mod support;

use support::{
    create_test_token, future_monday, json_request, read_json, seed_category, seed_employee,
    seed_tenant, test_app, test_pool,
};

#[test]
fn openapi_lists_leave_paths_and_bearer_scheme() {
    let json = serde_json::to_value(docs::ApiDoc::openapi()).expect("serialize openapi");
    let paths = json
        .get("paths")
        .and_then(|v| v.as_object())
        .expect("paths object");
    assert!(paths.contains_key("/api/leave/requests"));
    assert!(paths.contains_key("/api/admin/leave/balances/open-year"));

    let bearer = json
        .pointer("/components/securitySchemes/BearerAuth")
        .expect("BearerAuth scheme");
    assert_eq!(bearer.get("scheme").and_then(Value::as_str), Some("bearer"));
}

#[tokio::test]
async fn health_reports_database_and_echoes_request_id() {
    let app = test_app(test_pool().await);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(REQUEST_ID_HEADER, "client-req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "client-req-123"
    );
    let body = read_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["database"], json!("ok"));

    // Without a client id one is generated.
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("generated request id");
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app(test_pool().await);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["paths"]["/api/health"].is_object());
}

#[tokio::test]
async fn holidays_are_unique_per_date() {
    let pool = test_pool().await;
    let tenant = seed_tenant(&pool).await;
    let admin = seed_employee(&pool, &tenant, EmployeeRole::Admin).await;
    let employee = seed_employee(&pool, &tenant, EmployeeRole::Employee).await;
    let app = test_app(pool);
    let token = create_test_token(&admin);
    let date = future_monday();
    let payload = json!({ "holiday_date": date, "name": "Company Day" });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/admin/holidays", &token, Some(payload.clone())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/admin/holidays", &token, Some(payload)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/holidays?year={}", date.year()),
            &create_test_token(&employee),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["name"], json!("Company Day"));
}

#[tokio::test]
async fn export_returns_csv_for_tenant_admins_only() {
    let pool = test_pool().await;
    let tenant = seed_tenant(&pool).await;
    let employee = seed_employee(&pool, &tenant, EmployeeRole::Employee).await;
    let manager = seed_employee(&pool, &tenant, EmployeeRole::Manager).await;
    let hr = seed_employee(&pool, &tenant, EmployeeRole::Hr).await;
    let sick = seed_category(&pool, &tenant, "sick", 0, true).await;
    let app = test_app(pool);
    let monday = future_monday();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/leave/requests",
            &create_test_token(&employee),
            Some(json!({
                "category_id": sick.id,
                "start_date": monday,
                "end_date": monday + Duration::days(1),
                "reason": "=HYPERLINK(\"x\")"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/admin/leave/export",
            &create_test_token(&manager),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/admin/leave/export?status=pending",
            &create_test_token(&hr),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("\"request_id\",\"employee_id\""));
    assert!(lines[1].contains("\"sick\""));
    assert!(lines[1].contains("\"2\""));
    assert!(lines[1].contains("'=HYPERLINK"));
}
