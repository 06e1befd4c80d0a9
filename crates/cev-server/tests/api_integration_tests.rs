//! Router-level integration tests
//!
//! Drive the assembled router with real requests against a test database:
//! authentication gates, response envelopes, and the upload-to-summary
//! flow.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cev_server::api::create_router;
use cev_server::config::Config;
use cev_server::features::auth::password;
use cev_server::features::FeatureState;
use cev_server::report::ReportRenderer;

const CANONICAL_CSV: &str = "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
    Pump-1,Pump,120,5.2,110\n\
    Compressor-1,Compressor,95,8.4,95\n";

const BOUNDARY: &str = "cev-test-boundary";

fn app(pool: PgPool) -> Router {
    let state = FeatureState {
        db: pool,
        reports: ReportRenderer::disabled(),
    };
    create_router(state, &Config::default())
}

async fn seed_token(pool: &PgPool) -> String {
    let salt = password::generate_salt();
    let hash = password::hash_password(&salt, "password");

    let user_id: uuid::Uuid = sqlx::query_scalar(
        "INSERT INTO users (username, password_salt, password_hash) VALUES ('tester', $1, $2) RETURNING id",
    )
    .bind(salt)
    .bind(hash)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = password::generate_token();
    sqlx::query("INSERT INTO api_tokens (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();

    token
}

fn upload_request(token: Option<&str>, csv: &str, filename: &str) -> Request<Body> {
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{boundary}--\r\n",
        boundary = BOUNDARY,
    );

    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/v1/datasets/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Token {}", token));
    }

    builder.body(Body::from(body)).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_upload_requires_auth(pool: PgPool) {
    let response = app(pool.clone())
        .oneshot(upload_request(None, CANONICAL_CSV, "noauth.csv"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");

    // Rejected before any domain logic: nothing was persisted.
    let datasets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(datasets, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_upload_and_summary_flow(pool: PgPool) {
    let token = seed_token(&pool).await;

    let response = app(pool.clone())
        .oneshot(upload_request(Some(&token), CANONICAL_CSV, "test.csv"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["created"], 2);
    assert_eq!(json["data"]["dataset"]["name"], "test.csv");
    assert_eq!(json["data"]["dataset"]["equipment_count"], 2);
    assert_eq!(json["data"]["dataset"]["avg_flowrate"], 107.5);
    assert_eq!(json["data"]["dataset"]["type_distribution"]["Pump"], 1);

    let dataset_id = json["data"]["dataset"]["id"].as_str().unwrap().to_string();

    // Summary endpoint needs no authentication.
    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/datasets/{}/summary", dataset_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["equipment_count"], 2);
    assert_eq!(json["data"]["avg_temperature"], 102.5);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_recent_listing_is_public(pool: PgPool) {
    let token = seed_token(&pool).await;

    for i in 0..2 {
        let filename = format!("batch-{}.csv", i);
        app(pool.clone())
            .oneshot(upload_request(Some(&token), CANONICAL_CSV, &filename))
            .await
            .unwrap();
    }

    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .uri("/api/v1/datasets")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_summary_for_unknown_dataset_is_not_found(pool: PgPool) {
    let response = app(pool)
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/datasets/{}/summary", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_report_requires_auth_then_reports_unavailable(pool: PgPool) {
    let token = seed_token(&pool).await;

    let upload = app(pool.clone())
        .oneshot(upload_request(Some(&token), CANONICAL_CSV, "report.csv"))
        .await
        .unwrap();
    let dataset_id = body_json(upload).await["data"]["dataset"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Unauthenticated request is rejected first.
    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/datasets/{}/report/pdf", dataset_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Authenticated, but the renderer is disabled in tests: distinct 501.
    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/datasets/{}/report/pdf", dataset_id))
                .header(header::AUTHORIZATION, format!("Token {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "REPORT_UNAVAILABLE");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_export_needs_no_auth(pool: PgPool) {
    let response = app(pool)
        .oneshot(
            Request::builder()
                .uri("/api/v1/equipment/export/csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("Name,Type,Material,Flowrate,Pressure,Temperature"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_token_endpoint_issues_and_rejects(pool: PgPool) {
    let salt = password::generate_salt();
    let hash = password::hash_password(&salt, "password");
    sqlx::query("INSERT INTO users (username, password_salt, password_hash) VALUES ('demo', $1, $2)")
        .bind(salt)
        .bind(hash)
        .execute(&pool)
        .await
        .unwrap();

    let response = app(pool.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/token")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"demo","password":"password"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["token"].as_str().unwrap().len(), 64);

    let response = app(pool)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/token")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"demo","password":"wrong"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_upload_with_bad_rows_counts_partial(pool: PgPool) {
    let token = seed_token(&pool).await;

    let csv = "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
        Pump-1,Pump,120,5.2,110\n\
        Pump-2,Pump,oops,5.0,100\n";

    let response = app(pool)
        .oneshot(upload_request(Some(&token), csv, "partial.csv"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], 1);
    assert_eq!(json["data"]["dataset"]["equipment_count"], 1);
}
