//! HTTP-level integration tests for the shop settings singleton.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, put_json, put_json_admin};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_settings_initialize_on_first_read(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/api/v1/settings").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].take();
    assert_eq!(data["reservation_days"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_reservation_days_persists(pool: PgPool) {
    let app = build_test_app(pool);

    let response = put_json_admin(&app, "/api/v1/settings", &json!({"reservation_days": 5})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].take();
    assert_eq!(data["reservation_days"], 5);

    let response = get(&app, "/api/v1/settings").await;
    let data = body_json(response).await["data"].take();
    assert_eq!(data["reservation_days"], 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reservation_days_clamped_to_minimum(pool: PgPool) {
    let app = build_test_app(pool);

    for days in [0, -3] {
        let response =
            put_json_admin(&app, "/api/v1/settings", &json!({"reservation_days": days})).await;
        assert_eq!(response.status(), StatusCode::OK);
        let data = body_json(response).await["data"].take();
        assert_eq!(data["reservation_days"], 1);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_settings_update_requires_admin_token(pool: PgPool) {
    let app = build_test_app(pool);

    let response = put_json(&app, "/api/v1/settings", &json!({"reservation_days": 5})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The singleton is untouched.
    let response = get(&app, "/api/v1/settings").await;
    let data = body_json(response).await["data"].take();
    assert_eq!(data["reservation_days"], 2);
}
