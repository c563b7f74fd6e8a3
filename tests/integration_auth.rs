mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use slateboard::modules::users::model::Role;
use sqlx::PgPool;
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_success_defaults_to_student(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Ada", "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "student");
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_explicit_role(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Ada", "email": email, "password": "password123", "role": "teacher" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["role"], "teacher");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_rejects_unknown_role(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "name": "Ada",
                "email": generate_unique_email(),
                "password": "password123",
                "role": "superuser"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email_leaves_single_row(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Ada", "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Imposter", "email": email, "password": "password456" }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_missing_field_names_it(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Ada", "email": generate_unique_email() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("password"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "password123", Role::Student).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.get("token").is_some());
    assert_eq!(body["user"]["email"], user.email);
    assert!(body["user"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_failure_is_constant_shape(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Student).await;
    let app = setup_test_app(pool.clone()).await;

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": "not-the-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    let wrong_password_body = body_json(wrong_password).await;

    let unknown_email = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": generate_unique_email(), "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    let unknown_email_body = body_json(unknown_email).await;

    // Unknown email and wrong password must be indistinguishable.
    assert_eq!(wrong_password_body, unknown_email_body);
}
