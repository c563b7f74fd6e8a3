mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_course, create_test_user, generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use slateboard::modules::users::model::Role;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn authed_json(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_as_teacher(pool: PgPool) {
    let teacher = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Teacher).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/courses",
            &teacher.token(),
            json!({ "name": "Rust 101", "description": "Intro to Rust" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Rust 101");
    assert_eq!(body["teacher_id"], teacher.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_requires_teacher_role(pool: PgPool) {
    let student = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Student).await;
    let admin = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Admin).await;
    let app = setup_test_app(pool.clone()).await;

    for user in [&student, &admin] {
        let response = app
            .clone()
            .oneshot(authed_json(
                "POST",
                "/api/courses",
                &user.token(),
                json!({ "name": "Rust 101", "description": "Intro to Rust" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_empty_description_rejected(pool: PgPool) {
    let teacher = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Teacher).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/courses",
            &teacher.token(),
            json!({ "name": "Rust 101", "description": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_token_is_unauthorized(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/courses")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_token_is_forbidden(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed("GET", "/api/courses", "not.a.valid.token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_create_course_for_teacher(pool: PgPool) {
    let admin = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Admin).await;
    let teacher = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Teacher).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/courses/admin",
            &admin.token(),
            json!({
                "name": "Algebra",
                "description": "Linear algebra",
                "teacher_id": teacher.id
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["teacher_id"], teacher.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_create_course_rejects_non_teacher_owner(pool: PgPool) {
    let admin = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Admin).await;
    let student = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Student).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/courses/admin",
            &admin.token(),
            json!({
                "name": "Algebra",
                "description": "Linear algebra",
                "teacher_id": student.id
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_role_filtering(pool: PgPool) {
    let teacher_a = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Teacher).await;
    let teacher_b = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Teacher).await;
    let student = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Student).await;
    create_test_course(&pool, teacher_a.id, "Course A").await;
    create_test_course(&pool, teacher_b.id, "Course B").await;
    let app = setup_test_app(pool.clone()).await;

    // Teacher sees only their own courses.
    let response = app
        .clone()
        .oneshot(authed("GET", "/api/courses", &teacher_a.token()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["name"], "Course A");
    assert_eq!(courses[0]["teacher_name"], "Test User");

    // Student sees every course with the teacher name joined.
    let response = app
        .oneshot(authed("GET", "/api/courses", &student.token()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course_owner_only(pool: PgPool) {
    let owner = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Teacher).await;
    let other = create_test_user(&pool, &generate_unique_email(), "pass1234", Role::Teacher).await;
    let course_id = create_test_course(&pool, owner.id, "Course A").await;
    let app = setup_test_app(pool.clone()).await;

    // A different teacher cannot delete it, and the row stays.
    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/courses/{}", course_id),
            &other.token(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM courses WHERE id = $1")
        .bind(course_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // The owner can.
    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/courses/{}", course_id),
            &owner.token(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["course"]["id"], course_id.to_string());

    // A missing course answers the same as a foreign one.
    let response = app
        .oneshot(authed(
            "DELETE",
            &format!("/api/courses/{}", Uuid::new_v4()),
            &owner.token(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
