use sqlx::PgPool;
use uuid::Uuid;

use slateboard::config::cors::CorsConfig;
use slateboard::config::jwt::JwtConfig;
use slateboard::modules::users::model::Role;
use slateboard::router::init_router;
use slateboard::state::AppState;
use slateboard::utils::jwt::create_access_token;
use slateboard::utils::password::hash_password;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[allow(dead_code)]
impl TestUser {
    /// Bearer token signed with the test secret.
    pub fn token(&self) -> String {
        create_access_token(self.id, self.role, &test_jwt_config()).unwrap()
    }
}

/// Inserts a user with the given role directly into the database.
#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, email: &str, password: &str, role: Role) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(&hashed)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

#[allow(dead_code)]
pub async fn create_test_course(pool: &PgPool, teacher_id: Uuid, name: &str) -> Uuid {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO courses (name, description, teacher_id)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind(name)
    .bind("Test course description")
    .bind(teacher_id)
    .fetch_one(pool)
    .await
    .unwrap();

    id
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
