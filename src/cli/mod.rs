//! CLI commands. Admin accounts are bootstrapped here rather than through
//! the public registration endpoint.

use sqlx::PgPool;

use crate::modules::users::model::{Role, User};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

/// Inserts an admin user directly. Fails if the email is already taken.
pub async fn create_admin(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let hashed_password = hash_password(password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, email, role",
    )
    .bind(name)
    .bind(email)
    .bind(&hashed_password)
    .bind(Role::Admin.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::conflict(anyhow::anyhow!("Email already registered"));
            }
        }
        AppError::database(e)
    })?;

    Ok(user)
}
