use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{Role, User};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequest};

pub struct AuthService;

impl AuthService {
    /// Registers a new user. The role defaults to `student`; an explicit
    /// role must parse into the known role set. Duplicate emails are caught
    /// by the unique constraint, not by a pre-check, so two concurrent
    /// registrations cannot both succeed.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let role = match dto.role.as_deref() {
            None => Role::Student,
            Some(s) => Role::parse(s)
                .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid role: {}", s)))?,
        };

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, role",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(role.as_str())
        .fetch_one(db)
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

    /// Authenticates by email and password and issues a token. Unknown email
    /// and wrong password produce the identical error so the response does
    /// not reveal whether an account exists.
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            name: String,
            email: String,
            role: String,
            password: String,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, name, email, role, password FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid email or password")))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let role = Role::parse(&row.role)
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Invalid role stored: {}", row.role)))?;
        let token = create_access_token(row.id, role, jwt_config)?;

        Ok(LoginResponse {
            token,
            user: User {
                id: row.id,
                name: row.name,
                email: row.email,
                role: row.role,
            },
        })
    }
}
