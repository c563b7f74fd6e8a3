use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that verifies the bearer token and exposes the authenticated
/// principal's claims to the handler.
///
/// A missing or malformed `Authorization` header is 401; a token that fails
/// verification (bad signature, expired) is 403. The token itself is never
/// logged.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::forbidden(anyhow::anyhow!("Forbidden: invalid token")))
    }

    pub fn role(&self) -> Result<Role, AppError> {
        Role::parse(&self.0.role)
            .ok_or_else(|| AppError::forbidden(anyhow::anyhow!("Forbidden: invalid token")))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Unauthorized: token missing"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Unauthorized: token missing"))
        })?;

        let claims = verify_token(token, &state.jwt_config)?;
        tracing::debug!(role = %claims.role, "authenticated request");

        Ok(AuthUser(claims))
    }
}
