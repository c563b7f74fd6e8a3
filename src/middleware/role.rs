//! Role gates built on [`AuthUser`].
//!
//! Each gate is an extractor that authenticates the request and then checks
//! exact membership in the closed [`Role`] set. Routes declare the role they
//! need by taking the matching extractor; there is no variadic role list.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

fn check_role(auth_user: &AuthUser, required: Role) -> Result<(), AppError> {
    if auth_user.role()? != required {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Forbidden: access denied"
        )));
    }
    Ok(())
}

macro_rules! role_extractor {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = AuthUser::from_request_parts(parts, state).await?;
                check_role(&auth_user, $role)?;
                Ok($name(auth_user))
            }
        }
    };
}

role_extractor!(RequireAdmin, Role::Admin);
role_extractor!(RequireTeacher, Role::Teacher);
role_extractor!(RequireStudent, Role::Student);
