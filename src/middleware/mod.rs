//! Authentication and authorization extractors.
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the JWT and extracts the claims
//! 3. Role gates in [`role`] check membership in the closed role set
//! 4. Handler runs with the authenticated principal

pub mod auth;
pub mod role;
