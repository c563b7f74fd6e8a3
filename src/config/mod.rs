//! Configuration loaded from environment variables.
//!
//! - [`cors`]: Allowed CORS origins
//! - [`database`]: PostgreSQL connection pool
//! - [`jwt`]: Signing secret and token lifetime

pub mod cors;
pub mod database;
pub mod jwt;
