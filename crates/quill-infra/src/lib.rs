//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory store only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(test)]
mod controller_tests;

pub use database::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};
