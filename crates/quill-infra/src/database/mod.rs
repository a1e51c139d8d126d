//! Persistent store implementations.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryPostRepository, InMemoryStore,
    InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Mask the local part of an email-style username to keep PII out of logs.
pub(crate) fn mask_username(username: &str) -> String {
    match username.find('@') {
        Some(at_pos) => {
            let (local, domain) = username.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.len() > 1 => format!("{first}***{domain}"),
                _ => format!("***{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
