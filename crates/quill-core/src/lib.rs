//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! Entities, the ownership policy and the access controller live here,
//! together with the ports that infrastructure must implement.

pub mod access;
pub mod controller;
pub mod domain;
pub mod error;
pub mod ports;

pub use access::OwnershipPolicy;
pub use controller::{BlogController, CommentInput, PostDetail, PostInput};
pub use error::DomainError;
