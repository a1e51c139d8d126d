//! # Quill Shared
//!
//! Request/response types for the blog API, with the form validation rules
//! each request carries.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
