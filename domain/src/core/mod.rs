//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the LLM playing every debate role
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: text helpers for logs and console previews

pub mod error;
pub mod model;
pub mod string;
