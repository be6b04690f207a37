//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] — domain-level errors
//! - [`string`] — character-safe truncation helpers used by prompts and parsers

pub mod error;
pub mod string;
