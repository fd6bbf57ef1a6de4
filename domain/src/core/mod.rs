//! Core domain concepts shared across all subdomains.
//!
//! - [`location::UserLocation`] — where the user is, used to fill tool defaults
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod location;
