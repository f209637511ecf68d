//! Tenants
//!
//! A tenant is one shop. Tenant rows sit outside row-level security so the
//! CLI can register shops before any tenant context exists.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::TenantsServiceError;
pub use service::*;
