//! Tenant Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Shop identifier; row-level security keys every catalog and cart row on it.
pub type TenantUuid = TypedUuid<TenantRecord>;

/// Shop owning a catalog and the carts of its customers.
#[derive(Debug, Clone)]
pub struct TenantRecord {
    pub uuid: TenantUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Set once the shop is closed.
    pub deleted_at: Option<Timestamp>,
}
