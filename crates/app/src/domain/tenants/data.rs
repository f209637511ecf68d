//! Tenant Data

use crate::domain::tenants::records::TenantUuid;

/// Shop to register; its catalog and carts are scoped to `uuid`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTenant {
    /// Becomes `tenant_uuid` on every row the shop owns.
    pub uuid: TenantUuid,

    /// Shop name, not required to be unique.
    pub name: String,
}
