//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use cakeshop_app::domain::tenants::records::TenantUuid;

use crate::errors::ApiError;

const TENANT_UUID_DEPOT_KEY: &str = "tenant_uuid";

/// Helpers for mapping depot extraction failures to API errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_tenant_uuid(&mut self, tenant: TenantUuid);

    fn tenant_uuid_or_400(&self) -> Result<TenantUuid, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| {
            ApiError::internal("missing depot value", std::any::type_name::<T>())
        })
    }

    fn insert_tenant_uuid(&mut self, tenant: TenantUuid) {
        self.insert(TENANT_UUID_DEPOT_KEY, tenant);
    }

    fn tenant_uuid_or_400(&self) -> Result<TenantUuid, ApiError> {
        self.get::<TenantUuid>(TENANT_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| ApiError::account_id_required())
    }
}
