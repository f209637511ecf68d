//! Tenants service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::tenants::{
    data::NewTenant, errors::TenantsServiceError, records::TenantRecord,
    repository::PgTenantsRepository,
};

#[derive(Debug, Clone)]
pub struct PgTenantsService {
    repository: PgTenantsRepository,
}

impl PgTenantsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgTenantsRepository::new(pool),
        }
    }
}

#[async_trait]
impl TenantsService for PgTenantsService {
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError> {
        self.repository
            .create_tenant(tenant)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Tenant persistence operations.
pub trait TenantsService: Send + Sync {
    /// Creates a new tenant.
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{domain::tenants::records::TenantUuid, test::TestContext};

    use super::*;

    fn new_tenant(name: &str) -> NewTenant {
        NewTenant {
            uuid: TenantUuid::new(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn created_tenant_keeps_requested_uuid() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let before = Timestamp::now();
        let requested = new_tenant("Padaria Central");
        let tenant = svc.create_tenant(requested.clone()).await?;

        assert_eq!(tenant.uuid, requested.uuid);
        assert_eq!(tenant.name, "Padaria Central");
        assert!(tenant.created_at >= before);
        assert!(tenant.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn reused_uuid_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let first = svc.create_tenant(new_tenant("First Shop")).await?;

        let result = svc
            .create_tenant(NewTenant {
                uuid: first.uuid,
                name: "Second Shop".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(TenantsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn names_may_repeat() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let a = svc.create_tenant(new_tenant("Doces da Vila")).await?;
        let b = svc.create_tenant(new_tenant("Doces da Vila")).await?;

        assert_ne!(a.uuid, b.uuid);

        Ok(())
    }
}
